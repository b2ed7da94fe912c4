//! Aging report example: outstanding amounts bucketed by age per customer

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use report_core::utils::MemorySource;
use report_core::{BucketSchedule, ReportEngine, TransactionBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("⏳ Report Core - Customer Aging Example\n");

    let source = MemorySource::new();
    let invoices = [
        ("acme", 2024, 6, 15, 100),
        ("acme", 2024, 4, 1, 250),
        ("globex", 2024, 2, 20, 400),
        ("globex", 2023, 1, 5, 75),
    ];
    for (entity, y, m, d, amount) in invoices {
        source.insert(
            TransactionBuilder::new(entity, NaiveDate::from_ymd_opt(y, m, d).unwrap())
                .debit(BigDecimal::from(amount))
                .residual(BigDecimal::from(amount))
                .build()?,
        );
    }

    let engine = ReportEngine::new(source);
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let schedule = BucketSchedule::six_bucket();
    let labels: Vec<String> = schedule.labels().iter().map(|l| l.to_string()).collect();

    let summaries = engine.aging_report(as_of, schedule).await?;

    println!("As of {}\n", as_of);
    print!("{:<10} {:>10}", "Customer", "Total");
    for label in &labels {
        print!(" {:>9}", label);
    }
    println!();

    let mut entities: Vec<_> = summaries.keys().collect();
    entities.sort();
    for entity in entities {
        let summary = &summaries[entity];
        print!("{:<10} {:>10}", summary.entity_id, summary.total_outstanding);
        for amount in &summary.bucket_amounts {
            print!(" {:>9}", amount);
        }
        println!();
    }

    Ok(())
}
