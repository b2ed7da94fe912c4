//! Customer ledger example: opening balance, running balances, totals

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use report_core::utils::MemorySource;
use report_core::{ReportEngine, TransactionBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📒 Report Core - Customer Ledger Example\n");

    let source = MemorySource::new();

    // Prior-period invoice forming the opening balance
    source.insert(
        TransactionBuilder::new("acme", NaiveDate::from_ymd_opt(2023, 12, 10).unwrap())
            .debit(BigDecimal::from(1000))
            .reference("INV/2023/0042")
            .description("December invoice")
            .build()?,
    );

    // January activity
    source.insert(
        TransactionBuilder::new("acme", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
            .debit(BigDecimal::from(500))
            .reference("INV/2024/0003")
            .description("January invoice")
            .build()?,
    );
    source.insert(
        TransactionBuilder::new("acme", NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
            .credit(BigDecimal::from(200))
            .reference("PAY/2024/0001")
            .description("Part payment")
            .build()?,
    );

    let engine = ReportEngine::new(source);
    let statement = engine
        .entity_ledger(
            "acme",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .await?
        .expect("acme has activity");

    println!("Customer: {}", statement.entity_id);
    println!("Opening balance: {}\n", statement.opening_balance);

    println!(
        "{:<12} {:<16} {:>10} {:>10} {:>12}",
        "Date", "Reference", "Debit", "Credit", "Balance"
    );
    for entry in &statement.entries {
        let txn = &entry.transaction;
        println!(
            "{:<12} {:<16} {:>10} {:>10} {:>12}",
            txn.date.to_string(),
            txn.reference.as_deref().unwrap_or(""),
            txn.debit,
            txn.credit,
            entry.running_balance
        );
    }

    println!(
        "\nTotals: debit {} / credit {}",
        statement.total_debit, statement.total_credit
    );
    println!("Closing balance: {}", statement.closing_balance);

    Ok(())
}
