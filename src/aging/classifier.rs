//! Aging classifier: buckets outstanding amounts by age in days relative
//! to an as-of date and aggregates them per customer or vendor.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aging::BucketSchedule;
use crate::types::{ReportError, ReportResult, Transaction};

/// Aged outstanding totals for one entity.
///
/// `bucket_amounts` is aligned index-for-index with the schedule the
/// classifier was built with. Invariant: the bucket amounts sum exactly to
/// `total_outstanding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgingSummary {
    /// Customer or vendor these totals belong to
    pub entity_id: String,
    /// Sum of outstanding amounts across all buckets
    pub total_outstanding: BigDecimal,
    /// One amount per schedule bucket, in schedule order
    pub bucket_amounts: Vec<BigDecimal>,
}

impl AgingSummary {
    fn new(entity_id: String, bucket_count: usize) -> Self {
        Self {
            entity_id,
            total_outstanding: BigDecimal::from(0),
            bucket_amounts: vec![BigDecimal::from(0); bucket_count],
        }
    }
}

/// Aging classifier bound to a validated bucket schedule
#[derive(Debug, Clone)]
pub struct AgingClassifier {
    schedule: BucketSchedule,
}

impl AgingClassifier {
    /// Create a classifier over an already-validated schedule
    pub fn new(schedule: BucketSchedule) -> Self {
        Self { schedule }
    }

    /// The schedule this classifier buckets against
    pub fn schedule(&self) -> &BucketSchedule {
        &self.schedule
    }

    /// Classify outstanding lines by age and aggregate per entity.
    ///
    /// Each line's age is `(as_of_date - line.date)` in days, clamped at
    /// zero so lines dated after the as-of date count as current rather
    /// than inheriting the first bucket by comparison accident. The input
    /// needs no ordering: bucket placement is a pure function of the age
    /// and the schedule, so the per-line contributions commute.
    ///
    /// Entities with no outstanding lines never appear in the result.
    pub fn classify(
        &self,
        as_of_date: NaiveDate,
        transactions: &[Transaction],
    ) -> HashMap<String, AgingSummary> {
        let mut summaries: HashMap<String, AgingSummary> = HashMap::new();

        for transaction in transactions {
            let age_days = (as_of_date - transaction.date).num_days();
            let index = self.schedule.locate(age_days);

            let summary = summaries
                .entry(transaction.entity_id.clone())
                .or_insert_with(|| {
                    AgingSummary::new(transaction.entity_id.clone(), self.schedule.len())
                });

            summary.bucket_amounts[index] += &transaction.amount_residual;
            summary.total_outstanding += &transaction.amount_residual;
        }

        summaries
    }

    /// Merge per-entity summaries computed over a partitioned input.
    ///
    /// Bucket contributions are independent sums, so callers may split a
    /// large transaction set across workers, classify each part, and fold
    /// the partial maps back together here. All parts must come from a
    /// classifier with the same schedule width.
    pub fn merge(
        &self,
        mut left: HashMap<String, AgingSummary>,
        right: HashMap<String, AgingSummary>,
    ) -> ReportResult<HashMap<String, AgingSummary>> {
        for (entity_id, partial) in right {
            if partial.bucket_amounts.len() != self.schedule.len() {
                return Err(ReportError::Configuration(format!(
                    "Partial summary for '{}' has {} buckets, schedule has {}",
                    entity_id,
                    partial.bucket_amounts.len(),
                    self.schedule.len()
                )));
            }

            match left.entry(entity_id) {
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(partial);
                }
                std::collections::hash_map::Entry::Occupied(mut slot) => {
                    let summary = slot.get_mut();
                    for (total, amount) in summary
                        .bucket_amounts
                        .iter_mut()
                        .zip(partial.bucket_amounts)
                    {
                        *total += amount;
                    }
                    summary.total_outstanding += partial.total_outstanding;
                }
            }
        }

        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionBuilder;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn outstanding(entity: &str, d: NaiveDate, residual: i64) -> Transaction {
        TransactionBuilder::new(entity, d)
            .debit(BigDecimal::from(residual))
            .residual(BigDecimal::from(residual))
            .build()
            .unwrap()
    }

    #[test]
    fn test_recent_line_lands_in_first_bucket() {
        let classifier = AgingClassifier::new(BucketSchedule::six_bucket());
        let lines = vec![outstanding("cust1", date(2024, 6, 15), 100)];

        let result = classifier.classify(date(2024, 6, 30), &lines);
        let summary = &result["cust1"];

        assert_eq!(summary.bucket_amounts[0], BigDecimal::from(100));
        assert_eq!(summary.total_outstanding, BigDecimal::from(100));
    }

    #[test]
    fn test_future_dated_line_clamps_to_first_bucket() {
        // Lines posted after the as-of date have a negative age; they are
        // treated as age 0 rather than relying on `<= 30` catching them.
        let classifier = AgingClassifier::new(BucketSchedule::six_bucket());
        let lines = vec![
            outstanding("cust1", date(2024, 6, 20), 50),
            outstanding("cust1", date(2024, 7, 5), 30),
        ];

        let result = classifier.classify(date(2024, 6, 30), &lines);
        let summary = &result["cust1"];

        assert_eq!(summary.bucket_amounts[0], BigDecimal::from(80));
        assert_eq!(summary.total_outstanding, BigDecimal::from(80));
    }

    #[test]
    fn test_buckets_sum_to_total_outstanding() {
        let classifier = AgingClassifier::new(BucketSchedule::six_bucket());
        let as_of = date(2024, 6, 30);
        let lines = vec![
            outstanding("cust1", date(2024, 6, 25), 100),
            outstanding("cust1", date(2024, 5, 10), 250),
            outstanding("cust1", date(2024, 2, 1), 75),
            outstanding("cust1", date(2022, 3, 15), 40),
        ];

        let result = classifier.classify(as_of, &lines);
        let summary = &result["cust1"];

        let bucket_sum: BigDecimal = summary.bucket_amounts.iter().sum();
        assert_eq!(bucket_sum, summary.total_outstanding);
        assert_eq!(summary.total_outstanding, BigDecimal::from(465));
    }

    #[test]
    fn test_entities_are_aggregated_separately() {
        let classifier = AgingClassifier::new(BucketSchedule::four_bucket());
        let as_of = date(2024, 6, 30);
        let lines = vec![
            outstanding("cust1", date(2024, 6, 1), 100),
            outstanding("cust2", date(2024, 3, 1), 200),
        ];

        let result = classifier.classify(as_of, &lines);

        assert_eq!(result.len(), 2);
        assert_eq!(result["cust1"].bucket_amounts[0], BigDecimal::from(100));
        assert_eq!(result["cust2"].bucket_amounts[3], BigDecimal::from(200));
    }

    #[test]
    fn test_no_lines_means_no_entities() {
        let classifier = AgingClassifier::new(BucketSchedule::six_bucket());
        let result = classifier.classify(date(2024, 6, 30), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = AgingClassifier::new(BucketSchedule::six_bucket());
        let as_of = date(2024, 6, 30);
        let lines = vec![
            outstanding("cust1", date(2024, 6, 25), 100),
            outstanding("cust2", date(2024, 1, 10), 90),
        ];

        let first = classifier.classify(as_of, &lines);
        let second = classifier.classify(as_of, &lines);
        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_equals_single_pass() {
        let classifier = AgingClassifier::new(BucketSchedule::six_bucket());
        let as_of = date(2024, 6, 30);
        let lines = vec![
            outstanding("cust1", date(2024, 6, 25), 100),
            outstanding("cust1", date(2024, 2, 1), 75),
            outstanding("cust2", date(2024, 5, 10), 250),
            outstanding("cust2", date(2023, 1, 1), 60),
        ];

        let whole = classifier.classify(as_of, &lines);

        let left = classifier.classify(as_of, &lines[..2]);
        let right = classifier.classify(as_of, &lines[2..]);
        let merged = classifier.merge(left, right).unwrap();

        assert_eq!(whole, merged);
    }

    #[test]
    fn test_merge_rejects_mismatched_schedule_width() {
        let six = AgingClassifier::new(BucketSchedule::six_bucket());
        let four = AgingClassifier::new(BucketSchedule::four_bucket());
        let as_of = date(2024, 6, 30);
        let lines = vec![outstanding("cust1", date(2024, 6, 25), 100)];

        let narrow = four.classify(as_of, &lines);
        let result = six.merge(HashMap::new(), narrow);
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }
}
