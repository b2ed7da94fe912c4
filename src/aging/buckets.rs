//! Aging bucket schedules
//!
//! A schedule is an ordered set of day-range buckets covering `[0, +inf)`.
//! The two schedules used across the report suite are provided as
//! constructors; arbitrary schedules are accepted as long as they are
//! contiguous, non-overlapping, and exhaustive.

use serde::{Deserialize, Serialize};

use crate::types::{ReportError, ReportResult};

/// One day-range classification, bounds inclusive.
///
/// `upper_bound_days` of `None` marks the open-ended final bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    /// Display label, e.g. "0-30" or "365+"
    pub label: String,
    /// Inclusive lower bound in days
    pub lower_bound_days: i64,
    /// Inclusive upper bound in days; `None` for the unbounded last bucket
    pub upper_bound_days: Option<i64>,
}

impl AgingBucket {
    /// Bounded bucket covering `lower..=upper` days
    pub fn bounded(label: impl Into<String>, lower: i64, upper: i64) -> Self {
        Self {
            label: label.into(),
            lower_bound_days: lower,
            upper_bound_days: Some(upper),
        }
    }

    /// Open-ended bucket covering `lower..` days
    pub fn open_ended(label: impl Into<String>, lower: i64) -> Self {
        Self {
            label: label.into(),
            lower_bound_days: lower,
            upper_bound_days: None,
        }
    }
}

/// Validated, ordered bucket schedule.
///
/// Validation happens here, at construction, so a bad configuration fails
/// before any classification is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSchedule {
    buckets: Vec<AgingBucket>,
}

impl BucketSchedule {
    /// Build a schedule, verifying contiguity and exhaustiveness over `[0, +inf)`
    pub fn new(buckets: Vec<AgingBucket>) -> ReportResult<Self> {
        if buckets.is_empty() {
            return Err(ReportError::Configuration(
                "Schedule must contain at least one bucket".to_string(),
            ));
        }

        if buckets[0].lower_bound_days != 0 {
            return Err(ReportError::Configuration(format!(
                "First bucket must start at day 0, got {}",
                buckets[0].lower_bound_days
            )));
        }

        for (i, bucket) in buckets.iter().enumerate() {
            let is_last = i == buckets.len() - 1;
            match bucket.upper_bound_days {
                None if !is_last => {
                    return Err(ReportError::Configuration(format!(
                        "Bucket '{}' is open-ended but not last",
                        bucket.label
                    )));
                }
                Some(upper) if is_last => {
                    return Err(ReportError::Configuration(format!(
                        "Last bucket '{}' must be open-ended, got upper bound {}",
                        bucket.label, upper
                    )));
                }
                Some(upper) => {
                    if upper < bucket.lower_bound_days {
                        return Err(ReportError::Configuration(format!(
                            "Bucket '{}' has upper bound {} below lower bound {}",
                            bucket.label, upper, bucket.lower_bound_days
                        )));
                    }
                    // Inclusive bounds, so the next bucket must start at upper + 1
                    let next = &buckets[i + 1];
                    if next.lower_bound_days != upper + 1 {
                        return Err(ReportError::Configuration(format!(
                            "Gap or overlap between '{}' (ends {}) and '{}' (starts {})",
                            bucket.label, upper, next.label, next.lower_bound_days
                        )));
                    }
                }
                None => {}
            }
        }

        Ok(Self { buckets })
    }

    /// Standard 6-bucket schedule used by the customer/vendor aging reports
    pub fn six_bucket() -> Self {
        Self {
            buckets: vec![
                AgingBucket::bounded("0-30", 0, 30),
                AgingBucket::bounded("31-60", 31, 60),
                AgingBucket::bounded("61-90", 61, 90),
                AgingBucket::bounded("91-180", 91, 180),
                AgingBucket::bounded("181-365", 181, 365),
                AgingBucket::open_ended("365+", 366),
            ],
        }
    }

    /// Coarser 4-bucket schedule used by the outstanding-partner reports
    pub fn four_bucket() -> Self {
        Self {
            buckets: vec![
                AgingBucket::bounded("0-30", 0, 30),
                AgingBucket::bounded("31-60", 31, 60),
                AgingBucket::bounded("61-90", 61, 90),
                AgingBucket::open_ended("90+", 91),
            ],
        }
    }

    /// Index of the bucket containing `age_days`.
    ///
    /// Negative ages (lines dated after the as-of date) clamp to day 0 and
    /// land in the first bucket. A pure function of the age and the
    /// schedule, so classification order never affects placement.
    pub fn locate(&self, age_days: i64) -> usize {
        let age_days = age_days.max(0);
        for (i, bucket) in self.buckets.iter().enumerate() {
            match bucket.upper_bound_days {
                Some(upper) if age_days <= upper => return i,
                None => return i,
                _ => {}
            }
        }
        // Unreachable: validation guarantees an open-ended last bucket
        self.buckets.len() - 1
    }

    /// Number of buckets in the schedule
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the schedule is empty (never true for a validated schedule)
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The buckets in order
    pub fn buckets(&self) -> &[AgingBucket] {
        &self.buckets
    }

    /// Bucket labels in order, for report headers
    pub fn labels(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_bucket_schedule_is_valid() {
        let schedule = BucketSchedule::six_bucket();
        assert_eq!(schedule.len(), 6);
        assert_eq!(
            schedule.labels(),
            vec!["0-30", "31-60", "61-90", "91-180", "181-365", "365+"]
        );
        // Round-trip through the validating constructor
        assert!(BucketSchedule::new(schedule.buckets().to_vec()).is_ok());
    }

    #[test]
    fn test_four_bucket_schedule_is_valid() {
        let schedule = BucketSchedule::four_bucket();
        assert_eq!(schedule.labels(), vec!["0-30", "31-60", "61-90", "90+"]);
        assert!(BucketSchedule::new(schedule.buckets().to_vec()).is_ok());
    }

    #[test]
    fn test_gap_in_schedule_is_rejected() {
        let result = BucketSchedule::new(vec![
            AgingBucket::bounded("0-30", 0, 30),
            AgingBucket::bounded("31-60", 31, 60),
            AgingBucket::open_ended("90+", 90),
        ]);
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn test_overlap_in_schedule_is_rejected() {
        let result = BucketSchedule::new(vec![
            AgingBucket::bounded("0-30", 0, 30),
            AgingBucket::open_ended("30+", 30),
        ]);
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn test_schedule_not_starting_at_zero_is_rejected() {
        let result = BucketSchedule::new(vec![
            AgingBucket::bounded("1-30", 1, 30),
            AgingBucket::open_ended("30+", 31),
        ]);
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn test_bounded_last_bucket_is_rejected() {
        let result = BucketSchedule::new(vec![
            AgingBucket::bounded("0-30", 0, 30),
            AgingBucket::bounded("31-60", 31, 60),
        ]);
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn test_locate_boundaries() {
        let schedule = BucketSchedule::six_bucket();
        assert_eq!(schedule.locate(0), 0);
        assert_eq!(schedule.locate(30), 0);
        assert_eq!(schedule.locate(31), 1);
        assert_eq!(schedule.locate(90), 2);
        assert_eq!(schedule.locate(91), 3);
        assert_eq!(schedule.locate(180), 3);
        assert_eq!(schedule.locate(365), 4);
        assert_eq!(schedule.locate(366), 5);
        assert_eq!(schedule.locate(10_000), 5);
    }

    #[test]
    fn test_locate_clamps_negative_ages() {
        // Future-dated lines count as age 0 instead of inheriting the
        // first bucket by accident of comparison direction.
        let schedule = BucketSchedule::six_bucket();
        assert_eq!(schedule.locate(-5), 0);
    }

    #[test]
    fn test_every_age_lands_in_exactly_one_bucket() {
        let schedule = BucketSchedule::four_bucket();
        for age in 0..400 {
            let index = schedule.locate(age);
            let bucket = &schedule.buckets()[index];
            assert!(age >= bucket.lower_bound_days);
            if let Some(upper) = bucket.upper_bound_days {
                assert!(age <= upper);
            }
        }
    }
}
