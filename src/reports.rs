//! Report engine: thin orchestration over a transaction source and the
//! ledger/aging algorithms.
//!
//! Each report that used to carry its own copy of the accumulation loop
//! becomes one call here: customer ledger and vendor ledger are
//! [`ReportEngine::entity_ledger`] with different source filters, the
//! aging reports are [`ReportEngine::aging_report`] with different bucket
//! schedules.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::aging::{AgingClassifier, AgingSummary, BucketSchedule};
use crate::ledger::{accumulate, net_movement, LedgerStatement};
use crate::traits::{
    NoopObserver, ReportEvent, ReportObserver, TransactionFilter, TransactionSource,
};
use crate::types::ReportResult;
use crate::utils::validate_period;

/// Report computation engine over a transaction source
pub struct ReportEngine<S: TransactionSource> {
    source: S,
    observer: Box<dyn ReportObserver>,
}

impl<S: TransactionSource> ReportEngine<S> {
    /// Create an engine that discards observability events
    pub fn new(source: S) -> Self {
        Self {
            source,
            observer: Box::new(NoopObserver),
        }
    }

    /// Create an engine with an injected event sink
    pub fn with_observer(source: S, observer: Box<dyn ReportObserver>) -> Self {
        Self { source, observer }
    }

    /// Running-balance ledger for one entity over a period.
    ///
    /// The opening balance is the net movement of every posted line
    /// strictly before `date_from`. Returns `None` for entities with no
    /// period activity and a zero opening balance.
    pub async fn entity_ledger(
        &self,
        entity_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> ReportResult<Option<LedgerStatement>> {
        validate_period(date_from, date_to)?;

        let prior = self
            .source
            .fetch_transactions(&TransactionFilter::before(entity_id, date_from))
            .await?;
        let opening_balance = net_movement(&prior)?;

        let period = self
            .source
            .fetch_transactions(&TransactionFilter::period(entity_id, date_from, date_to))
            .await?;

        let statement = accumulate(entity_id, opening_balance, period)?;
        match &statement {
            Some(statement) => self.observer.record(ReportEvent::LedgerComputed {
                entity_id,
                entry_count: statement.entries.len(),
            }),
            None => self
                .observer
                .record(ReportEvent::EntitySkipped { entity_id }),
        }

        Ok(statement)
    }

    /// Ledger statements for every entity with activity or an opening
    /// balance, ordered by entity id.
    ///
    /// Each entity's accumulation is independent of the others, so callers
    /// with very large entity sets may instead spawn one
    /// [`ReportEngine::entity_ledger`] task per entity and collect.
    pub async fn ledger_report(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> ReportResult<Vec<LedgerStatement>> {
        validate_period(date_from, date_to)?;

        let mut statements = Vec::new();
        for entity_id in self.source.list_entities().await? {
            if let Some(statement) = self.entity_ledger(&entity_id, date_from, date_to).await? {
                statements.push(statement);
            }
        }
        Ok(statements)
    }

    /// Opening balance for one entity: the closing balance of everything
    /// posted strictly before `date_from`.
    pub async fn opening_balance(
        &self,
        entity_id: &str,
        date_from: NaiveDate,
    ) -> ReportResult<BigDecimal> {
        let prior = self
            .source
            .fetch_transactions(&TransactionFilter::before(entity_id, date_from))
            .await?;
        net_movement(&prior)
    }

    /// Aged outstanding amounts per entity as of a date.
    ///
    /// Requires the source to declare the `amount_residual` capability;
    /// without it the outstanding amounts would silently read as zero.
    pub async fn aging_report(
        &self,
        as_of_date: NaiveDate,
        schedule: BucketSchedule,
    ) -> ReportResult<HashMap<String, AgingSummary>> {
        if !self.source.capabilities().amount_residual {
            return Err(crate::types::ReportError::MissingCapability(
                "amount_residual",
            ));
        }

        let outstanding = self.source.fetch_outstanding(as_of_date, None).await?;
        let classifier = AgingClassifier::new(schedule);
        let summaries = classifier.classify(as_of_date, &outstanding);

        self.observer.record(ReportEvent::AgingComputed {
            as_of_date,
            entity_count: summaries.len(),
        });

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReportError, TransactionBuilder};
    use crate::utils::MemorySource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_source() -> MemorySource {
        let source = MemorySource::new();
        // Prior-period activity for cust1
        source.insert(
            TransactionBuilder::new("cust1", date(2023, 12, 10))
                .debit(BigDecimal::from(1000))
                .build()
                .unwrap(),
        );
        // Period activity
        source.insert(
            TransactionBuilder::new("cust1", date(2024, 1, 5))
                .debit(BigDecimal::from(500))
                .build()
                .unwrap(),
        );
        source.insert(
            TransactionBuilder::new("cust1", date(2024, 1, 10))
                .credit(BigDecimal::from(200))
                .build()
                .unwrap(),
        );
        source
    }

    #[tokio::test]
    async fn test_entity_ledger_derives_opening_balance() {
        let engine = ReportEngine::new(seeded_source());

        let statement = engine
            .entity_ledger("cust1", date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(statement.opening_balance, BigDecimal::from(1000));
        assert_eq!(statement.entries.len(), 2);
        assert_eq!(statement.closing_balance, BigDecimal::from(1300));
    }

    #[tokio::test]
    async fn test_inverted_period_fails_before_fetch() {
        let engine = ReportEngine::new(seeded_source());

        let result = engine
            .entity_ledger("cust1", date(2024, 3, 1), date(2024, 1, 1))
            .await;
        assert!(matches!(result, Err(ReportError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn test_entity_with_no_activity_is_skipped() {
        let engine = ReportEngine::new(seeded_source());

        let statement = engine
            .entity_ledger("ghost", date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert!(statement.is_none());
    }

    #[tokio::test]
    async fn test_ledger_report_covers_active_entities_in_order() {
        let source = seeded_source();
        source.insert(
            TransactionBuilder::new("cust0", date(2024, 1, 20))
                .debit(BigDecimal::from(50))
                .build()
                .unwrap(),
        );
        let engine = ReportEngine::new(source);

        let statements = engine
            .ledger_report(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        let entities: Vec<&str> = statements.iter().map(|s| s.entity_id.as_str()).collect();
        assert_eq!(entities, vec!["cust0", "cust1"]);
    }

    #[tokio::test]
    async fn test_aging_report_buckets_outstanding() {
        let source = MemorySource::new();
        source.insert(
            TransactionBuilder::new("cust1", date(2024, 6, 15))
                .debit(BigDecimal::from(100))
                .residual(BigDecimal::from(100))
                .build()
                .unwrap(),
        );
        source.insert(
            TransactionBuilder::new("cust1", date(2024, 2, 1))
                .debit(BigDecimal::from(300))
                .residual(BigDecimal::from(300))
                .build()
                .unwrap(),
        );
        let engine = ReportEngine::new(source);

        let summaries = engine
            .aging_report(date(2024, 6, 30), BucketSchedule::six_bucket())
            .await
            .unwrap();

        let summary = &summaries["cust1"];
        assert_eq!(summary.bucket_amounts[0], BigDecimal::from(100));
        assert_eq!(summary.bucket_amounts[3], BigDecimal::from(300));
        assert_eq!(summary.total_outstanding, BigDecimal::from(400));
    }

    #[tokio::test]
    async fn test_opening_balance_matches_prior_closing() {
        let engine = ReportEngine::new(seeded_source());

        let opening = engine
            .opening_balance("cust1", date(2024, 1, 1))
            .await
            .unwrap();
        assert_eq!(opening, BigDecimal::from(1000));
    }
}
