//! Traits for the storage and observability boundaries

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ReportResult, Transaction};

/// Filter handed to the storage collaborator when fetching lines.
///
/// All bounds are optional and inclusive except `date_before`, which is
/// strictly exclusive and exists for opening-balance queries ("everything
/// strictly before the period").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Restrict to one entity; `None` means all entities
    pub entity_id: Option<String>,
    /// Lines dated strictly before this date
    pub date_before: Option<NaiveDate>,
    /// Lines dated on or after this date
    pub date_from: Option<NaiveDate>,
    /// Lines dated on or before this date
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Lines for one entity within an inclusive period
    pub fn period(entity_id: impl Into<String>, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            date_before: None,
            date_from: Some(date_from),
            date_to: Some(date_to),
        }
    }

    /// Lines for one entity strictly before a date, for opening balances
    pub fn before(entity_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            date_before: Some(date),
            date_from: None,
            date_to: None,
        }
    }
}

/// Optional fields a source can supply, declared up front.
///
/// This replaces runtime attribute probing: an operation that needs an
/// optional field checks the declared capabilities and fails with
/// `MissingCapability` instead of speculating about what the backend has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCapabilities {
    /// Source populates `amount_residual` on receivable/payable lines
    pub amount_residual: bool,
    /// Source populates `reference` on lines
    pub reference: bool,
}

/// Storage abstraction supplying posted transaction lines.
///
/// Implementations must return only posted/finalized lines, ordered by
/// date and then by line id; the report algorithms rely on that contract
/// and reject out-of-order input rather than re-sorting it.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch lines matching the filter, ordered by `(date, id)`
    async fn fetch_transactions(&self, filter: &TransactionFilter)
        -> ReportResult<Vec<Transaction>>;

    /// Fetch lines with a non-zero outstanding amount as of a date,
    /// optionally restricted to one entity
    async fn fetch_outstanding(
        &self,
        as_of_date: NaiveDate,
        entity_id: Option<&str>,
    ) -> ReportResult<Vec<Transaction>>;

    /// All entity ids known to the source, sorted
    async fn list_entities(&self) -> ReportResult<Vec<String>>;

    /// Optional fields this source can supply
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::default()
    }
}

/// Structured events emitted while computing reports
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent<'a> {
    /// A ledger statement was produced for an entity
    LedgerComputed {
        entity_id: &'a str,
        entry_count: usize,
    },
    /// An entity was skipped for having no activity and no opening balance
    EntitySkipped { entity_id: &'a str },
    /// An aging run completed
    AgingComputed {
        as_of_date: NaiveDate,
        entity_count: usize,
    },
}

/// Observability boundary for report computation.
///
/// The engine reports progress through this injected interface instead of
/// writing to any process-wide log; callers plug in whatever sink their
/// orchestration layer uses.
pub trait ReportObserver: Send + Sync {
    /// Record one event
    fn record(&self, event: ReportEvent<'_>);
}

/// Observer that discards all events; the default
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ReportObserver for NoopObserver {
    fn record(&self, _event: ReportEvent<'_>) {}
}
