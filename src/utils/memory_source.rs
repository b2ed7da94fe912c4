//! In-memory transaction source for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::traits::{SourceCapabilities, TransactionFilter, TransactionSource};
use crate::types::{ReportResult, Transaction};

/// In-memory [`TransactionSource`] for tests and demos.
///
/// Fetches are sorted by `(date, id)` before being returned, honoring the
/// ordering contract real backends satisfy with an `ORDER BY` clause.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Arc<RwLock<Vec<Transaction>>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a posted line
    pub fn insert(&self, transaction: Transaction) {
        self.lines.write().unwrap().push(transaction);
    }

    /// Add many posted lines
    pub fn insert_all(&self, transactions: impl IntoIterator<Item = Transaction>) {
        self.lines.write().unwrap().extend(transactions);
    }

    /// Remove all lines
    pub fn clear(&self) {
        self.lines.write().unwrap().clear();
    }

    fn matches(filter: &TransactionFilter, transaction: &Transaction) -> bool {
        if let Some(entity_id) = &filter.entity_id {
            if &transaction.entity_id != entity_id {
                return false;
            }
        }
        if let Some(before) = filter.date_before {
            if transaction.date >= before {
                return false;
            }
        }
        if let Some(from) = filter.date_from {
            if transaction.date < from {
                return false;
            }
        }
        if let Some(to) = filter.date_to {
            if transaction.date > to {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn fetch_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> ReportResult<Vec<Transaction>> {
        let lines = self.lines.read().unwrap();
        let mut matched: Vec<Transaction> = lines
            .iter()
            .filter(|t| Self::matches(filter, t))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(matched)
    }

    async fn fetch_outstanding(
        &self,
        as_of_date: NaiveDate,
        entity_id: Option<&str>,
    ) -> ReportResult<Vec<Transaction>> {
        let zero = BigDecimal::from(0);
        let lines = self.lines.read().unwrap();
        let mut matched: Vec<Transaction> = lines
            .iter()
            .filter(|t| {
                t.date <= as_of_date
                    && t.amount_residual != zero
                    && entity_id.is_none_or(|e| t.entity_id == e)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(matched)
    }

    async fn list_entities(&self) -> ReportResult<Vec<String>> {
        let lines = self.lines.read().unwrap();
        let entities: BTreeSet<String> = lines.iter().map(|t| t.entity_id.clone()).collect();
        Ok(entities.into_iter().collect())
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities {
            amount_residual: true,
            reference: true,
        }
    }
}
