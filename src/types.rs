//! Core types and data structures shared by the report computations

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A posted financial movement line as fetched from the storage collaborator.
///
/// Lines are read-only for the report algorithms: once fetched they are
/// never mutated or deleted by this crate. Typically exactly one of
/// `debit`/`credit` is non-zero, but both may coexist structurally; the
/// signed movement is always [`Transaction::balance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the line
    pub id: String,
    /// Date the line was posted
    pub date: NaiveDate,
    /// Owning customer or vendor
    pub entity_id: String,
    /// Debit amount (non-negative)
    pub debit: BigDecimal,
    /// Credit amount (non-negative)
    pub credit: BigDecimal,
    /// Outstanding/unpaid portion; meaningful for receivable/payable lines
    pub amount_residual: BigDecimal,
    /// Optional reference number (invoice number, journal entry name, etc.)
    pub reference: Option<String>,
    /// Free-text description
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction line
    pub fn new(
        id: String,
        date: NaiveDate,
        entity_id: String,
        debit: BigDecimal,
        credit: BigDecimal,
    ) -> Self {
        Self {
            id,
            date,
            entity_id,
            debit,
            credit,
            amount_residual: BigDecimal::from(0),
            reference: None,
            description: None,
        }
    }

    /// Signed movement of this line: `debit - credit`
    pub fn balance(&self) -> BigDecimal {
        &self.debit - &self.credit
    }
}

/// Builder for transaction lines, mainly used by tests and demos.
///
/// Generates a v4 UUID for the line id unless one is supplied.
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Start building a line for the given entity and date
    pub fn new(entity_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            transaction: Transaction::new(
                Uuid::new_v4().to_string(),
                date,
                entity_id.into(),
                BigDecimal::from(0),
                BigDecimal::from(0),
            ),
        }
    }

    /// Override the generated line id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.transaction.id = id.into();
        self
    }

    /// Set the debit amount
    pub fn debit(mut self, amount: BigDecimal) -> Self {
        self.transaction.debit = amount;
        self
    }

    /// Set the credit amount
    pub fn credit(mut self, amount: BigDecimal) -> Self {
        self.transaction.credit = amount;
        self
    }

    /// Set the outstanding portion of the line
    pub fn residual(mut self, amount: BigDecimal) -> Self {
        self.transaction.amount_residual = amount;
        self
    }

    /// Set the reference
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction.reference = Some(reference.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.transaction.description = Some(description.into());
        self
    }

    /// Validate and build the line
    pub fn build(self) -> ReportResult<Transaction> {
        if self.transaction.debit < BigDecimal::from(0) {
            return Err(ReportError::Validation(
                "Debit amount cannot be negative".to_string(),
            ));
        }
        if self.transaction.credit < BigDecimal::from(0) {
            return Err(ReportError::Validation(
                "Credit amount cannot be negative".to_string(),
            ));
        }
        Ok(self.transaction)
    }
}

/// Errors surfaced by the report computations.
///
/// Every variant is a synchronous validation failure raised before any
/// accumulation work begins; there is no partial-success mode and no
/// local recovery.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Reporting period with `date_from` after `date_to`; never silently swapped
    #[error("Invalid period: {date_from} is after {date_to}")]
    InvalidRange {
        date_from: NaiveDate,
        date_to: NaiveDate,
    },
    /// Bucket schedule is not contiguous, non-overlapping, and exhaustive
    #[error("Invalid bucket configuration: {0}")]
    Configuration(String),
    /// The supplied sequence violated the non-decreasing date contract.
    /// Signals an upstream bug; the accumulator never re-sorts to hide it.
    #[error("Transaction {id} dated {date} follows a line dated {previous}")]
    OutOfOrderInput {
        id: String,
        date: NaiveDate,
        previous: NaiveDate,
    },
    /// The source declared it cannot supply a field the operation needs
    #[error("Source does not supply required field: {0}")]
    MissingCapability(&'static str),
    /// Error reported by the storage collaborator
    #[error("Source error: {0}")]
    Source(String),
    /// General input validation failure
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
