//! # Report Core
//!
//! A report computation library consolidating the two algorithms that
//! recur across vendor/customer ledger, aging, and outstanding reports:
//! running-balance ledger accumulation and aging-bucket classification.
//!
//! ## Features
//!
//! - **Ledger accumulation**: opening balance plus an ordered transaction
//!   stream in, per-line running balances and period totals out
//! - **Aging classification**: configurable day-range bucket schedules
//!   (standard 6-bucket and 4-bucket variants included) with per-entity
//!   outstanding totals and mergeable partial results
//! - **TDS calculations**: section-master driven withholding computation
//! - **Storage abstraction**: backend-agnostic `TransactionSource` trait
//!   with explicit capability declaration for optional fields
//! - **Observability boundary**: structured events through an injected
//!   `ReportObserver`, no process-wide logging
//!
//! ## Quick Start
//!
//! ```rust
//! use report_core::{accumulate, TransactionBuilder};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let lines = vec![
//!     TransactionBuilder::new("cust1", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
//!         .debit(BigDecimal::from(500))
//!         .build()
//!         .unwrap(),
//! ];
//! let statement = accumulate("cust1", BigDecimal::from(1000), lines)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(statement.closing_balance, BigDecimal::from(1500));
//! ```

pub mod aging;
pub mod ledger;
pub mod reports;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use aging::*;
pub use ledger::*;
pub use reports::*;
pub use tax::tds::*;
pub use traits::*;
pub use types::*;
