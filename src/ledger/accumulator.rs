//! Ledger accumulator: opening balance plus an ordered transaction stream
//! in, per-line running balances and period totals out.
//!
//! This is the single consolidated implementation behind customer ledger,
//! vendor ledger, general ledger, and opening/closing balance reports.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{ReportError, ReportResult, Transaction};

/// One ledger row: the transaction together with the balance after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The underlying movement line
    pub transaction: Transaction,
    /// Cumulative signed balance after this line
    pub running_balance: BigDecimal,
}

/// Running-balance ledger for one entity over one period.
///
/// Invariant: `closing_balance == opening_balance + total_debit - total_credit`,
/// and each entry's `running_balance` is the opening balance plus the signed
/// movements of all entries up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStatement {
    /// Customer or vendor this statement belongs to
    pub entity_id: String,
    /// Balance immediately before the period
    pub opening_balance: BigDecimal,
    /// Period lines in supplied order, each with its running balance
    pub entries: Vec<LedgerEntry>,
    /// Balance after the last period line
    pub closing_balance: BigDecimal,
    /// Sum of debits over the period
    pub total_debit: BigDecimal,
    /// Sum of credits over the period
    pub total_credit: BigDecimal,
}

/// Accumulate an ordered transaction stream into a ledger statement.
///
/// `transactions` must be in non-decreasing date order; date ties keep the
/// supplied order (the source orders ties by line id). An out-of-order date
/// fails with [`ReportError::OutOfOrderInput`] rather than re-sorting, since
/// a silent sort could mask upstream data-integrity bugs. The ordering check
/// runs over the whole stream before any balance is accumulated, so a failed
/// call never produces a partial statement.
///
/// Returns `None` when there are no transactions and the opening balance is
/// zero: entities with no activity are skipped, not reported as all-zero rows.
///
/// Summation proceeds strictly in the supplied order with `BigDecimal`
/// arithmetic, so repeated calls over identical input are bit-identical.
pub fn accumulate(
    entity_id: impl Into<String>,
    opening_balance: BigDecimal,
    transactions: Vec<Transaction>,
) -> ReportResult<Option<LedgerStatement>> {
    check_order(&transactions)?;

    if transactions.is_empty() && opening_balance == BigDecimal::from(0) {
        return Ok(None);
    }

    let mut balance = opening_balance.clone();
    let mut total_debit = BigDecimal::from(0);
    let mut total_credit = BigDecimal::from(0);
    let mut entries = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        balance += transaction.balance();
        total_debit += &transaction.debit;
        total_credit += &transaction.credit;
        entries.push(LedgerEntry {
            transaction,
            running_balance: balance.clone(),
        });
    }

    Ok(Some(LedgerStatement {
        entity_id: entity_id.into(),
        opening_balance,
        entries,
        closing_balance: balance,
        total_debit,
        total_credit,
    }))
}

/// Net signed movement of an ordered transaction stream.
///
/// This is the degenerate accumulator run used to derive an opening balance:
/// the closing balance of all lines strictly before the period, starting
/// from zero. The same ordering contract as [`accumulate`] applies.
pub fn net_movement(transactions: &[Transaction]) -> ReportResult<BigDecimal> {
    check_order(transactions)?;

    let mut balance = BigDecimal::from(0);
    for transaction in transactions {
        balance += transaction.balance();
    }
    Ok(balance)
}

fn check_order(transactions: &[Transaction]) -> ReportResult<()> {
    for pair in transactions.windows(2) {
        if pair[1].date < pair[0].date {
            return Err(ReportError::OutOfOrderInput {
                id: pair[1].id.clone(),
                date: pair[1].date,
                previous: pair[0].date,
            });
        }
    }
    Ok(())
}
