//! Statement building and balance reconciliation.

use chrono::{DateTime, Utc};
use haulpay_shared::error::AppError;
use haulpay_shared::types::JournalEntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::types::{EntrySide, TransactionType, signed_amount};

/// A journal line as posted against one account, with entry metadata.
///
/// Lines must be supplied in entry creation order (UUID v7 entry ids are
/// time-ordered, so ordering by entry id is equivalent).
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// The entry's transaction type.
    pub transaction_type: TransactionType,
    /// The entry's description.
    pub description: String,
    /// The entry's idempotency reference.
    pub reference: String,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
    /// Line side.
    pub side: EntrySide,
    /// Line amount (positive).
    pub amount: Decimal,
}

/// One row of an account statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The entry this record derives from.
    pub entry_id: JournalEntryId,
    /// The entry's transaction type.
    pub transaction_type: TransactionType,
    /// The entry's description.
    pub description: String,
    /// The entry's idempotency reference.
    pub reference: String,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
    /// Signed amount applied to the account (credit positive).
    pub signed_amount: Decimal,
    /// Account balance after this line.
    pub running_balance: Decimal,
}

/// Reconciliation failures.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// The stored balance does not match the replayed journal.
    #[error("Balance drift: stored {stored}, derived {derived}")]
    Drift {
        /// The materialized balance on the account row.
        stored: Decimal,
        /// The balance derived from journal lines.
        derived: Decimal,
    },
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        // Drift means the store broke its own invariant.
        Self::Internal(err.to_string())
    }
}

/// Builds an account statement with running balances from ordered lines.
#[must_use]
pub fn build_statement(lines: &[PostedLine]) -> Vec<TransactionRecord> {
    let mut running = Decimal::ZERO;
    lines
        .iter()
        .map(|line| {
            let signed = signed_amount(line.side, line.amount);
            running += signed;
            TransactionRecord {
                entry_id: line.entry_id,
                transaction_type: line.transaction_type,
                description: line.description.clone(),
                reference: line.reference.clone(),
                posted_at: line.posted_at,
                signed_amount: signed,
                running_balance: running,
            }
        })
        .collect()
}

/// Verifies the stored balance equals the sum of signed line amounts.
///
/// # Errors
///
/// Returns `Drift` with both values on mismatch.
pub fn reconcile(stored_balance: Decimal, lines: &[PostedLine]) -> Result<(), ReconciliationError> {
    let derived: Decimal = lines
        .iter()
        .map(|line| signed_amount(line.side, line.amount))
        .sum();

    if derived == stored_balance {
        Ok(())
    } else {
        Err(ReconciliationError::Drift {
            stored: stored_balance,
            derived,
        })
    }
}
