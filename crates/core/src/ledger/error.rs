//! Error types for ledger operations.

use haulpay_shared::error::AppError;
use haulpay_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::TransactionType;

/// Errors that can occur while validating or posting a journal entry.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry has fewer than two lines.
    #[error("Entry must have at least two lines")]
    InsufficientLines,

    /// Line amount is zero.
    #[error("Line amount must be positive")]
    ZeroAmount,

    /// Line amount is negative.
    #[error("Line amount must be positive")]
    NegativeAmount,

    /// Entry has only debit lines or only credit lines.
    #[error("Entry must have both debit and credit lines")]
    SingleSided,

    /// Entry does not balance.
    #[error("Entry is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Referenced account does not exist or is inactive.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Posting would drive a wallet account negative.
    #[error("Insufficient funds in account {account_id}: balance {balance}, change {change}")]
    InsufficientFunds {
        /// The wallet account that would overdraw.
        account_id: AccountId,
        /// The balance before the entry.
        balance: Decimal,
        /// The signed change the entry would apply.
        change: Decimal,
    },

    /// An entry with the same (type, reference) already exists.
    #[error("Duplicate reference {reference} for {transaction_type} entry")]
    DuplicateReference {
        /// The transaction type.
        transaction_type: TransactionType,
        /// The idempotency reference.
        reference: String,
    },
}

impl LedgerError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::SingleSided => "SINGLE_SIDED",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::DuplicateReference { .. } => "DUPLICATE_REFERENCE",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::InsufficientFunds { .. } => Self::InsufficientFunds(err.to_string()),
            LedgerError::DuplicateReference { .. } => Self::Conflict(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
