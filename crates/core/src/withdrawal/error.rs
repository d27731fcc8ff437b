//! Withdrawal workflow error types.

use haulpay_shared::error::AppError;
use haulpay_shared::types::WithdrawalRequestId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::WithdrawalStatus;

/// Errors that can occur during withdrawal operations.
#[derive(Debug, Error)]
pub enum WithdrawalError {
    /// The request was already decided by a concurrent caller.
    #[error("Request already decided, status is {0}")]
    AlreadyDecided(WithdrawalStatus),

    /// A rejection requires a reason.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Requested amount must be positive.
    #[error("Withdrawal amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Withdrawal request not found.
    #[error("Withdrawal request {0} not found")]
    NotFound(WithdrawalRequestId),
}

impl WithdrawalError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyDecided(_) => "ALREADY_DECIDED",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::NotFound(_) => "WITHDRAWAL_NOT_FOUND",
        }
    }
}

impl From<WithdrawalError> for AppError {
    fn from(err: WithdrawalError) -> Self {
        match err {
            WithdrawalError::AlreadyDecided(_) => Self::Conflict(err.to_string()),
            WithdrawalError::NotFound(_) => Self::NotFound(err.to_string()),
            WithdrawalError::RejectionReasonRequired | WithdrawalError::NonPositiveAmount(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}
