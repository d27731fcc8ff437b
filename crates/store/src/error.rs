//! Error types for store operations.

use haulpay_core::ledger::LedgerError;
use haulpay_core::withdrawal::WithdrawalError;
use haulpay_shared::error::AppError;
use haulpay_shared::types::{AccountId, Currency, LoadId, OrganizationId, WithdrawalRequestId};
use thiserror::Error;

/// Errors that can occur in the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Account does not exist or is inactive.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// No account matches the (organization, type, currency) lookup.
    #[error("No {account_type} account for organization {organization} in {currency}")]
    NoSuchAccount {
        /// The organization searched for, if any.
        organization: String,
        /// The account type searched for.
        account_type: String,
        /// The currency searched for.
        currency: Currency,
    },

    /// Wallet account types require an owning organization.
    #[error("Wallet accounts require an organization")]
    WalletRequiresOrganization,

    /// Platform singleton account types must not carry an organization.
    #[error("System accounts must not belong to an organization")]
    SystemAccountHasOrganization(OrganizationId),

    /// Withdrawal request not found.
    #[error("Withdrawal request {0} not found")]
    WithdrawalNotFound(WithdrawalRequestId),

    /// Load not found.
    #[error("Load {0} not found")]
    LoadNotFound(LoadId),

    /// Load is not eligible for settlement (POD not verified).
    #[error("Load {0} is not eligible for settlement")]
    LoadNotSettleable(LoadId),

    /// Entry lines span accounts in different currencies.
    #[error("Entry mixes currencies {first} and {second}")]
    CurrencyMismatch {
        /// Currency of the first account seen.
        first: Currency,
        /// The conflicting currency.
        second: Currency,
    },

    /// Ledger rule violation while posting.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Withdrawal workflow violation.
    #[error(transparent)]
    Withdrawal(#[from] WithdrawalError),

    /// The store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound(_)
            | StoreError::NoSuchAccount { .. }
            | StoreError::WithdrawalNotFound(_)
            | StoreError::LoadNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::WalletRequiresOrganization
            | StoreError::SystemAccountHasOrganization(_)
            | StoreError::LoadNotSettleable(_)
            | StoreError::CurrencyMismatch { .. } => Self::Validation(err.to_string()),
            StoreError::Ledger(inner) => inner.into(),
            StoreError::Withdrawal(inner) => inner.into(),
            StoreError::LockPoisoned => Self::Internal(err.to_string()),
        }
    }
}
