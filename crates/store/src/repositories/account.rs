//! Account repository: custodian of financial account rows.
//!
//! Accounts are created here and mutated only by journal posting. Lookup
//! of a missing or inactive account is a not-found, never a partial
//! result.

use chrono::Utc;
use haulpay_core::ledger::AccountType;
use haulpay_shared::types::{AccountId, Currency, OrganizationId};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::StoreError;
use crate::rows::AccountRow;
use crate::state::LedgerStore;

/// The per-currency platform singleton accounts.
#[derive(Debug, Clone, Copy)]
pub struct SystemAccounts {
    /// Service-fee revenue account.
    pub platform_revenue: AccountId,
    /// Escrow float account.
    pub escrow: AccountId,
    /// Payout clearing contra account.
    pub payout_clearing: AccountId,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    store: LedgerStore,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Gets an active account by ID.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account is missing or inactive.
    pub fn get(&self, id: AccountId) -> Result<AccountRow, StoreError> {
        self.store.read(|state| {
            state
                .accounts
                .get(&id)
                .filter(|a| a.is_active)
                .cloned()
                .ok_or(StoreError::AccountNotFound(id))
        })?
    }

    /// Finds an active account by (organization, type, currency).
    ///
    /// # Errors
    ///
    /// Returns `NoSuchAccount` if no matching active account exists.
    pub fn find(
        &self,
        organization_id: Option<OrganizationId>,
        account_type: AccountType,
        currency: Currency,
    ) -> Result<AccountRow, StoreError> {
        self.store.read(|state| {
            find_in(state, organization_id, account_type, currency).ok_or_else(|| {
                StoreError::NoSuchAccount {
                    organization: organization_id
                        .map_or_else(|| "platform".to_string(), |o| o.to_string()),
                    account_type: format!("{account_type:?}"),
                    currency,
                }
            })
        })?
    }

    /// Creates an account, idempotently per (organization, type, currency).
    ///
    /// Creating twice returns the existing row rather than duplicating.
    ///
    /// # Errors
    ///
    /// Returns an error if a wallet type has no organization or a
    /// singleton type has one.
    pub fn create(
        &self,
        organization_id: Option<OrganizationId>,
        account_type: AccountType,
        currency: Currency,
    ) -> Result<AccountRow, StoreError> {
        if account_type.is_wallet() && organization_id.is_none() {
            return Err(StoreError::WalletRequiresOrganization);
        }
        if !account_type.is_wallet() {
            if let Some(org) = organization_id {
                return Err(StoreError::SystemAccountHasOrganization(org));
            }
        }

        self.store.commit(|state| {
            // Idempotency re-checked inside the commit section.
            if let Some(existing) = find_in(state, organization_id, account_type, currency) {
                return Ok(existing);
            }

            let now = Utc::now();
            let row = AccountRow {
                id: AccountId::new(),
                organization_id,
                account_type,
                currency,
                balance: Decimal::ZERO,
                is_active: true,
                version: 0,
                created_at: now,
                updated_at: now,
            };
            debug!(account_id = %row.id, ?account_type, %currency, "account created");
            state.accounts.insert(row.id, row.clone());
            Ok(row)
        })
    }

    /// Creates the platform singleton accounts for a currency, idempotently.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn ensure_system_accounts(&self, currency: Currency) -> Result<SystemAccounts, StoreError> {
        let platform_revenue = self.create(None, AccountType::PlatformRevenue, currency)?.id;
        let escrow = self.create(None, AccountType::Escrow, currency)?.id;
        let payout_clearing = self.create(None, AccountType::PayoutClearing, currency)?.id;
        Ok(SystemAccounts {
            platform_revenue,
            escrow,
            payout_clearing,
        })
    }

    /// Deactivates an account; further postings and lookups fail.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account is missing or already
    /// inactive.
    pub fn deactivate(&self, id: AccountId) -> Result<(), StoreError> {
        self.store.commit(|state| {
            let account = state
                .accounts
                .get_mut(&id)
                .filter(|a| a.is_active)
                .ok_or(StoreError::AccountNotFound(id))?;
            account.is_active = false;
            account.version += 1;
            account.updated_at = Utc::now();
            Ok(())
        })
    }
}

pub(crate) fn find_in(
    state: &crate::state::StoreState,
    organization_id: Option<OrganizationId>,
    account_type: AccountType,
    currency: Currency,
) -> Option<AccountRow> {
    state
        .accounts
        .values()
        .find(|a| {
            a.is_active
                && a.organization_id == organization_id
                && a.account_type == account_type
                && a.currency == currency
        })
        .cloned()
}
