//! Ledger service: posting, balances, statements, reconciliation.

use haulpay_core::ledger::EntryInput;
use haulpay_core::reconciliation::{build_statement, reconcile, TransactionRecord};
use haulpay_shared::error::AppResult;
use haulpay_shared::types::AccountId;
use haulpay_store::{AccountRepository, JournalRepository, LedgerStore, LineFilter, PostedEntry};
use rust_decimal::Decimal;
use tracing::error;

/// Read-and-post facade over the account and journal repositories.
#[derive(Debug, Clone)]
pub struct LedgerService {
    accounts: AccountRepository,
    journal: JournalRepository,
}

impl LedgerService {
    /// Creates a ledger service over a store.
    #[must_use]
    pub fn new(store: LedgerStore) -> Self {
        Self {
            accounts: AccountRepository::new(store.clone()),
            journal: JournalRepository::new(store),
        }
    }

    /// The account repository this service posts against.
    #[must_use]
    pub const fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// Posts a balanced journal entry.
    ///
    /// # Errors
    ///
    /// Propagates validation, not-found, funds and conflict errors from
    /// the posting path.
    pub fn post_journal_entry(&self, input: EntryInput) -> AppResult<PostedEntry> {
        Ok(self.journal.post_entry(input)?)
    }

    /// Returns an account's current materialized balance.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing or inactive account.
    pub fn get_account_balance(&self, account_id: AccountId) -> AppResult<Decimal> {
        Ok(self.accounts.get(account_id)?.balance)
    }

    /// Returns an account's statement with running balances, oldest first.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing account.
    pub fn get_transaction_history(
        &self,
        account_id: AccountId,
        filter: LineFilter,
    ) -> AppResult<Vec<TransactionRecord>> {
        let lines = self.journal.lines_for_account(account_id, filter)?;
        Ok(build_statement(&lines))
    }

    /// Replays an account's full journal and compares the derived balance
    /// against the materialized one.
    ///
    /// # Errors
    ///
    /// Returns an internal error on drift; drift means the store broke
    /// its own invariant and the account needs operator attention.
    pub fn reconcile_account(&self, account_id: AccountId) -> AppResult<()> {
        let stored = self.accounts.get(account_id)?.balance;
        let lines = self
            .journal
            .lines_for_account(account_id, LineFilter::default())?;
        reconcile(stored, &lines).map_err(|e| {
            error!(%account_id, %stored, "balance drift detected");
            e.into()
        })
    }
}
