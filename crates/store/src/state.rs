//! The in-memory ledger store and its commit section.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use haulpay_core::ledger::TransactionType;
use haulpay_shared::types::{AccountId, JournalEntryId, LoadId, WithdrawalRequestId};

use crate::error::StoreError;
use crate::rows::{AccountRow, JournalEntryRow, JournalLineRow, LoadRow, WithdrawalRow};

/// All stored tables.
///
/// `entries` and `lines` are append-only and kept in posting order, so
/// iterating them replays the journal chronologically.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) accounts: HashMap<AccountId, AccountRow>,
    pub(crate) entries: Vec<JournalEntryRow>,
    pub(crate) entry_index: HashMap<JournalEntryId, usize>,
    pub(crate) lines: Vec<JournalLineRow>,
    pub(crate) entry_refs: HashSet<(TransactionType, String)>,
    pub(crate) withdrawals: HashMap<WithdrawalRequestId, WithdrawalRow>,
    pub(crate) loads: HashMap<LoadId, LoadRow>,
}

/// Handle to the shared store.
///
/// Every mutating repository method runs inside `commit`, which holds the
/// write lock for the whole read-check-apply sequence: preconditions
/// (balances, withdrawal status, load marker) are re-read under the lock,
/// and either every write in the closure lands or none do (closures
/// return early on error before mutating). Reads run under the shared
/// lock in parallel. The lock is never held across an `.await` or any
/// external call.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    inner: Arc<RwLock<StoreState>>,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only query under the shared lock.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> Result<R, StoreError> {
        let state = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&state))
    }

    /// Runs an atomic read-check-apply sequence under the exclusive lock.
    pub(crate) fn commit<R>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut state = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = LedgerStore::new();
        let counts = store
            .read(|s| (s.accounts.len(), s.entries.len(), s.lines.len()))
            .unwrap();
        assert_eq!(counts, (0, 0, 0));
    }

    #[test]
    fn test_panicked_writer_poisons_lock() {
        let store = LedgerStore::new();
        let writer = store.clone();
        let result = std::thread::spawn(move || {
            writer.commit(|_| -> Result<(), StoreError> { panic!("writer died") })
        })
        .join();
        assert!(result.is_err());

        // Subsequent access reports the poisoning instead of panicking.
        assert!(matches!(store.read(|_| ()), Err(StoreError::LockPoisoned)));
        assert!(matches!(
            store.commit(|_| Ok(())),
            Err(StoreError::LockPoisoned)
        ));
    }

    #[test]
    fn test_commit_error_leaves_state_unchanged() {
        let store = LedgerStore::new();
        let result: Result<(), StoreError> = store.commit(|state| {
            state.entry_refs.clear();
            Err(StoreError::LockPoisoned)
        });
        assert!(result.is_err());
        // Clones share the same underlying state.
        let clone = store.clone();
        assert_eq!(clone.read(|s| s.entries.len()).unwrap(), 0);
    }
}
