//! Journal repository: the only write path into the ledger.
//!
//! Posting validates the entry, re-checks every precondition under the
//! write lock, then applies balances and appends rows in one commit
//! section. Entries and lines are never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use haulpay_core::ledger::{
    signed_amount, validate_entry, EntryInput, LedgerError, TransactionType,
};
use haulpay_core::reconciliation::PostedLine;
use haulpay_shared::types::{AccountId, Currency, JournalEntryId, JournalLineId};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StoreError;
use crate::rows::{JournalEntryRow, JournalLineRow};
use crate::state::{LedgerStore, StoreState};

/// A journal entry together with its lines, as posted.
#[derive(Debug, Clone)]
pub struct PostedEntry {
    /// The entry header.
    pub entry: JournalEntryRow,
    /// The entry's lines, in input order.
    pub lines: Vec<JournalLineRow>,
}

/// Time-range filter for account history queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFilter {
    /// Inclusive lower bound on posting time.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on posting time.
    pub to: Option<DateTime<Utc>>,
}

impl LineFilter {
    fn matches(&self, posted_at: DateTime<Utc>) -> bool {
        if let Some(from) = self.from {
            if posted_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if posted_at > to {
                return false;
            }
        }
        true
    }
}

/// Journal repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    store: LedgerStore,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Posts a balanced journal entry atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unbalanced, references a missing
    /// or inactive account, mixes account currencies, would overdraw a
    /// wallet, or reuses a `(transaction_type, reference)` pair.
    pub fn post_entry(&self, input: EntryInput) -> Result<PostedEntry, StoreError> {
        self.store.commit(|state| apply_entry(state, &input))
    }

    /// Fetches a posted entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure; a missing entry is `None`.
    pub fn entry(&self, id: JournalEntryId) -> Result<Option<PostedEntry>, StoreError> {
        self.store.read(|state| {
            state.entry_index.get(&id).map(|&idx| PostedEntry {
                entry: state.entries[idx].clone(),
                lines: lines_of(state, id),
            })
        })
    }

    /// Fetches the entry posted under a `(transaction_type, reference)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn entry_by_reference(
        &self,
        transaction_type: TransactionType,
        reference: &str,
    ) -> Result<Option<PostedEntry>, StoreError> {
        self.store.read(|state| {
            state
                .entries
                .iter()
                .find(|e| e.transaction_type == transaction_type && e.reference == reference)
                .map(|e| PostedEntry {
                    entry: e.clone(),
                    lines: lines_of(state, e.id),
                })
        })
    }

    /// Lists an account's posted lines joined to their entry headers,
    /// oldest first, optionally bounded by posting time.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn lines_for_account(
        &self,
        account_id: AccountId,
        filter: LineFilter,
    ) -> Result<Vec<PostedLine>, StoreError> {
        self.store.read(|state| {
            if !state.accounts.contains_key(&account_id) {
                return Err(StoreError::AccountNotFound(account_id));
            }
            Ok(state
                .lines
                .iter()
                .filter(|line| line.account_id == account_id)
                .filter_map(|line| {
                    let entry = &state.entries[state.entry_index[&line.entry_id]];
                    filter.matches(entry.created_at).then(|| PostedLine {
                        entry_id: entry.id,
                        transaction_type: entry.transaction_type,
                        description: entry.description.clone(),
                        reference: entry.reference.clone(),
                        posted_at: entry.created_at,
                        side: line.side,
                        amount: line.amount,
                    })
                })
                .collect())
        })?
    }
}

/// Validates and applies an entry against mutable state.
///
/// Callers must already hold the write lock; the withdrawal and load
/// repositories reuse this inside their own commit sections so that a
/// status flip and its ledger entry land together.
pub(crate) fn apply_entry(
    state: &mut StoreState,
    input: &EntryInput,
) -> Result<PostedEntry, StoreError> {
    validate_entry(input)?;

    let key = (input.transaction_type, input.reference.clone());
    if state.entry_refs.contains(&key) {
        return Err(LedgerError::DuplicateReference {
            transaction_type: input.transaction_type,
            reference: input.reference.clone(),
        }
        .into());
    }

    // Precondition pass: every account active, one currency across the
    // entry, no wallet left negative.
    let mut deltas: Vec<(AccountId, Decimal)> = Vec::new();
    for line in &input.lines {
        let delta = signed_amount(line.side, line.amount);
        match deltas.iter_mut().find(|(id, _)| *id == line.account_id) {
            Some((_, acc)) => *acc += delta,
            None => deltas.push((line.account_id, delta)),
        }
    }
    let mut entry_currency: Option<Currency> = None;
    for (account_id, delta) in &deltas {
        let account = state
            .accounts
            .get(account_id)
            .filter(|a| a.is_active)
            .ok_or(LedgerError::AccountNotFound(*account_id))?;
        match entry_currency {
            None => entry_currency = Some(account.currency),
            Some(first) if first != account.currency => {
                return Err(StoreError::CurrencyMismatch {
                    first,
                    second: account.currency,
                });
            }
            Some(_) => {}
        }
        if !account.account_type.may_overdraw() && account.balance + delta < Decimal::ZERO {
            return Err(LedgerError::InsufficientFunds {
                account_id: *account_id,
                balance: account.balance,
                change: *delta,
            }
            .into());
        }
    }

    // Apply pass: balances move line by line so balance_after snapshots
    // are exact even when one account appears on several lines.
    let now = Utc::now();
    let entry = JournalEntryRow {
        id: JournalEntryId::new(),
        transaction_type: input.transaction_type,
        reference: input.reference.clone(),
        description: input.description.clone(),
        created_at: now,
    };

    let mut lines = Vec::with_capacity(input.lines.len());
    for line in &input.lines {
        let account = state
            .accounts
            .get_mut(&line.account_id)
            .ok_or(LedgerError::AccountNotFound(line.account_id))?;
        account.balance += signed_amount(line.side, line.amount);
        account.version += 1;
        account.updated_at = now;
        lines.push(JournalLineRow {
            id: JournalLineId::new(),
            entry_id: entry.id,
            account_id: line.account_id,
            side: line.side,
            amount: line.amount,
            balance_after: account.balance,
        });
    }

    state.entry_index.insert(entry.id, state.entries.len());
    state.entries.push(entry.clone());
    state.lines.extend(lines.iter().cloned());
    state.entry_refs.insert(key);

    info!(
        entry_id = %entry.id,
        transaction_type = %entry.transaction_type,
        reference = %entry.reference,
        line_count = lines.len(),
        "journal entry posted"
    );

    Ok(PostedEntry { entry, lines })
}

fn lines_of(state: &StoreState, entry_id: JournalEntryId) -> Vec<JournalLineRow> {
    state
        .lines
        .iter()
        .filter(|line| line.entry_id == entry_id)
        .cloned()
        .collect()
}
