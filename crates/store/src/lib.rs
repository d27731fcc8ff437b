//! Persistence layer for Haulpay.
//!
//! Implements the transactional contract the ledger core requires:
//! atomic multi-row read-modify-write with precondition re-validation.
//! Rows live in versioned in-memory tables behind a single-writer commit
//! section; repositories expose one method per atomic operation, in the
//! shape of a conventional repository-per-entity layer so a database
//! backend can be slotted in behind the same API.

pub mod error;
pub mod repositories;
pub mod rows;
pub mod state;

pub use error::StoreError;
pub use repositories::account::{AccountRepository, SystemAccounts};
pub use repositories::journal::{JournalRepository, LineFilter, PostedEntry};
pub use repositories::load::{LoadRepository, SettleOutcome};
pub use repositories::withdrawal::WithdrawalRepository;
pub use state::LedgerStore;
