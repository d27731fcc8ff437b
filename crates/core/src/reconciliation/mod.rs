//! Read-only derivation of transaction history and balance verification.
//!
//! The journal is the source of truth; the stored account balance is a
//! materialized value. Reconciliation replays an account's lines in entry
//! order and checks the replayed sum against the stored balance.

pub mod statement;

pub use statement::{PostedLine, ReconciliationError, TransactionRecord, build_statement, reconcile};
