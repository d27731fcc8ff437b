//! Withdrawal request workflow.
//!
//! This module implements the withdrawal lifecycle state machine:
//! `Pending -> Approved -> Completed` or `Pending -> Rejected` (terminal).
//! The decision itself is pure; posting the ledger debit and persisting
//! the transition is the withdrawal service's job.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WithdrawalError;
pub use service::WithdrawalWorkflow;
pub use types::{DecisionAction, DecisionOutcome, WithdrawalStatus};
