//! Double-entry journal logic.
//!
//! This module implements the core ledger functionality:
//! - Account and entry domain types
//! - Signed amount convention for balance updates
//! - Balanced-entry validation
//! - Error types for ledger operations

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use types::{
    AccountType, EntryInput, EntrySide, EntryTotals, LineInput, TransactionType, signed_amount,
};
pub use validation::validate_entry;
