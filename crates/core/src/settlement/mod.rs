//! Settlement math for completed loads.
//!
//! Pure calculations only: fee breakdowns, fare totals, and the journal
//! lines a settlement posts. Selecting eligible loads and committing the
//! entry is the settlement engine's job.

pub mod fee;
pub mod lines;

#[cfg(test)]
mod fee_props;

pub use fee::FeeBreakdown;
pub use lines::{SettlementAccounts, SettlementError, build_settlement_lines};
