//! Journal line construction for a load settlement.

use haulpay_shared::error::AppError;
use haulpay_shared::types::{AccountId, Currency};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::types::LineInput;

use super::fee::FeeBreakdown;

/// The accounts a settlement entry touches.
#[derive(Debug, Clone, Copy)]
pub struct SettlementAccounts {
    /// The paying party's wallet (debited for the full fare).
    pub payer: AccountId,
    /// The carrier's wallet (credited fare minus fee).
    pub carrier: AccountId,
    /// Platform revenue (credited the fee).
    pub platform_revenue: AccountId,
}

/// Errors in settlement line construction.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// Computed fare is zero or negative.
    #[error("Total fare must be positive, got {0}")]
    NonPositiveFare(Decimal),

    /// Fee exceeds the fare it is charged against.
    #[error("Service fee {fee} exceeds total fare {fare}")]
    FeeExceedsFare {
        /// The fee due.
        fee: Decimal,
        /// The total fare.
        fare: Decimal,
    },
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Builds the journal lines for settling one load.
///
/// Debit the payer the full fare, credit the carrier fare-minus-fee,
/// credit platform revenue the fee. The fee line is omitted when the fee
/// is zero so the entry never carries a zero-amount line.
///
/// # Errors
///
/// Returns an error if the fare is non-positive or smaller than the fee.
pub fn build_settlement_lines(
    accounts: &SettlementAccounts,
    breakdown: &FeeBreakdown,
    currency: Currency,
) -> Result<Vec<LineInput>, SettlementError> {
    let fare = breakdown.total_fare(currency);
    let fee = breakdown.fee_due(currency);

    if fare <= Decimal::ZERO {
        return Err(SettlementError::NonPositiveFare(fare));
    }
    if fee > fare {
        return Err(SettlementError::FeeExceedsFare { fee, fare });
    }

    let mut lines = vec![
        LineInput::debit(accounts.payer, fare),
        LineInput::credit(accounts.carrier, fare - fee),
    ];
    if fee > Decimal::ZERO {
        lines.push(LineInput::credit(accounts.platform_revenue, fee));
    }

    Ok(lines)
}
