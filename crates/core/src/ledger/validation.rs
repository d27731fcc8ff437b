//! Business rule validation for journal entries.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryInput, EntrySide, EntryTotals};

/// Validates the shape of a journal entry before it touches storage.
///
/// Checks performed:
/// 1. At least two lines
/// 2. Every amount strictly positive
/// 3. Both a debit and a credit side present
/// 4. `sum(debits) == sum(credits)` exactly - amounts are pre-rounded by
///    callers to the currency's minor unit, so no tolerance is applied
///
/// Account existence and overdraw checks happen at posting time, inside
/// the same atomic unit that re-reads balances.
///
/// # Errors
///
/// Returns a `LedgerError` describing the first violated rule.
pub fn validate_entry(input: &EntryInput) -> Result<EntryTotals, LedgerError> {
    if input.lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for line in &input.lines {
        if line.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if line.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        match line.side {
            EntrySide::Debit => {
                debits += line.amount;
                has_debit = true;
            }
            EntrySide::Credit => {
                credits += line.amount;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    if debits != credits {
        return Err(LedgerError::Unbalanced { debits, credits });
    }

    Ok(EntryTotals::new(debits, credits))
}
