//! Ledger domain types for journal entry creation and validation.

use haulpay_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial account classification.
///
/// Wallet accounts belong to one organization and may never go negative.
/// The remaining types are per-currency platform singletons
/// (`organization_id` is absent) and are allowed to overdraw, representing
/// platform float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Platform service-fee revenue.
    PlatformRevenue,
    /// Funds held by the platform, not yet disbursed to a party.
    Escrow,
    /// Contra account for funds leaving the system to the payout rail.
    PayoutClearing,
    /// A shipper organization's spendable balance.
    ShipperWallet,
    /// A carrier organization's withdrawable balance.
    CarrierWallet,
}

impl AccountType {
    /// Returns true for per-organization wallet accounts.
    #[must_use]
    pub const fn is_wallet(self) -> bool {
        matches!(self, Self::ShipperWallet | Self::CarrierWallet)
    }

    /// Returns true if the account may carry a negative balance.
    #[must_use]
    pub const fn may_overdraw(self) -> bool {
        !self.is_wallet()
    }
}

/// Entry side: either Debit or Credit.
///
/// All Haulpay account types are credit-normal: wallets and escrow are
/// funds the platform owes, revenue is earned fees. Credits increase a
/// balance, debits decrease it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

/// Journal transaction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Fare movement for a completed, POD-verified load.
    Settlement,
    /// Standalone platform service fee.
    ServiceFee,
    /// Organization payout from a wallet.
    Withdrawal,
    /// Reversal of funds back to a payer.
    Refund,
    /// Manual operator correction.
    Adjustment,
}

impl TransactionType {
    /// Returns the string representation of the transaction type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settlement => "settlement",
            Self::ServiceFee => "service_fee",
            Self::Withdrawal => "withdrawal",
            Self::Refund => "refund",
            Self::Adjustment => "adjustment",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for a single journal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit line.
    pub side: EntrySide,
    /// The amount (must be positive).
    pub amount: Decimal,
}

impl LineInput {
    /// Creates a debit line.
    #[must_use]
    pub const fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            side: EntrySide::Debit,
            amount,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub const fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            side: EntrySide::Credit,
            amount,
        }
    }
}

/// Input for posting a new journal entry.
#[derive(Debug, Clone)]
pub struct EntryInput {
    /// The type of transaction.
    pub transaction_type: TransactionType,
    /// Correlates to the originating domain object (load id or withdrawal
    /// request id). Unique per transaction type.
    pub reference: String,
    /// Human-readable description.
    pub description: String,
    /// The journal lines (must have at least 2).
    pub lines: Vec<LineInput>,
}

/// Signed balance delta for a line.
///
/// Credit-normal convention: credits increase the balance, debits
/// decrease it.
#[must_use]
pub fn signed_amount(side: EntrySide, amount: Decimal) -> Decimal {
    match side {
        EntrySide::Debit => -amount,
        EntrySide::Credit => amount,
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}
