//! Persistence row types.
//!
//! Rows are the stored shape of each entity, distinct from the core
//! domain types. Every mutable row carries a `version` counter bumped on
//! each update so lost updates are observable.

use chrono::{DateTime, Utc};
use haulpay_core::ledger::{AccountType, EntrySide, TransactionType};
use haulpay_core::withdrawal::WithdrawalStatus;
use haulpay_shared::types::{
    AccountId, Currency, JournalEntryId, JournalLineId, LoadId, OrganizationId, UserId,
    WithdrawalRequestId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A financial account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    /// Account ID.
    pub id: AccountId,
    /// Owning organization; `None` for platform singletons.
    pub organization_id: Option<OrganizationId>,
    /// Account classification.
    pub account_type: AccountType,
    /// Account currency.
    pub currency: Currency,
    /// Materialized balance; equals the sum of signed line amounts.
    pub balance: Decimal,
    /// Inactive accounts reject postings and lookups.
    pub is_active: bool,
    /// Update counter.
    pub version: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A journal entry header row. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryRow {
    /// Entry ID (UUID v7, time-ordered).
    pub id: JournalEntryId,
    /// Transaction classification.
    pub transaction_type: TransactionType,
    /// Idempotency reference (load or withdrawal request id).
    pub reference: String,
    /// Human-readable description.
    pub description: String,
    /// Posting time.
    pub created_at: DateTime<Utc>,
}

/// A journal line row. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineRow {
    /// Line ID.
    pub id: JournalLineId,
    /// The entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// The account posted against.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: EntrySide,
    /// Positive amount.
    pub amount: Decimal,
    /// Account balance after this line was applied.
    pub balance_after: Decimal,
}

/// A withdrawal request row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRow {
    /// Request ID.
    pub id: WithdrawalRequestId,
    /// The requesting organization.
    pub organization_id: OrganizationId,
    /// The member who filed the request.
    pub requested_by: UserId,
    /// Amount to withdraw.
    pub amount: Decimal,
    /// Request currency.
    pub currency: Currency,
    /// Payout rail details (bank account, e-wallet handle).
    pub payout_details: String,
    /// Workflow status.
    pub status: WithdrawalStatus,
    /// The decision-maker, once decided.
    pub approved_by: Option<UserId>,
    /// Approval time.
    pub approved_at: Option<DateTime<Utc>>,
    /// Rejection reason, when rejected.
    pub rejection_reason: Option<String>,
    /// Payout completion time.
    pub completed_at: Option<DateTime<Utc>>,
    /// Update counter.
    pub version: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Settlement marker on a load: the per-load idempotency guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMarker {
    /// Service fee not yet deducted.
    FeePending,
    /// Fee deducted; settlement entry posted.
    FeeDeducted,
}

/// The slice of a load the settlement engine reads and writes.
///
/// Loads are owned by the marketplace collaborator; this row mirrors the
/// fields settlement needs plus the marker it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRow {
    /// Load ID.
    pub id: LoadId,
    /// The shipper organization (paying party).
    pub shipper_org: OrganizationId,
    /// The carrier organization (paid party).
    pub carrier_org: OrganizationId,
    /// Settlement currency.
    pub currency: Currency,
    /// Trip distance in kilometres.
    pub trip_distance_km: Decimal,
    /// Whether proof of delivery has been verified.
    pub pod_verified: bool,
    /// Settlement idempotency marker.
    pub settlement: SettlementMarker,
    /// When the settlement entry was posted.
    pub settled_at: Option<DateTime<Utc>>,
    /// Update counter.
    pub version: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl LoadRow {
    /// Returns true if the load is eligible for automatic settlement.
    #[must_use]
    pub fn is_settleable(&self) -> bool {
        self.pod_verified && self.settlement == SettlementMarker::FeePending
    }
}
