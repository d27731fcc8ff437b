//! Load repository: the settlement engine's view of loads.
//!
//! The settlement marker is the idempotency guard: it is re-read inside
//! the commit section of `settle`, so a load settles at most once no
//! matter how many sweeps race over it.

use chrono::Utc;
use haulpay_core::ledger::EntryInput;
use haulpay_shared::types::{Currency, LoadId, OrganizationId};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StoreError;
use crate::repositories::journal::{apply_entry, PostedEntry};
use crate::rows::{LoadRow, SettlementMarker};
use crate::state::LedgerStore;

/// The outcome of a settlement attempt.
#[derive(Debug)]
pub enum SettleOutcome {
    /// The entry was posted and the marker flipped.
    Settled(PostedEntry),
    /// Another sweep already settled this load; nothing was written.
    AlreadySettled,
}

/// Load repository.
#[derive(Debug, Clone)]
pub struct LoadRepository {
    store: LedgerStore,
}

impl LoadRepository {
    /// Creates a new load repository.
    #[must_use]
    pub const fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Registers a delivered load awaiting settlement.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn create(
        &self,
        shipper_org: OrganizationId,
        carrier_org: OrganizationId,
        currency: Currency,
        trip_distance_km: Decimal,
    ) -> Result<LoadRow, StoreError> {
        self.store.commit(|state| {
            let row = LoadRow {
                id: LoadId::new(),
                shipper_org,
                carrier_org,
                currency,
                trip_distance_km,
                pod_verified: false,
                settlement: SettlementMarker::FeePending,
                settled_at: None,
                version: 0,
                created_at: Utc::now(),
            };
            state.loads.insert(row.id, row.clone());
            Ok(row)
        })
    }

    /// Fetches a load by ID.
    ///
    /// # Errors
    ///
    /// Returns `LoadNotFound` if the load does not exist.
    pub fn get(&self, id: LoadId) -> Result<LoadRow, StoreError> {
        self.store.read(|state| {
            state
                .loads
                .get(&id)
                .cloned()
                .ok_or(StoreError::LoadNotFound(id))
        })?
    }

    /// Records proof-of-delivery verification, making the load settleable.
    ///
    /// # Errors
    ///
    /// Returns `LoadNotFound` if the load does not exist.
    pub fn mark_pod_verified(&self, id: LoadId) -> Result<LoadRow, StoreError> {
        self.store.commit(|state| {
            let row = state
                .loads
                .get_mut(&id)
                .ok_or(StoreError::LoadNotFound(id))?;
            row.pod_verified = true;
            row.version += 1;
            Ok(row.clone())
        })
    }

    /// Lists settleable loads (POD verified, fee still pending), oldest
    /// first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn find_settleable(&self, limit: usize) -> Result<Vec<LoadRow>, StoreError> {
        self.store.read(|state| {
            let mut rows: Vec<LoadRow> = state
                .loads
                .values()
                .filter(|l| l.is_settleable())
                .cloned()
                .collect();
            rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            rows.truncate(limit);
            rows
        })
    }

    /// Posts the settlement entry for a load and flips its marker, in one
    /// commit section.
    ///
    /// Returns `AlreadySettled` without writing anything if the marker was
    /// flipped between the candidate scan and this call.
    ///
    /// # Errors
    ///
    /// * `LoadNotFound` if the load does not exist
    /// * ledger errors from posting the entry
    pub fn settle(&self, id: LoadId, input: EntryInput) -> Result<SettleOutcome, StoreError> {
        self.store.commit(|state| {
            let current = state
                .loads
                .get(&id)
                .ok_or(StoreError::LoadNotFound(id))?;
            // Marker re-check under the write lock.
            if current.settlement == SettlementMarker::FeeDeducted {
                return Ok(SettleOutcome::AlreadySettled);
            }
            if !current.pod_verified {
                return Err(StoreError::LoadNotSettleable(id));
            }

            let posted = apply_entry(state, &input)?;

            let row = state
                .loads
                .get_mut(&id)
                .ok_or(StoreError::LoadNotFound(id))?;
            row.settlement = SettlementMarker::FeeDeducted;
            row.settled_at = Some(posted.entry.created_at);
            row.version += 1;

            info!(load_id = %id, entry_id = %posted.entry.id, "load settled");
            Ok(SettleOutcome::Settled(posted))
        })
    }
}
