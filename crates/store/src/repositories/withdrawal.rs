//! Withdrawal repository.
//!
//! Approval is the critical section here: the status flip and the wallet
//! debit must land in the same commit, and the status is re-read under
//! the write lock so two racing approvers cannot both pay out.

use chrono::Utc;
use haulpay_core::ledger::{EntryInput, LineInput, TransactionType};
use haulpay_core::withdrawal::{
    DecisionAction, DecisionOutcome, WithdrawalError, WithdrawalStatus, WithdrawalWorkflow,
};
use haulpay_shared::types::{AccountId, Currency, OrganizationId, UserId, WithdrawalRequestId};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StoreError;
use crate::repositories::journal::{apply_entry, PostedEntry};
use crate::rows::WithdrawalRow;
use crate::state::LedgerStore;

/// Withdrawal request repository.
#[derive(Debug, Clone)]
pub struct WithdrawalRepository {
    store: LedgerStore,
}

impl WithdrawalRepository {
    /// Creates a new withdrawal repository.
    #[must_use]
    pub const fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Files a new pending withdrawal request.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive amount.
    pub fn create(
        &self,
        organization_id: OrganizationId,
        requested_by: UserId,
        amount: Decimal,
        currency: Currency,
        payout_details: String,
    ) -> Result<WithdrawalRow, StoreError> {
        WithdrawalWorkflow::validate_amount(amount)?;
        self.store.commit(|state| {
            let now = Utc::now();
            let row = WithdrawalRow {
                id: WithdrawalRequestId::new(),
                organization_id,
                requested_by,
                amount,
                currency,
                payout_details,
                status: WithdrawalStatus::Pending,
                approved_by: None,
                approved_at: None,
                rejection_reason: None,
                completed_at: None,
                version: 0,
                created_at: now,
            };
            info!(request_id = %row.id, %amount, %currency, "withdrawal requested");
            state.withdrawals.insert(row.id, row.clone());
            Ok(row)
        })
    }

    /// Fetches a withdrawal request by ID.
    ///
    /// # Errors
    ///
    /// Returns `WithdrawalNotFound` if the request does not exist.
    pub fn get(&self, id: WithdrawalRequestId) -> Result<WithdrawalRow, StoreError> {
        self.store.read(|state| {
            state
                .withdrawals
                .get(&id)
                .cloned()
                .ok_or(StoreError::WithdrawalNotFound(id))
        })?
    }

    /// Lists a organization's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<WithdrawalRow>, StoreError> {
        self.store.read(|state| {
            let mut rows: Vec<WithdrawalRow> = state
                .withdrawals
                .values()
                .filter(|r| r.organization_id == organization_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            rows
        })
    }

    /// Approves a pending request and posts the wallet debit atomically.
    ///
    /// The debit moves funds from the organization's wallet into the
    /// payout clearing account; the external payout rail drains clearing
    /// later.
    ///
    /// # Errors
    ///
    /// * `AlreadyDecided` if the request is no longer pending
    /// * `InsufficientFunds` if the wallet cannot cover the amount
    pub fn approve(
        &self,
        id: WithdrawalRequestId,
        decided_by: UserId,
        wallet: AccountId,
        payout_clearing: AccountId,
    ) -> Result<(WithdrawalRow, PostedEntry), StoreError> {
        self.store.commit(|state| {
            let current = state
                .withdrawals
                .get(&id)
                .ok_or(StoreError::WithdrawalNotFound(id))?;
            let amount = current.amount;
            // Status re-check under the write lock; a racing second
            // approval fails here with AlreadyDecided.
            let outcome = WithdrawalWorkflow::decide(
                current.status,
                DecisionAction::Approve,
                decided_by,
                None,
            )?;

            let input = EntryInput {
                transaction_type: TransactionType::Withdrawal,
                reference: id.to_string(),
                description: format!("Withdrawal payout for request {id}"),
                lines: vec![
                    LineInput::debit(wallet, amount),
                    LineInput::credit(payout_clearing, amount),
                ],
            };
            let posted = apply_entry(state, &input)?;

            let row = state
                .withdrawals
                .get_mut(&id)
                .ok_or(StoreError::WithdrawalNotFound(id))?;
            if let DecisionOutcome::Approved {
                approved_by,
                approved_at,
            } = outcome
            {
                row.status = WithdrawalStatus::Approved;
                row.approved_by = Some(approved_by);
                row.approved_at = Some(approved_at);
            }
            row.version += 1;

            info!(request_id = %id, entry_id = %posted.entry.id, "withdrawal approved");
            Ok((row.clone(), posted))
        })
    }

    /// Rejects a pending request. No ledger entry is posted.
    ///
    /// # Errors
    ///
    /// * `AlreadyDecided` if the request is no longer pending
    /// * `RejectionReasonRequired` if the reason is blank
    pub fn reject(
        &self,
        id: WithdrawalRequestId,
        decided_by: UserId,
        reason: String,
    ) -> Result<WithdrawalRow, StoreError> {
        self.store.commit(|state| {
            let row = state
                .withdrawals
                .get_mut(&id)
                .ok_or(StoreError::WithdrawalNotFound(id))?;
            let outcome = WithdrawalWorkflow::decide(
                row.status,
                DecisionAction::Reject,
                decided_by,
                Some(reason),
            )?;
            if let DecisionOutcome::Rejected { reason, .. } = outcome {
                row.status = WithdrawalStatus::Rejected;
                row.rejection_reason = Some(reason);
            }
            row.version += 1;

            info!(request_id = %id, "withdrawal rejected");
            Ok(row.clone())
        })
    }

    /// Marks an approved request completed once the payout rail confirms.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyDecided` if the request is not in `Approved`.
    pub fn complete(&self, id: WithdrawalRequestId) -> Result<WithdrawalRow, StoreError> {
        self.store.commit(|state| {
            let row = state
                .withdrawals
                .get_mut(&id)
                .ok_or(StoreError::WithdrawalNotFound(id))?;
            if !WithdrawalWorkflow::is_valid_transition(row.status, WithdrawalStatus::Completed) {
                return Err(WithdrawalError::AlreadyDecided(row.status).into());
            }
            row.status = WithdrawalStatus::Completed;
            row.completed_at = Some(Utc::now());
            row.version += 1;

            info!(request_id = %id, "withdrawal completed");
            Ok(row.clone())
        })
    }
}
