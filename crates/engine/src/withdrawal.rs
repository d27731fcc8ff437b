//! Withdrawal service: request intake and the approval decision.

use std::sync::Arc;

use haulpay_core::ledger::AccountType;
use haulpay_core::withdrawal::DecisionAction;
use haulpay_shared::error::{AppError, AppResult};
use haulpay_shared::types::{Currency, OrganizationId, UserId, WithdrawalRequestId};
use haulpay_store::rows::WithdrawalRow;
use haulpay_store::{AccountRepository, LedgerStore, StoreError, WithdrawalRepository};
use tracing::warn;

use crate::collaborators::{NotificationEvent, Notifier};

/// Orchestrates the withdrawal workflow over the repositories.
pub struct WithdrawalService {
    accounts: AccountRepository,
    withdrawals: WithdrawalRepository,
    notifier: Arc<dyn Notifier>,
}

impl WithdrawalService {
    /// Creates a withdrawal service over a store.
    #[must_use]
    pub fn new(store: LedgerStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            accounts: AccountRepository::new(store.clone()),
            withdrawals: WithdrawalRepository::new(store),
            notifier,
        }
    }

    /// Files a withdrawal request against an organization's wallet.
    ///
    /// The wallet balance is checked at approval time, not here; a
    /// request may be filed for more than the current balance and sit
    /// pending until funds arrive or an operator rejects it. The wallet
    /// itself must exist.
    ///
    /// # Errors
    ///
    /// * validation error for a non-positive amount
    /// * not-found if the organization has no wallet in the currency
    pub fn create_request(
        &self,
        organization_id: OrganizationId,
        requested_by: UserId,
        amount: rust_decimal::Decimal,
        currency: Currency,
        payout_details: String,
    ) -> AppResult<WithdrawalRow> {
        self.wallet_for(organization_id, currency)?;
        Ok(self.withdrawals.create(
            organization_id,
            requested_by,
            amount,
            currency,
            payout_details,
        )?)
    }

    /// Fetches a request.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown request.
    pub fn get_request(&self, id: WithdrawalRequestId) -> AppResult<WithdrawalRow> {
        Ok(self.withdrawals.get(id)?)
    }

    /// Lists an organization's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn list_requests(&self, organization_id: OrganizationId) -> AppResult<Vec<WithdrawalRow>> {
        Ok(self.withdrawals.list_for_organization(organization_id)?)
    }

    /// Decides a pending request.
    ///
    /// Approval posts the wallet debit in the same atomic unit as the
    /// status flip; a second decision on the same request is a conflict.
    ///
    /// # Errors
    ///
    /// * conflict if the request was already decided
    /// * insufficient-funds if the wallet cannot cover the amount
    /// * validation error when rejecting without a reason
    pub async fn decide(
        &self,
        id: WithdrawalRequestId,
        action: DecisionAction,
        decided_by: UserId,
        reason: Option<String>,
    ) -> AppResult<WithdrawalRow> {
        let request = self.withdrawals.get(id)?;

        let row = match action {
            DecisionAction::Approve => {
                let wallet = self.wallet_for(request.organization_id, request.currency)?;
                let clearing = self
                    .accounts
                    .find(None, AccountType::PayoutClearing, request.currency)?
                    .id;
                let (row, _entry) = self.withdrawals.approve(id, decided_by, wallet, clearing)?;
                self.emit(NotificationEvent::WithdrawalApproved {
                    request_id: row.id,
                    organization_id: row.organization_id,
                    amount: row.amount,
                    currency: row.currency,
                })
                .await;
                row
            }
            DecisionAction::Reject => {
                let reason = reason.unwrap_or_default();
                let row = self.withdrawals.reject(id, decided_by, reason.clone())?;
                self.emit(NotificationEvent::WithdrawalRejected {
                    request_id: row.id,
                    organization_id: row.organization_id,
                    reason,
                })
                .await;
                row
            }
        };
        Ok(row)
    }

    /// Marks an approved request completed once the payout rail confirms.
    ///
    /// # Errors
    ///
    /// Returns a conflict if the request is not in the approved state.
    pub fn confirm_payout(&self, id: WithdrawalRequestId) -> AppResult<WithdrawalRow> {
        Ok(self.withdrawals.complete(id)?)
    }

    fn wallet_for(
        &self,
        organization_id: OrganizationId,
        currency: Currency,
    ) -> AppResult<haulpay_shared::types::AccountId> {
        // An organization holds one wallet per currency; carriers are the
        // common case for withdrawals. Only a genuinely missing account
        // falls through to the next type.
        for account_type in [AccountType::CarrierWallet, AccountType::ShipperWallet] {
            match self.accounts.find(Some(organization_id), account_type, currency) {
                Ok(account) => return Ok(account.id),
                Err(StoreError::NoSuchAccount { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Err(AppError::NotFound(format!(
            "no {currency} wallet for organization {organization_id}"
        )))
    }

    async fn emit(&self, event: NotificationEvent) {
        if let Err(e) = self.notifier.notify(event).await {
            warn!(error = %e, "withdrawal notification failed");
        }
    }
}
