//! State transition logic for withdrawal requests.

use chrono::Utc;
use haulpay_shared::types::UserId;
use rust_decimal::Decimal;

use super::error::WithdrawalError;
use super::types::{DecisionAction, DecisionOutcome, WithdrawalStatus};

/// Stateless service validating withdrawal state transitions.
///
/// Callers re-fetch the request's current status inside the same atomic
/// unit that persists the outcome; this service only answers whether the
/// transition is legal and what audit fields it carries.
pub struct WithdrawalWorkflow;

impl WithdrawalWorkflow {
    /// Validates the requested amount for a new withdrawal.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` for zero or negative amounts.
    pub fn validate_amount(amount: Decimal) -> Result<(), WithdrawalError> {
        if amount <= Decimal::ZERO {
            return Err(WithdrawalError::NonPositiveAmount(amount));
        }
        Ok(())
    }

    /// Decide a pending request.
    ///
    /// # Errors
    ///
    /// * `AlreadyDecided` if the request is not `Pending`
    /// * `RejectionReasonRequired` if rejecting without a reason
    pub fn decide(
        current_status: WithdrawalStatus,
        action: DecisionAction,
        decided_by: UserId,
        reason: Option<String>,
    ) -> Result<DecisionOutcome, WithdrawalError> {
        if current_status != WithdrawalStatus::Pending {
            return Err(WithdrawalError::AlreadyDecided(current_status));
        }

        match action {
            DecisionAction::Approve => Ok(DecisionOutcome::Approved {
                approved_by: decided_by,
                approved_at: Utc::now(),
            }),
            DecisionAction::Reject => {
                let reason = reason.unwrap_or_default();
                if reason.trim().is_empty() {
                    return Err(WithdrawalError::RejectionReasonRequired);
                }
                Ok(DecisionOutcome::Rejected {
                    rejected_by: decided_by,
                    reason,
                })
            }
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    /// - Approved → Completed (payout confirmed)
    #[must_use]
    pub fn is_valid_transition(from: WithdrawalStatus, to: WithdrawalStatus) -> bool {
        matches!(
            (from, to),
            (
                WithdrawalStatus::Pending,
                WithdrawalStatus::Approved | WithdrawalStatus::Rejected
            ) | (WithdrawalStatus::Approved, WithdrawalStatus::Completed)
        )
    }
}
