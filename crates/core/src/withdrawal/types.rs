//! Withdrawal workflow domain types.

use chrono::{DateTime, Utc};
use haulpay_shared::types::UserId;
use serde::{Deserialize, Serialize};

/// Withdrawal request status.
///
/// Requests are created `Pending` and decided exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; ledger debit posted, payout in flight.
    Approved,
    /// Rejected (terminal, no ledger entry).
    Rejected,
    /// Payout confirmed complete (terminal).
    Completed,
}

impl WithdrawalStatus {
    /// Returns true once a decision has been made.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true for states no further transition leaves.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl std::fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// The action a decision-maker takes on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// Approve and pay out.
    Approve,
    /// Reject with a reason.
    Reject,
}

/// The validated outcome of a decision, carrying audit trail information.
#[derive(Debug, Clone)]
pub enum DecisionOutcome {
    /// Request approved; the caller must post the wallet debit in the same
    /// atomic unit as the status update.
    Approved {
        /// The user who approved.
        approved_by: UserId,
        /// When the approval happened.
        approved_at: DateTime<Utc>,
    },
    /// Request rejected; no ledger entry.
    Rejected {
        /// The user who rejected.
        rejected_by: UserId,
        /// Why the request was rejected.
        reason: String,
    },
}

impl DecisionOutcome {
    /// The status this outcome transitions the request to.
    #[must_use]
    pub fn new_status(&self) -> WithdrawalStatus {
        match self {
            Self::Approved { .. } => WithdrawalStatus::Approved,
            Self::Rejected { .. } => WithdrawalStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_undecided() {
        assert!(!WithdrawalStatus::Pending.is_decided());
        assert!(WithdrawalStatus::Approved.is_decided());
        assert!(WithdrawalStatus::Rejected.is_decided());
        assert!(WithdrawalStatus::Completed.is_decided());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!WithdrawalStatus::Pending.is_terminal());
        assert!(!WithdrawalStatus::Approved.is_terminal());
        assert!(WithdrawalStatus::Rejected.is_terminal());
        assert!(WithdrawalStatus::Completed.is_terminal());
    }

    #[test]
    fn test_outcome_status() {
        let approved = DecisionOutcome::Approved {
            approved_by: UserId::new(),
            approved_at: Utc::now(),
        };
        assert_eq!(approved.new_status(), WithdrawalStatus::Approved);

        let rejected = DecisionOutcome::Rejected {
            rejected_by: UserId::new(),
            reason: "missing payout details".to_string(),
        };
        assert_eq!(rejected.new_status(), WithdrawalStatus::Rejected);
    }
}
