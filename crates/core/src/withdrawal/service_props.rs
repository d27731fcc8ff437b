//! Property tests for the withdrawal state machine.

use haulpay_shared::types::UserId;
use proptest::prelude::*;

use super::error::WithdrawalError;
use super::service::WithdrawalWorkflow;
use super::types::{DecisionAction, WithdrawalStatus};

fn status_strategy() -> impl Strategy<Value = WithdrawalStatus> {
    prop_oneof![
        Just(WithdrawalStatus::Pending),
        Just(WithdrawalStatus::Approved),
        Just(WithdrawalStatus::Rejected),
        Just(WithdrawalStatus::Completed),
    ]
}

fn decided_status_strategy() -> impl Strategy<Value = WithdrawalStatus> {
    prop_oneof![
        Just(WithdrawalStatus::Approved),
        Just(WithdrawalStatus::Rejected),
        Just(WithdrawalStatus::Completed),
    ]
}

fn action_strategy() -> impl Strategy<Value = DecisionAction> {
    prop_oneof![Just(DecisionAction::Approve), Just(DecisionAction::Reject)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A decided request rejects every further decision.
    #[test]
    fn prop_decided_requests_are_immutable(
        status in decided_status_strategy(),
        action in action_strategy(),
    ) {
        let result = WithdrawalWorkflow::decide(
            status,
            action,
            UserId::new(),
            Some("reason".to_string()),
        );
        prop_assert!(matches!(result, Err(WithdrawalError::AlreadyDecided(_))));
    }

    /// A pending request accepts exactly the two decision transitions.
    #[test]
    fn prop_pending_decisions_succeed(action in action_strategy()) {
        let result = WithdrawalWorkflow::decide(
            WithdrawalStatus::Pending,
            action,
            UserId::new(),
            Some("reason".to_string()),
        );
        let outcome = result.unwrap();
        prop_assert!(WithdrawalWorkflow::is_valid_transition(
            WithdrawalStatus::Pending,
            outcome.new_status()
        ));
    }

    /// Terminal statuses have no outgoing transitions at all.
    #[test]
    fn prop_terminal_statuses_have_no_exits(
        from in status_strategy(),
        to in status_strategy(),
    ) {
        if from.is_terminal() {
            prop_assert!(!WithdrawalWorkflow::is_valid_transition(from, to));
        }
    }
}
