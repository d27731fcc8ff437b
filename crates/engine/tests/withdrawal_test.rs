//! Withdrawal workflow tests through the service layer.

use std::sync::Arc;

use futures::future::join_all;
use haulpay_core::ledger::{AccountType, EntryInput, LineInput, TransactionType};
use haulpay_core::withdrawal::{DecisionAction, WithdrawalStatus};
use haulpay_engine::{LogNotifier, WithdrawalService};
use haulpay_shared::types::{AccountId, Currency, OrganizationId, UserId};
use haulpay_store::{AccountRepository, JournalRepository, LedgerStore, SystemAccounts};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

struct Fixture {
    accounts: AccountRepository,
    service: Arc<WithdrawalService>,
    system: SystemAccounts,
    org: OrganizationId,
    wallet: AccountId,
}

fn fixture(balance: Decimal) -> Fixture {
    let store = LedgerStore::new();
    let accounts = AccountRepository::new(store.clone());
    let journal = JournalRepository::new(store.clone());
    let system = accounts.ensure_system_accounts(Currency::Usd).unwrap();

    let org = OrganizationId::new();
    let wallet = accounts
        .create(Some(org), AccountType::CarrierWallet, Currency::Usd)
        .unwrap()
        .id;
    if balance > Decimal::ZERO {
        journal
            .post_entry(EntryInput {
                transaction_type: TransactionType::Adjustment,
                reference: "topup".to_string(),
                description: "initial funding".to_string(),
                lines: vec![
                    LineInput::debit(system.escrow, balance),
                    LineInput::credit(wallet, balance),
                ],
            })
            .unwrap();
    }

    let service = Arc::new(WithdrawalService::new(store, Arc::new(LogNotifier)));
    Fixture {
        accounts,
        service,
        system,
        org,
        wallet,
    }
}

#[tokio::test]
async fn test_approve_flow() {
    let fx = fixture(dec!(1500));
    let request = fx
        .service
        .create_request(
            fx.org,
            UserId::new(),
            dec!(1000),
            Currency::Usd,
            "bank-001".to_string(),
        )
        .unwrap();

    let row = fx
        .service
        .decide(request.id, DecisionAction::Approve, UserId::new(), None)
        .await
        .unwrap();
    assert_eq!(row.status, WithdrawalStatus::Approved);
    assert_eq!(fx.accounts.get(fx.wallet).unwrap().balance, dec!(500));
    assert_eq!(
        fx.accounts.get(fx.system.payout_clearing).unwrap().balance,
        dec!(1000)
    );

    let completed = fx.service.confirm_payout(request.id).unwrap();
    assert_eq!(completed.status, WithdrawalStatus::Completed);
}

#[tokio::test]
async fn test_shipper_org_can_withdraw() {
    // An organization whose only wallet is a shipper wallet still
    // resolves for payout.
    let store = LedgerStore::new();
    let accounts = AccountRepository::new(store.clone());
    let journal = JournalRepository::new(store.clone());
    let system = accounts.ensure_system_accounts(Currency::Usd).unwrap();
    let org = OrganizationId::new();
    let wallet = accounts
        .create(Some(org), AccountType::ShipperWallet, Currency::Usd)
        .unwrap()
        .id;
    journal
        .post_entry(EntryInput {
            transaction_type: TransactionType::Adjustment,
            reference: "topup".to_string(),
            description: "initial funding".to_string(),
            lines: vec![
                LineInput::debit(system.escrow, dec!(300)),
                LineInput::credit(wallet, dec!(300)),
            ],
        })
        .unwrap();
    let service = WithdrawalService::new(store, Arc::new(LogNotifier));

    let request = service
        .create_request(
            org,
            UserId::new(),
            dec!(200),
            Currency::Usd,
            "bank-002".to_string(),
        )
        .unwrap();
    let row = service
        .decide(request.id, DecisionAction::Approve, UserId::new(), None)
        .await
        .unwrap();
    assert_eq!(row.status, WithdrawalStatus::Approved);
    assert_eq!(accounts.get(wallet).unwrap().balance, dec!(100));
}

#[tokio::test]
async fn test_create_requires_wallet() {
    let fx = fixture(dec!(100));
    let err = fx
        .service
        .create_request(
            OrganizationId::new(),
            UserId::new(),
            dec!(50),
            Currency::Usd,
            "bank-001".to_string(),
        )
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_create_allows_amount_above_balance() {
    // Coverage is checked at approval, not intake.
    let fx = fixture(dec!(100));
    let request = fx
        .service
        .create_request(
            fx.org,
            UserId::new(),
            dec!(500),
            Currency::Usd,
            "bank-001".to_string(),
        )
        .unwrap();

    let err = fx
        .service
        .decide(request.id, DecisionAction::Approve, UserId::new(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_FUNDS");
    assert_eq!(
        fx.service.get_request(request.id).unwrap().status,
        WithdrawalStatus::Pending
    );
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let fx = fixture(dec!(1500));
    let request = fx
        .service
        .create_request(
            fx.org,
            UserId::new(),
            dec!(100),
            Currency::Usd,
            "bank-001".to_string(),
        )
        .unwrap();

    let err = fx
        .service
        .decide(request.id, DecisionAction::Reject, UserId::new(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    let row = fx
        .service
        .decide(
            request.id,
            DecisionAction::Reject,
            UserId::new(),
            Some("payout details unverified".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(row.status, WithdrawalStatus::Rejected);
    assert_eq!(fx.accounts.get(fx.wallet).unwrap().balance, dec!(1500));
}

#[tokio::test]
async fn test_decided_request_rejects_second_decision() {
    let fx = fixture(dec!(1500));
    let request = fx
        .service
        .create_request(
            fx.org,
            UserId::new(),
            dec!(100),
            Currency::Usd,
            "bank-001".to_string(),
        )
        .unwrap();

    fx.service
        .decide(request.id, DecisionAction::Approve, UserId::new(), None)
        .await
        .unwrap();

    for action in [DecisionAction::Approve, DecisionAction::Reject] {
        let err = fx
            .service
            .decide(request.id, action, UserId::new(), Some("late".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CONFLICT");
    }
    assert_eq!(fx.accounts.get(fx.wallet).unwrap().balance, dec!(1400));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_decisions_debit_once() {
    let fx = fixture(dec!(1500));
    let request = fx
        .service
        .create_request(
            fx.org,
            UserId::new(),
            dec!(1000),
            Currency::Usd,
            "bank-001".to_string(),
        )
        .unwrap();

    let barrier = Arc::new(Barrier::new(8));
    let tasks = (0..8).map(|_| {
        let service = Arc::clone(&fx.service);
        let barrier = Arc::clone(&barrier);
        let id = request.id;
        tokio::spawn(async move {
            barrier.wait().await;
            service
                .decide(id, DecisionAction::Approve, UserId::new(), None)
                .await
                .is_ok()
        })
    });

    let successes = join_all(tasks)
        .await
        .into_iter()
        .map(Result::unwrap)
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(fx.accounts.get(fx.wallet).unwrap().balance, dec!(500));
}

#[tokio::test]
async fn test_list_requests_newest_first() {
    let fx = fixture(dec!(1500));
    for amount in [dec!(10), dec!(20)] {
        fx.service
            .create_request(
                fx.org,
                UserId::new(),
                amount,
                Currency::Usd,
                "bank-001".to_string(),
            )
            .unwrap();
    }
    let rows = fx.service.list_requests(fx.org).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].created_at >= rows[1].created_at);
}
