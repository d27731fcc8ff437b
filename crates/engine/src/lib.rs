//! Service layer for Haulpay.
//!
//! Three services over the repository layer: `LedgerService` for posting
//! and reporting, `SettlementEngine` for the periodic sweep, and
//! `WithdrawalService` for the payout workflow. External collaborators
//! (pricing, notifications) enter through the traits in
//! [`collaborators`], so the services never hold a store lock across an
//! external call.

pub mod collaborators;
pub mod ledger;
pub mod settlement;
pub mod withdrawal;

pub use collaborators::{LogNotifier, NotificationEvent, Notifier, PricingService, TariffPricing};
pub use ledger::LedgerService;
pub use settlement::{SettlementEngine, SweepSummary};
pub use withdrawal::WithdrawalService;
