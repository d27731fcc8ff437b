//! Settlement engine: the periodic sweep over settleable loads.

use std::sync::Arc;

use haulpay_core::ledger::{AccountType, EntryInput, TransactionType};
use haulpay_core::settlement::{build_settlement_lines, SettlementAccounts};
use haulpay_shared::error::{AppError, AppResult};
use haulpay_store::rows::LoadRow;
use haulpay_store::{AccountRepository, LedgerStore, LoadRepository, SettleOutcome};
use tracing::{info, warn};

use crate::collaborators::{NotificationEvent, Notifier, PricingService};

/// Outcome of one sweep run.
#[derive(Debug, Default)]
pub struct SweepSummary {
    /// Settleable loads found by the candidate scan.
    pub total_found: usize,
    /// Loads actually settled this run.
    pub settled_count: usize,
    /// Loads another actor settled between scan and commit.
    pub already_settled: usize,
    /// Per-load failures; the sweep continues past each.
    pub errors: Vec<(String, AppError)>,
}

/// Settles delivered loads: quotes the fee, posts the settlement entry,
/// flips the marker, notifies the carrier.
pub struct SettlementEngine {
    accounts: AccountRepository,
    loads: LoadRepository,
    pricing: Arc<dyn PricingService>,
    notifier: Arc<dyn Notifier>,
    batch_size: usize,
}

impl SettlementEngine {
    /// Creates a settlement engine over a store and its collaborators.
    #[must_use]
    pub fn new(
        store: LedgerStore,
        pricing: Arc<dyn PricingService>,
        notifier: Arc<dyn Notifier>,
        batch_size: usize,
    ) -> Self {
        Self {
            accounts: AccountRepository::new(store.clone()),
            loads: LoadRepository::new(store),
            pricing,
            notifier,
            batch_size,
        }
    }

    /// The load repository this engine sweeps.
    #[must_use]
    pub const fn loads(&self) -> &LoadRepository {
        &self.loads
    }

    /// Runs one sweep: scan candidates, settle each at most once.
    ///
    /// A failure on one load is recorded and the sweep moves on; a load
    /// settled by a racing sweep counts as `already_settled`, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the candidate scan itself fails.
    pub async fn run_sweep(&self) -> AppResult<SweepSummary> {
        let limit = if self.batch_size == 0 {
            usize::MAX
        } else {
            self.batch_size
        };
        let candidates = self.loads.find_settleable(limit)?;

        let mut summary = SweepSummary {
            total_found: candidates.len(),
            ..SweepSummary::default()
        };

        for load in candidates {
            match self.settle_load(&load).await {
                Ok(Some(payout)) => {
                    summary.settled_count += 1;
                    // Posted and committed; a failed notification must not
                    // fail the sweep.
                    if let Err(e) = self
                        .notifier
                        .notify(NotificationEvent::LoadSettled {
                            load_id: load.id,
                            carrier_org: load.carrier_org,
                            payout,
                            currency: load.currency,
                        })
                        .await
                    {
                        warn!(load_id = %load.id, error = %e, "settlement notification failed");
                    }
                }
                Ok(None) => summary.already_settled += 1,
                Err(e) => {
                    warn!(load_id = %load.id, error = %e, "load settlement failed");
                    summary.errors.push((load.id.to_string(), e));
                }
            }
        }

        info!(
            total_found = summary.total_found,
            settled = summary.settled_count,
            already_settled = summary.already_settled,
            failed = summary.errors.len(),
            "settlement sweep finished"
        );
        Ok(summary)
    }

    /// Settles one load. Returns the carrier payout, or `None` if the
    /// load was already settled.
    ///
    /// The pricing call happens before the commit section; the marker
    /// re-check inside `settle` makes a stale quote harmless.
    async fn settle_load(&self, load: &LoadRow) -> AppResult<Option<rust_decimal::Decimal>> {
        let breakdown = self.pricing.quote(load).await?;

        let payer = self
            .accounts
            .find(
                Some(load.shipper_org),
                AccountType::ShipperWallet,
                load.currency,
            )?
            .id;
        let carrier = self
            .accounts
            .find(
                Some(load.carrier_org),
                AccountType::CarrierWallet,
                load.currency,
            )?
            .id;
        let platform_revenue = self
            .accounts
            .find(None, AccountType::PlatformRevenue, load.currency)?
            .id;

        let lines = build_settlement_lines(
            &SettlementAccounts {
                payer,
                carrier,
                platform_revenue,
            },
            &breakdown,
            load.currency,
        )?;
        let payout = breakdown.carrier_payout(load.currency);

        let input = EntryInput {
            transaction_type: TransactionType::Settlement,
            reference: load.id.to_string(),
            description: format!("Settlement for load {}", load.id),
            lines,
        };

        match self.loads.settle(load.id, input)? {
            SettleOutcome::Settled(_) => Ok(Some(payout)),
            SettleOutcome::AlreadySettled => Ok(None),
        }
    }
}
