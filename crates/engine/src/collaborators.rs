//! External collaborator traits and their default implementations.
//!
//! Pricing and notification live outside the ledger's consistency
//! boundary. Services call these before or after a commit section, never
//! inside one, so a slow collaborator can delay a sweep but can never
//! hold the store lock.

use async_trait::async_trait;
use haulpay_core::settlement::FeeBreakdown;
use haulpay_shared::config::TariffConfig;
use haulpay_shared::error::{AppError, AppResult};
use haulpay_shared::types::{Currency, LoadId, OrganizationId, WithdrawalRequestId};
use haulpay_store::rows::LoadRow;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// Computes the fee breakdown for a load.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Quotes the fare and service fee for a load.
    async fn quote(&self, load: &LoadRow) -> AppResult<FeeBreakdown>;
}

/// An event worth telling the outside world about.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A load settled; the carrier was paid.
    LoadSettled {
        /// The settled load.
        load_id: LoadId,
        /// The paid carrier organization.
        carrier_org: OrganizationId,
        /// Amount credited to the carrier.
        payout: Decimal,
        /// Settlement currency.
        currency: Currency,
    },
    /// A withdrawal was approved and its debit posted.
    WithdrawalApproved {
        /// The approved request.
        request_id: WithdrawalRequestId,
        /// The requesting organization.
        organization_id: OrganizationId,
        /// Amount leaving the wallet.
        amount: Decimal,
        /// Payout currency.
        currency: Currency,
    },
    /// A withdrawal was rejected.
    WithdrawalRejected {
        /// The rejected request.
        request_id: WithdrawalRequestId,
        /// The requesting organization.
        organization_id: OrganizationId,
        /// Why it was rejected.
        reason: String,
    },
}

/// Delivers notifications. Failures are logged and swallowed by callers;
/// a notification must never roll back a posted entry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one event.
    async fn notify(&self, event: NotificationEvent) -> AppResult<()>;
}

/// Default pricing collaborator: a flat tariff from configuration.
///
/// `fare = base_fare + per_km_rate * distance`, fee as a percentage of
/// the fare. Decimal fields are parsed once at construction.
#[derive(Debug, Clone)]
pub struct TariffPricing {
    base_fare: Decimal,
    per_km_rate: Decimal,
    service_fee_pct: Decimal,
}

impl TariffPricing {
    /// Builds a tariff from configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a tariff field is not a decimal or
    /// the fee percentage is outside 0-100.
    pub fn from_config(tariff: &TariffConfig) -> AppResult<Self> {
        let parse = |name: &str, value: &str| {
            value.parse::<Decimal>().map_err(|e| {
                AppError::Validation(format!("tariff.{name} is not a decimal: {e}"))
            })
        };
        let base_fare = parse("base_fare", &tariff.base_fare)?;
        let per_km_rate = parse("per_km_rate", &tariff.per_km_rate)?;
        let service_fee_pct = parse("service_fee_pct", &tariff.service_fee_pct)?;
        if service_fee_pct < Decimal::ZERO || service_fee_pct > Decimal::ONE_HUNDRED {
            return Err(AppError::Validation(format!(
                "tariff.service_fee_pct must be within 0-100, got {service_fee_pct}"
            )));
        }
        Ok(Self {
            base_fare,
            per_km_rate,
            service_fee_pct,
        })
    }
}

#[async_trait]
impl PricingService for TariffPricing {
    async fn quote(&self, load: &LoadRow) -> AppResult<FeeBreakdown> {
        let gross = self.base_fare + self.per_km_rate * load.trip_distance_km;
        let service_fee = load
            .currency
            .round(gross * self.service_fee_pct / Decimal::ONE_HUNDRED);
        Ok(FeeBreakdown {
            base_fare: self.base_fare,
            per_km_rate: self.per_km_rate,
            trip_distance_km: load.trip_distance_km,
            service_fee,
            discount: Decimal::ZERO,
        })
    }
}

/// Default notifier: structured log lines only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: NotificationEvent) -> AppResult<()> {
        match &event {
            NotificationEvent::LoadSettled {
                load_id,
                carrier_org,
                payout,
                currency,
            } => info!(%load_id, %carrier_org, %payout, %currency, "load settled"),
            NotificationEvent::WithdrawalApproved {
                request_id,
                organization_id,
                amount,
                currency,
            } => info!(%request_id, %organization_id, %amount, %currency, "withdrawal approved"),
            NotificationEvent::WithdrawalRejected {
                request_id,
                organization_id,
                reason,
            } => warn!(%request_id, %organization_id, %reason, "withdrawal rejected"),
        }
        Ok(())
    }
}
