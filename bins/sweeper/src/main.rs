//! Haulpay settlement sweeper
//!
//! Runs the settlement sweep on a fixed interval: every tick, eligible
//! loads (delivered, POD verified, fee still pending) are priced and
//! settled into the ledger.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haulpay_engine::{LogNotifier, SettlementEngine, TariffPricing};
use haulpay_shared::config::AppConfig;
use haulpay_shared::types::Currency;
use haulpay_store::{AccountRepository, LedgerStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haulpay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        interval_secs = config.sweep.interval_secs,
        batch_size = config.sweep.batch_size,
        "Sweeper configured"
    );

    let store = LedgerStore::new();
    AccountRepository::new(store.clone()).ensure_system_accounts(Currency::Usd)?;

    let pricing = TariffPricing::from_config(&config.tariff)?;
    let engine = SettlementEngine::new(
        store,
        Arc::new(pricing),
        Arc::new(LogNotifier),
        config.sweep.batch_size,
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(config.sweep.interval_secs));
    loop {
        ticker.tick().await;
        match engine.run_sweep().await {
            Ok(summary) => info!(
                total_found = summary.total_found,
                settled = summary.settled_count,
                failed = summary.errors.len(),
                "Sweep complete"
            ),
            Err(e) => error!(error = %e, "Sweep failed"),
        }
    }
}
