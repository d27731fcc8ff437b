//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Settlement sweep configuration.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Pricing tariff configuration.
    #[serde(default)]
    pub tariff: TariffConfig,
}

/// Settlement sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Seconds between sweep runs.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Maximum loads settled per run (0 = unlimited).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_interval_secs() -> u64 {
    300 // 5 minutes
}

fn default_batch_size() -> usize {
    100
}

/// Pricing tariff configuration for the default pricing collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffConfig {
    /// Base fare in minor units of the default currency, as a string
    /// (decimal values in config files stay exact).
    #[serde(default = "default_base_fare")]
    pub base_fare: String,
    /// Per-kilometre rate, as a string.
    #[serde(default = "default_per_km_rate")]
    pub per_km_rate: String,
    /// Service fee percentage of the total fare (0-100), as a string.
    #[serde(default = "default_service_fee_pct")]
    pub service_fee_pct: String,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            base_fare: default_base_fare(),
            per_km_rate: default_per_km_rate(),
            service_fee_pct: default_service_fee_pct(),
        }
    }
}

fn default_base_fare() -> String {
    "500".to_string()
}

fn default_per_km_rate() -> String {
    "15.5".to_string()
}

fn default_service_fee_pct() -> String {
    "10".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("HAULPAY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
