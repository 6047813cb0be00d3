//! Environment-backed configuration for the monitor binary.
//!
//! Values come from the process environment (a `.env` file is honored when
//! present). Every knob has a default so the binary runs against mainnet
//! with no configuration at all.

use crate::classifier::types::ClassifierConfig;
use crate::error::SentinelError;
use serde::Deserialize;

fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_signature_batch() -> usize {
    25
}

fn default_rpc_requests_per_sec() -> u32 {
    10
}

fn default_min_lp_burn_percentage() -> f64 {
    0.99
}

fn default_max_vault_outflow_fraction() -> f64 {
    0.5
}

fn default_max_token_age_minutes() -> u64 {
    u64::MAX
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_signature_batch")]
    pub signature_batch: usize,
    #[serde(default = "default_rpc_requests_per_sec")]
    pub rpc_requests_per_sec: u32,
    #[serde(default = "default_min_lp_burn_percentage")]
    pub min_lp_burn_percentage: f64,
    #[serde(default)]
    pub min_burn_mint_age_minutes: u64,
    #[serde(default = "default_max_token_age_minutes")]
    pub max_token_age_minutes: u64,
    #[serde(default = "default_max_vault_outflow_fraction")]
    pub max_vault_outflow_fraction: f64,
    #[serde(default)]
    pub strict_lp_mode: bool,
}

impl MonitorConfig {
    /// Load from the environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, SentinelError> {
        dotenvy::dotenv().ok();
        let config: MonitorConfig = envy::from_env()
            .map_err(|e| SentinelError::Config(format!("environment parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SentinelError> {
        if !(0.0..=1.0).contains(&self.min_lp_burn_percentage) {
            return Err(SentinelError::Config(
                "MIN_LP_BURN_PERCENTAGE must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.max_vault_outflow_fraction) {
            return Err(SentinelError::Config(
                "MAX_VAULT_OUTFLOW_FRACTION must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.rpc_requests_per_sec == 0 {
            return Err(SentinelError::Config(
                "RPC_REQUESTS_PER_SEC must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The classifier's view of this configuration.
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            min_lp_burn_percentage: self.min_lp_burn_percentage,
            min_burn_mint_age_minutes: self.min_burn_mint_age_minutes,
            max_token_age_minutes: self.max_token_age_minutes,
            max_vault_outflow_fraction: self.max_vault_outflow_fraction,
            strict_lp_mode: self.strict_lp_mode,
        }
    }
}
