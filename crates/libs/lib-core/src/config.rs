//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! Every setting has a default, so the backend starts against Sui testnet with an
//! empty environment. Missing "required" endpoints only produce a warning.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SUI_NETWORK` | `testnet` |
//! | `SUI_RPC_URL` | `https://fullnode.testnet.sui.io:443` |
//! | `DEEPBOOK_INDEXER_URL` | `https://deepbook-indexer.testnet.mystenlabs.com` |
//! | `DEEPBOOK_PACKAGE_ID` | testnet DeepBook v3 package |
//! | `PORT` | `3001` |
//! | `APP_ENV` | `development` |
//! | `FRONTEND_URL` | `http://localhost:3000` |
//! | `DEFAULT_SLIPPAGE` | `0.01` |
//! | `GAS_BUDGET` | `50000000` |
//!
//! ```rust,no_run
//! use lib_core::config::Config;
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//! # Ok::<(), lib_core::AppError>(())
//! ```

use crate::error::{AppError, Result};
use lib_utils::envs::{get_env_opt, get_env_or, get_env_parse_or};
use rust_decimal::Decimal;
use tracing::warn;

pub const DEFAULT_NETWORK: &str = "testnet";
pub const DEFAULT_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";
pub const DEFAULT_INDEXER_URL: &str = "https://deepbook-indexer.testnet.mystenlabs.com";
pub const DEFAULT_DEEPBOOK_PACKAGE_ID: &str =
    "0x22be4cade64bf2d02412c7e8d0e8beea2f78828b948118d46735315409371a3c";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_GAS_BUDGET: u64 = 50_000_000;

/// Variables whose absence is reported at startup.
const REQUIRED_VARS: &[&str] = &["SUI_RPC_URL", "DEEPBOOK_INDEXER_URL"];

/// Runtime mode. Development responses include error diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            RunMode::Production
        } else {
            RunMode::Development
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, RunMode::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Network name reported by `/api/health`
    pub network: String,

    /// Sui fullnode JSON-RPC endpoint
    pub rpc_url: String,

    /// DeepBook indexer base URL
    pub indexer_url: String,

    /// DeepBook v3 package the swap calls target
    pub deepbook_package_id: String,

    pub port: u16,

    pub run_mode: RunMode,

    /// The single origin allowed by CORS
    pub frontend_url: String,

    /// Slippage applied when a build request carries none (fraction, `0.01` = 1%)
    pub default_slippage: Decimal,

    /// Gas budget for built transactions, in MIST
    pub gas_budget: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            indexer_url: DEFAULT_INDEXER_URL.to_string(),
            deepbook_package_id: DEFAULT_DEEPBOOK_PACKAGE_ID.to_string(),
            port: DEFAULT_PORT,
            run_mode: RunMode::Development,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            default_slippage: Decimal::new(1, 2),
            gas_budget: DEFAULT_GAS_BUDGET,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first.
    ///
    /// Unset variables take their defaults; values that are set but malformed
    /// (a non-numeric `PORT`, say) are an error.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; the process environment still applies
        dotenvy::dotenv().ok();

        for name in missing_required_vars() {
            warn!("[CONFIG] {} is not set, using default", name);
        }

        let defaults = Self::default();
        let map_env_err = |e: lib_utils::envs::Error| AppError::Config(e.to_string());

        Ok(Self {
            network: get_env_or("SUI_NETWORK", &defaults.network),
            rpc_url: get_env_or("SUI_RPC_URL", &defaults.rpc_url),
            indexer_url: get_env_or("DEEPBOOK_INDEXER_URL", &defaults.indexer_url)
                .trim_end_matches('/')
                .to_string(),
            deepbook_package_id: get_env_or("DEEPBOOK_PACKAGE_ID", &defaults.deepbook_package_id),
            port: get_env_parse_or("PORT", defaults.port).map_err(map_env_err)?,
            run_mode: RunMode::parse(&get_env_or("APP_ENV", defaults.run_mode.as_str())),
            frontend_url: get_env_or("FRONTEND_URL", &defaults.frontend_url),
            default_slippage: get_env_parse_or("DEFAULT_SLIPPAGE", defaults.default_slippage)
                .map_err(map_env_err)?,
            gas_budget: get_env_parse_or("GAS_BUDGET", defaults.gas_budget).map_err(map_env_err)?,
        })
    }

    /// Validate configuration values against business rules.
    pub fn validate(&self) -> Result<()> {
        if self.default_slippage < Decimal::ZERO || self.default_slippage >= Decimal::ONE {
            return Err(AppError::Config(format!(
                "DEFAULT_SLIPPAGE must be in [0, 1), got {}",
                self.default_slippage
            )));
        }

        if self.gas_budget == 0 {
            return Err(AppError::Config("GAS_BUDGET must be positive".to_string()));
        }

        if lib_utils::address::normalize_sui_address(&self.deepbook_package_id).is_err() {
            return Err(AppError::Config(format!(
                "DEEPBOOK_PACKAGE_ID is not a valid object id: {}",
                self.deepbook_package_id
            )));
        }

        Ok(())
    }
}

/// Names of required variables that are unset.
pub fn missing_required_vars() -> Vec<&'static str> {
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| get_env_opt(name).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_slippage.to_string(), "0.01");
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn test_rejects_out_of_range_slippage() {
        let config = Config {
            default_slippage: Decimal::ONE,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_run_mode_parse() {
        assert_eq!(RunMode::parse("production"), RunMode::Production);
        assert_eq!(RunMode::parse("PRODUCTION"), RunMode::Production);
        assert_eq!(RunMode::parse("staging"), RunMode::Development);
    }
}
