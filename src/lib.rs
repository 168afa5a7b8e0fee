pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::providers::CoinGeckoProvider;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Live dashboard refreshed on a fixed interval.
    Watch {
        currency: Option<Currency>,
        interval_ms: Option<u64>,
    },
    /// A single fetch rendered once.
    Show { currency: Option<Currency> },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Coinboard starting...");

    let mut config = load_config(config_path)?;
    match command {
        AppCommand::Watch {
            currency,
            interval_ms,
        } => {
            config.currency = currency.unwrap_or(config.currency);
            config.refresh_interval_ms = interval_ms.unwrap_or(config.refresh_interval_ms);
        }
        AppCommand::Show { currency } => {
            config.currency = currency.unwrap_or(config.currency);
        }
    }
    config.validate()?;
    debug!("Loaded config: {config:#?}");

    let provider = CoinGeckoProvider::new(
        config.coingecko_url(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    match command {
        AppCommand::Watch { .. } => cli::board::watch(provider, &config).await,
        AppCommand::Show { .. } => cli::board::show(provider, &config).await,
    }
}
