//! Market data abstractions and core types

use crate::core::currency::Currency;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One asset's market data at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub change_1h: f64,
    pub change_24h: f64,
    pub change_7d: f64,
}

/// Snapshots currently shown, ordered by rank, plus the selected currency
/// and the time of the last successful fetch.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub snapshots: Vec<MarketSnapshot>,
    pub currency: Currency,
    pub last_update: Option<DateTime<Local>>,
}

impl DisplayState {
    pub fn new(currency: Currency) -> Self {
        Self {
            snapshots: Vec::new(),
            currency,
            last_update: None,
        }
    }

    /// Replaces the snapshot list wholesale; there is no incremental merge.
    pub fn replace(&mut self, snapshots: Vec<MarketSnapshot>, fetched_at: DateTime<Local>) {
        self.snapshots = snapshots;
        self.last_update = Some(fetched_at);
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the top `limit` assets by market cap, quoted in `currency`.
    async fn fetch_markets(&self, currency: Currency, limit: usize) -> Result<Vec<MarketSnapshot>>;
}

#[async_trait]
impl<T: MarketDataProvider + ?Sized> MarketDataProvider for Arc<T> {
    async fn fetch_markets(
        &self,
        currency: Currency,
        limit: usize,
    ) -> Result<Vec<MarketSnapshot>> {
        (**self).fetch_markets(currency, limit).await
    }
}
