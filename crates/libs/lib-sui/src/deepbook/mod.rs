//! # DeepBook Adapter
//!
//! Pool discovery, order-book quoting and swap transaction construction
//! against DeepBook v3.
//!
//! ```text
//! ┌──────────────┐
//! │   DeepBook   │  ← facade used by the web services
//! └──────┬───────┘
//!        ├─► PoolRegistry    (pool list, 5 min TTL, stale fallback)
//!        ├─► dyn DexVenue    (indexer HTTP: pools, level-2 order book)
//!        └─► swap builder    (programmable transaction, BCS)
//! ```

// region: --- Modules
pub mod book;
pub mod pools;
pub mod quote;
pub mod swap;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
// endregion: --- Modules

use crate::error::DexError;
use async_trait::async_trait;
use shared::Pool;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use pools::{PoolMatch, PoolRegistry, POOL_CACHE_TTL};
pub use quote::{lookup_token, min_amount_out, slippage_from_f64, QuoteOutcome};
pub use swap::SwapOrder;
pub use types::{Level, OrderBook};

/// Order book levels requested per side.
pub const DEFAULT_BOOK_DEPTH: u32 = 20;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// region:    --- Venue trait

/// Market data source for DeepBook pools.
#[async_trait]
pub trait DexVenue: Send + Sync {
    async fn fetch_pools(&self) -> Result<Vec<Pool>, DexError>;

    /// Level-2 book for `pool_name`, `depth` levels per side.
    async fn order_book(&self, pool_name: &str, depth: u32) -> Result<OrderBook, DexError>;
}

// endregion: --- Venue trait

// region:    --- Indexer client

/// Builder for configuring [`DeepBookIndexer`].
#[derive(Debug, Clone, Default)]
pub struct DeepBookIndexerBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl DeepBookIndexerBuilder {
    /// Set the indexer base URL (no trailing slash).
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> anyhow::Result<DeepBookIndexer> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| lib_core::config::DEFAULT_INDEXER_URL.to_string());

        Ok(DeepBookIndexer {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// HTTP client for the DeepBook indexer.
pub struct DeepBookIndexer {
    http: reqwest::Client,
    base_url: String,
}

impl DeepBookIndexer {
    pub fn builder() -> DeepBookIndexerBuilder {
        DeepBookIndexerBuilder::default()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DexError> {
        debug!(url, "[DEEPBOOK] GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DexError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DexError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DexError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DexVenue for DeepBookIndexer {
    async fn fetch_pools(&self) -> Result<Vec<Pool>, DexError> {
        let payload: types::PoolsPayload = self
            .get_json(&format!("{}/get_pools", self.base_url))
            .await?;
        Ok(payload.into_pools())
    }

    async fn order_book(&self, pool_name: &str, depth: u32) -> Result<OrderBook, DexError> {
        let payload: types::OrderBookPayload = self
            .get_json(&format!(
                "{}/orderbook/{}?level=2&depth={}",
                self.base_url, pool_name, depth
            ))
            .await?;
        OrderBook::try_from(payload)
    }
}

// endregion: --- Indexer client

/// DeepBook facade shared by the quote, pool and swap services.
pub struct DeepBook {
    venue: Arc<dyn DexVenue>,
    pools: PoolRegistry,
    package_id: String,
    book_depth: u32,
}

impl DeepBook {
    pub fn new(venue: Arc<dyn DexVenue>, package_id: impl Into<String>) -> Self {
        Self {
            pools: PoolRegistry::new(venue.clone()),
            venue,
            package_id: package_id.into(),
            book_depth: DEFAULT_BOOK_DEPTH,
        }
    }

    pub fn pools(&self) -> &PoolRegistry {
        &self.pools
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }
}
