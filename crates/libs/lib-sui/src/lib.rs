//! # Sui Library
//!
//! Sui chain and DeepBook integration: the JSON-RPC chain client, the DeepBook
//! indexer adapter with order-book quoting, and the programmable transaction
//! builder used for unsigned swaps.
//!
//! ```text
//! ┌─────────────┐
//! │  SuiState   │  ← shared by the web layer
//! └──────┬──────┘
//!        ├─► dyn ChainClient  (SuiClient: balances, coins, objects, tx status, submit)
//!        └─► DeepBook         (pools, quotes, swap transactions)
//! ```

// region: --- Modules
pub mod client;
pub mod deepbook;
pub mod error;
pub mod fetched;
pub mod ptb;
// endregion: --- Modules

use lib_core::Config;
use std::sync::Arc;
use tracing::info;

pub use client::{ChainClient, SuiClient};
pub use deepbook::{DeepBook, DeepBookIndexer, DexVenue};
pub use error::{ChainError, DexError};
pub use fetched::Fetched;

/// Chain and DEX adapters, cheap to clone.
#[derive(Clone)]
pub struct SuiState {
    pub chain: Arc<dyn ChainClient>,
    pub deepbook: Arc<DeepBook>,
}

impl SuiState {
    /// Build the HTTP adapters from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let chain = SuiClient::builder().rpc_url(config.rpc_url.clone()).build()?;
        let indexer = DeepBookIndexer::builder()
            .base_url(config.indexer_url.clone())
            .build()?;

        info!(
            network = %config.network,
            rpc = %config.rpc_url,
            indexer = %config.indexer_url,
            "[SUI] Adapters ready"
        );

        Ok(Self::from_parts(
            Arc::new(chain),
            Arc::new(indexer),
            &config.deepbook_package_id,
        ))
    }

    /// Assemble from existing adapters, e.g. in-memory ones.
    pub fn from_parts(chain: Arc<dyn ChainClient>, venue: Arc<dyn DexVenue>, package_id: &str) -> Self {
        Self {
            chain,
            deepbook: Arc::new(DeepBook::new(venue, package_id)),
        }
    }
}
