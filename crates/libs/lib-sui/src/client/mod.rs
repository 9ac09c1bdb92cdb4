//! # Sui RPC Client
//!
//! Thin adapter over a Sui fullnode's JSON-RPC interface.
//!
//! ## Operations
//!
//! | Method | RPC | On failure |
//! |--------|-----|------------|
//! | [`ChainClient::get_balance`] | `suix_getBalance` | `Fetched::Unavailable` (`"0"` on the wire) |
//! | [`ChainClient::get_all_balances`] | `suix_getAllBalances` | `Fetched::Unavailable` (`[]` on the wire) |
//! | [`ChainClient::get_transaction`] | `sui_getTransactionBlock` | `Err` |
//! | [`ChainClient::reference_gas_price`] | `suix_getReferenceGasPrice` | `Fetched::Unavailable` (`1000`) |
//! | [`ChainClient::get_coins`] | `suix_getCoins` (paged) | `Err` |
//! | [`ChainClient::get_shared_object`] | `sui_getObject` | `Err` |
//! | [`ChainClient::execute_transaction`] | `sui_executeTransactionBlock` | `Err` |
//!
//! The best-effort reads log their failure and return a [`Fetched`] so callers
//! can tell an empty wallet from an unreachable node.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_sui::client::{ChainClient, SuiClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = SuiClient::builder()
//!     .rpc_url("https://fullnode.testnet.sui.io:443".to_string())
//!     .timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! let balances = client.get_all_balances("0x2").await.or_fallback(Vec::new());
//! # Ok(())
//! # }
//! ```

// region: --- Modules
mod rpc;
pub mod types;
// endregion: --- Modules

use crate::error::ChainError;
use crate::fetched::Fetched;
use async_trait::async_trait;
use rpc::{RpcRequest, RpcResponse};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

pub use types::{CoinBalance, CoinObject, CoinPage, SharedObject, TransactionBlock};

/// Gas price reported when the node cannot be asked.
pub const FALLBACK_GAS_PRICE: u64 = 1000;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on `suix_getCoins` pages walked for one owner.
const MAX_COIN_PAGES: usize = 10;

// region:    --- Chain trait

/// Read and submit operations against the Sui chain.
///
/// Implemented by [`SuiClient`]; services depend on the trait so tests can
/// substitute an in-memory chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Total balance of one coin type in raw units.
    async fn get_balance(&self, owner: &str, coin_type: &str) -> Fetched<String>;

    /// All coin balances held by `owner`.
    async fn get_all_balances(&self, owner: &str) -> Fetched<Vec<CoinBalance>>;

    async fn get_transaction(&self, digest: &str) -> Result<TransactionBlock, ChainError>;

    async fn reference_gas_price(&self) -> Fetched<u64>;

    /// Every coin object of `coin_type` owned by `owner`.
    async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinObject>, ChainError>;

    async fn get_shared_object(&self, object_id: &str) -> Result<SharedObject, ChainError>;

    /// Submit a transaction already signed by the wallet.
    async fn execute_transaction(
        &self,
        tx_bytes: &str,
        signatures: &[String],
    ) -> Result<TransactionBlock, ChainError>;
}

// endregion: --- Chain trait

// region:    --- Builder

/// Builder for configuring [`SuiClient`].
#[derive(Debug, Clone, Default)]
pub struct SuiClientBuilder {
    rpc_url: Option<String>,
    timeout: Option<Duration>,
}

impl SuiClientBuilder {
    /// Set the fullnode JSON-RPC URL.
    pub fn rpc_url(mut self, url: String) -> Self {
        self.rpc_url = Some(url);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> anyhow::Result<SuiClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(SuiClient {
            http,
            rpc_url: self
                .rpc_url
                .unwrap_or_else(|| lib_core::config::DEFAULT_RPC_URL.to_string()),
            next_id: AtomicU64::new(1),
        })
    }
}

// endregion: --- Builder

/// JSON-RPC client for a Sui fullnode.
pub struct SuiClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl SuiClient {
    pub fn builder() -> SuiClientBuilder {
        SuiClientBuilder::default()
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Issue one JSON-RPC call and decode its `result`.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "[SUI RPC] call");

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&RpcRequest::new(id, method, params))
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::Transport(format!("{} returned HTTP {}", method, status)));
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Decode(e.to_string()))?;

        if let Some(err) = envelope.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = envelope
            .result
            .ok_or_else(|| ChainError::Decode(format!("{} returned no result", method)))?;

        serde_json::from_value(result).map_err(|e| ChainError::Decode(format!("{}: {}", method, e)))
    }
}

#[async_trait]
impl ChainClient for SuiClient {
    async fn get_balance(&self, owner: &str, coin_type: &str) -> Fetched<String> {
        let result = self
            .call::<CoinBalance>("suix_getBalance", json!([owner, coin_type]))
            .await
            .map(|balance| balance.total_balance);

        let fetched = Fetched::classify(result, |total| total == "0");
        if let Fetched::Unavailable(reason) = &fetched {
            warn!(owner, coin_type, "[SUI RPC] getBalance failed: {}", reason);
        }
        fetched
    }

    async fn get_all_balances(&self, owner: &str) -> Fetched<Vec<CoinBalance>> {
        let result = self
            .call::<Vec<CoinBalance>>("suix_getAllBalances", json!([owner]))
            .await;

        let fetched = Fetched::classify(result, Vec::is_empty);
        if let Fetched::Unavailable(reason) = &fetched {
            warn!(owner, "[SUI RPC] getAllBalances failed: {}", reason);
        }
        fetched
    }

    async fn get_transaction(&self, digest: &str) -> Result<TransactionBlock, ChainError> {
        self.call(
            "sui_getTransactionBlock",
            json!([digest, { "showEffects": true, "showEvents": true }]),
        )
        .await
    }

    async fn reference_gas_price(&self) -> Fetched<u64> {
        let result = self
            .call::<Value>("suix_getReferenceGasPrice", json!([]))
            .await
            .and_then(|value| match value {
                Value::String(s) => s.parse::<u64>().map_err(|e| ChainError::Decode(e.to_string())),
                Value::Number(n) => n
                    .as_u64()
                    .ok_or_else(|| ChainError::Decode(format!("gas price {} is not a u64", n))),
                other => Err(ChainError::Decode(format!("unexpected gas price {}", other))),
            });

        let fetched = Fetched::classify(result, |_| false);
        if let Fetched::Unavailable(reason) = &fetched {
            warn!("[SUI RPC] getReferenceGasPrice failed: {}", reason);
        }
        fetched
    }

    async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinObject>, ChainError> {
        let mut coins = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_COIN_PAGES {
            let page: CoinPage = self
                .call("suix_getCoins", json!([owner, coin_type, cursor, Value::Null]))
                .await?;
            coins.extend(page.data);

            match page.next_cursor {
                Some(next) if page.has_next_page => cursor = Some(next),
                _ => return Ok(coins),
            }
        }

        warn!(
            owner,
            coin_type,
            listed = coins.len(),
            "[SUI RPC] getCoins stopped after {} pages; more coins remain",
            MAX_COIN_PAGES
        );
        Ok(coins)
    }

    async fn get_shared_object(&self, object_id: &str) -> Result<SharedObject, ChainError> {
        let response: types::ObjectResponse = self
            .call("sui_getObject", json!([object_id, { "showOwner": true }]))
            .await?;

        let data = response.data.ok_or_else(|| {
            ChainError::Decode(format!(
                "object {} not found: {}",
                object_id,
                response.error.unwrap_or(Value::Null)
            ))
        })?;

        data.shared()
            .ok_or_else(|| ChainError::Decode(format!("object {} is not shared", data.object_id)))
    }

    async fn execute_transaction(
        &self,
        tx_bytes: &str,
        signatures: &[String],
    ) -> Result<TransactionBlock, ChainError> {
        self.call(
            "sui_executeTransactionBlock",
            json!([
                tx_bytes,
                signatures,
                { "showEffects": true },
                "WaitForLocalExecution"
            ]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = SuiClient::builder().build().unwrap();
        assert_eq!(client.rpc_url(), lib_core::config::DEFAULT_RPC_URL);
    }

    #[test]
    fn test_request_envelope() {
        let req = RpcRequest::new(7, "suix_getAllBalances", json!(["0x2"]));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["params"][0], "0x2");
    }

    #[tokio::test]
    async fn test_unreachable_node_degrades() {
        // Nothing listens on port 9 (discard); the connection is refused
        let client = SuiClient::builder()
            .rpc_url("http://127.0.0.1:9".to_string())
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let balances = client.get_all_balances("0x2").await;
        assert!(balances.is_unavailable());
        assert_eq!(balances.or_fallback(Vec::new()), Vec::new());

        let price = client.reference_gas_price().await;
        assert_eq!(price.or_fallback(FALLBACK_GAS_PRICE), 1000);

        let status = client.get_transaction("digest").await;
        assert!(matches!(status, Err(ChainError::Transport(_))));
    }
}
