//! # Wallet Service
//!
//! Read-only chain queries for a wallet: balances, the reference gas price,
//! and transaction status.
//!
//! Balance and gas reads are best effort. An unreachable node yields the
//! fallback value (`[]`, `"0"`, `1000`) with `availability: "unavailable"`
//! rather than an error, and a wallet holding nothing is never a 404.

use lib_core::{tokens, AppError, Result};
use lib_sui::client::FALLBACK_GAS_PRICE;
use lib_sui::ChainClient;
use lib_utils::{from_raw_amount, normalize_sui_address};
use shared::{BalancesResponse, GasPriceResponse, TokenBalanceResponse, TransactionStatus};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct WalletService {
    chain: Arc<dyn ChainClient>,
}

impl WalletService {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// All coin balances held by `address`.
    #[instrument(skip(self))]
    pub async fn balances(&self, address: &str) -> Result<BalancesResponse> {
        let address = normalize_sui_address(address)?;
        let fetched = self.chain.get_all_balances(&address).await;
        let availability = fetched.availability();
        let balances = fetched.or_fallback(Vec::new());

        debug!(count = balances.len(), ?availability, "[WALLET] Balances");
        Ok(BalancesResponse {
            balances,
            availability,
        })
    }

    /// Balance of one configured token.
    #[instrument(skip(self))]
    pub async fn token_balance(&self, address: &str, symbol: &str) -> Result<TokenBalanceResponse> {
        let address = normalize_sui_address(address)?;
        let token = tokens::token(&symbol.trim().to_uppercase())
            .ok_or_else(|| AppError::InvalidToken("Invalid token symbol".to_string()))?;

        let fetched = self.chain.get_balance(&address, token.coin_type).await;
        let availability = fetched.availability();
        let raw = fetched.or_fallback("0".to_string());
        let balance = raw
            .parse::<u128>()
            .map(|raw| from_raw_amount(raw, token.decimals))
            .map_err(|_| AppError::Internal(anyhow::anyhow!("non-numeric balance {raw}")))?;

        Ok(TokenBalanceResponse {
            token: token.symbol.to_string(),
            coin_type: token.coin_type.to_string(),
            balance,
            balance_raw: raw,
            availability,
        })
    }

    #[instrument(skip(self))]
    pub async fn gas_price(&self) -> GasPriceResponse {
        let fetched = self.chain.reference_gas_price().await;
        let availability = fetched.availability();
        GasPriceResponse {
            reference_gas_price: fetched.or_fallback(FALLBACK_GAS_PRICE).to_string(),
            availability,
        }
    }

    /// Status of a submitted transaction. Adapter failures propagate.
    #[instrument(skip(self))]
    pub async fn transaction(&self, digest: &str) -> Result<TransactionStatus> {
        let block = self.chain.get_transaction(digest.trim()).await?;
        Ok(TransactionStatus {
            status: block.status(),
            gas_used: block.gas_used(),
            digest: block.digest,
            timestamp: block.timestamp_ms,
            effects: block.effects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_sui::deepbook::testing::{FakeChain, WALLET};
    use shared::Availability;

    #[tokio::test]
    async fn test_token_balance_formats_display_amount() {
        let service = WalletService::new(Arc::new(FakeChain::funded()));

        let deep = service.token_balance("0xa1", "deep").await.unwrap();

        assert_eq!(deep.token, "DEEP");
        assert_eq!(deep.balance_raw, "150000000");
        assert_eq!(deep.balance, "150");
        assert_eq!(deep.availability, Availability::Ok);
    }

    #[tokio::test]
    async fn test_token_balance_for_unheld_token_is_zero() {
        let service = WalletService::new(Arc::new(FakeChain::funded()));

        let wal = service.token_balance(WALLET, "WAL").await.unwrap();

        assert_eq!(wal.balance, "0");
        assert_eq!(wal.availability, Availability::Empty);
    }

    #[tokio::test]
    async fn test_unreachable_node_degrades() {
        let chain = FakeChain::funded();
        chain.set_offline(true);
        let service = WalletService::new(Arc::new(chain));

        let balances = service.balances(WALLET).await.unwrap();
        let gas = service.gas_price().await;

        assert!(balances.balances.is_empty());
        assert_eq!(balances.availability, Availability::Unavailable);
        assert_eq!(gas.reference_gas_price, "1000");
        assert_eq!(gas.availability, Availability::Unavailable);
    }
}
