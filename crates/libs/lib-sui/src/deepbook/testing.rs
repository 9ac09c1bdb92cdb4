//! In-memory venue and chain used by unit tests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::Pool;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::{DeepBook, DexVenue, Level, OrderBook};
use crate::client::{ChainClient, CoinBalance, CoinObject, SharedObject, TransactionBlock};
use crate::error::{ChainError, DexError};
use crate::fetched::Fetched;

pub const DEEP_SUI_POOL: &str = "0x48c95963e9eac37a316b7ae04a0deb761bcdcc2b67912374d6036e7f0e9bae9f";

pub const WALLET: &str = "0x00000000000000000000000000000000000000000000000000000000000000a1";

pub fn sample_pools() -> Vec<Pool> {
    vec![
        Pool {
            pool_id: DEEP_SUI_POOL.to_string(),
            pool_name: "DEEP_SUI".to_string(),
            base_coin: "DEEP".to_string(),
            quote_coin: "SUI".to_string(),
            base_decimals: 6,
            quote_decimals: 9,
            lot_size: "1000000".to_string(),
            tick_size: "10000000".to_string(),
        },
        Pool {
            pool_id: "0x5a1d".to_string(),
            pool_name: "SUI_DBUSDC".to_string(),
            base_coin: "SUI".to_string(),
            quote_coin: "DBUSDC".to_string(),
            base_decimals: 9,
            quote_decimals: 6,
            lot_size: "1000000".to_string(),
            tick_size: "1000".to_string(),
        },
    ]
}

fn levels(raw: &[(&str, &str)]) -> Vec<Level> {
    raw.iter()
        .map(|(price, quantity)| Level {
            price: Decimal::from_str(price).unwrap(),
            quantity: Decimal::from_str(quantity).unwrap(),
        })
        .collect()
}

pub struct FakeVenue {
    pools: Vec<Pool>,
    book: OrderBook,
    offline: AtomicBool,
    pool_fetches: AtomicUsize,
}

impl FakeVenue {
    pub fn new(pools: Vec<Pool>) -> Self {
        Self {
            pools,
            book: OrderBook::default(),
            offline: AtomicBool::new(false),
            pool_fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_book(mut self, bids: &[(&str, &str)], asks: &[(&str, &str)]) -> Self {
        self.book = OrderBook {
            bids: levels(bids),
            asks: levels(asks),
        };
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn pool_fetches(&self) -> usize {
        self.pool_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DexVenue for FakeVenue {
    async fn fetch_pools(&self) -> Result<Vec<Pool>, DexError> {
        self.pool_fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(DexError::Transport("connection refused".into()));
        }
        Ok(self.pools.clone())
    }

    async fn order_book(&self, _pool_name: &str, _depth: u32) -> Result<OrderBook, DexError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DexError::Transport("connection refused".into()));
        }
        Ok(self.book.clone())
    }
}

pub fn deepbook_with_book(bids: &[(&str, &str)], asks: &[(&str, &str)]) -> DeepBook {
    let venue = FakeVenue::new(sample_pools()).with_book(bids, asks);
    DeepBook::new(Arc::new(venue), lib_core::config::DEFAULT_DEEPBOOK_PACKAGE_ID)
}

fn coin(coin_type: &str, id: u8, balance: u128) -> CoinObject {
    CoinObject {
        coin_type: coin_type.to_string(),
        coin_object_id: format!("0x{:064x}", id),
        version: 7,
        digest: bs58::encode([id; 32]).into_string(),
        balance,
    }
}

pub struct FakeChain {
    coins: Vec<CoinObject>,
    balances: Vec<CoinBalance>,
    transactions: Vec<TransactionBlock>,
    offline: AtomicBool,
    executed: AtomicUsize,
    coin_listing_limit: Option<usize>,
}

impl FakeChain {
    fn with_coins(coins: Vec<CoinObject>) -> Self {
        Self {
            coins,
            balances: Vec::new(),
            transactions: Vec::new(),
            offline: AtomicBool::new(false),
            executed: AtomicUsize::new(0),
            coin_listing_limit: None,
        }
    }

    /// 10 SUI in one coin, 150 DEEP across two coins.
    pub fn funded() -> Self {
        let sui = lib_core::tokens::token("SUI").unwrap().coin_type;
        let deep = lib_core::tokens::token("DEEP").unwrap().coin_type;
        let mut chain = Self::with_coins(vec![
            coin(sui, 1, 10_000_000_000),
            coin(deep, 2, 100_000_000),
            coin(deep, 3, 50_000_000),
        ]);
        chain.balances = vec![
            CoinBalance {
                coin_type: sui.to_string(),
                coin_object_count: 1,
                total_balance: "10000000000".to_string(),
            },
            CoinBalance {
                coin_type: deep.to_string(),
                coin_object_count: 2,
                total_balance: "150000000".to_string(),
            },
        ];
        chain
    }

    pub fn empty() -> Self {
        Self::with_coins(Vec::new())
    }

    /// Return at most `limit` coins per listing, like a capped page walk.
    pub fn with_coin_listing_limit(mut self, limit: usize) -> Self {
        self.coin_listing_limit = Some(limit);
        self
    }

    pub fn with_transaction(mut self, block: TransactionBlock) -> Self {
        self.transactions.push(block);
        self
    }

    /// Every read fails at the transport layer.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn get_balance(&self, _owner: &str, coin_type: &str) -> Fetched<String> {
        if self.is_offline() {
            return Fetched::Unavailable("connection refused".into());
        }
        match self.balances.iter().find(|b| b.coin_type == coin_type) {
            Some(balance) => Fetched::Ready(balance.total_balance.clone()),
            None => Fetched::Empty,
        }
    }

    async fn get_all_balances(&self, _owner: &str) -> Fetched<Vec<CoinBalance>> {
        if self.is_offline() {
            return Fetched::Unavailable("connection refused".into());
        }
        if self.balances.is_empty() {
            Fetched::Empty
        } else {
            Fetched::Ready(self.balances.clone())
        }
    }

    async fn get_transaction(&self, digest: &str) -> Result<TransactionBlock, ChainError> {
        if self.is_offline() {
            return Err(ChainError::Transport("connection refused".into()));
        }
        self.transactions
            .iter()
            .find(|block| block.digest == digest)
            .cloned()
            .ok_or_else(|| ChainError::Rpc {
                code: -32602,
                message: format!("unknown digest {digest}"),
            })
    }

    async fn reference_gas_price(&self) -> Fetched<u64> {
        if self.is_offline() {
            return Fetched::Unavailable("connection refused".into());
        }
        Fetched::Ready(1000)
    }

    async fn get_coins(&self, _owner: &str, coin_type: &str) -> Result<Vec<CoinObject>, ChainError> {
        if self.is_offline() {
            return Err(ChainError::Transport("connection refused".into()));
        }
        Ok(self
            .coins
            .iter()
            .filter(|c| c.coin_type == coin_type)
            .take(self.coin_listing_limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn get_shared_object(&self, _object_id: &str) -> Result<SharedObject, ChainError> {
        Ok(SharedObject {
            initial_shared_version: 389_750_322,
        })
    }

    async fn execute_transaction(
        &self,
        tx_bytes: &str,
        _signatures: &[String],
    ) -> Result<TransactionBlock, ChainError> {
        if self.is_offline() {
            return Err(ChainError::Transport("connection refused".into()));
        }
        self.executed.fetch_add(1, Ordering::SeqCst);
        Ok(TransactionBlock {
            digest: format!("digest-{}", tx_bytes.len()),
            effects: Some(serde_json::json!({ "status": { "status": "success" } })),
            timestamp_ms: None,
        })
    }
}
