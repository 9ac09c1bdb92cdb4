//! # DeepBook Indexer Types

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use shared::Pool;
use std::str::FromStr;

use crate::error::DexError;

const DEFAULT_BASE_DECIMALS: u8 = 9;
const DEFAULT_QUOTE_DECIMALS: u8 = 6;
const DEFAULT_LOT_SIZE: &str = "1000000";
const DEFAULT_TICK_SIZE: &str = "1000";

/// `GET /get_pools` answers either a bare array or `{"pools": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PoolsPayload {
    List(Vec<IndexerPool>),
    Wrapped {
        #[serde(default)]
        pools: Vec<IndexerPool>,
    },
}

impl PoolsPayload {
    pub fn into_pools(self) -> Vec<Pool> {
        let raw = match self {
            PoolsPayload::List(pools) | PoolsPayload::Wrapped { pools } => pools,
        };
        raw.into_iter().map(Pool::from).collect()
    }
}

/// Pool record as served by the indexer.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerPool {
    pub pool_id: String,
    pub pool_name: String,
    pub base_asset_symbol: String,
    pub quote_asset_symbol: String,
    #[serde(default)]
    pub base_asset_decimals: Option<u8>,
    #[serde(default)]
    pub quote_asset_decimals: Option<u8>,
    #[serde(default)]
    pub lot_size: Option<Value>,
    #[serde(default)]
    pub tick_size: Option<Value>,
}

/// Numbers and strings both render as their plain text.
fn size_text(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

impl From<IndexerPool> for Pool {
    fn from(raw: IndexerPool) -> Self {
        Pool {
            lot_size: size_text(raw.lot_size.as_ref(), DEFAULT_LOT_SIZE),
            tick_size: size_text(raw.tick_size.as_ref(), DEFAULT_TICK_SIZE),
            pool_id: raw.pool_id,
            pool_name: raw.pool_name,
            base_coin: raw.base_asset_symbol,
            quote_coin: raw.quote_asset_symbol,
            // Zero is treated as missing, matching the indexer's sparse records
            base_decimals: raw
                .base_asset_decimals
                .filter(|d| *d > 0)
                .unwrap_or(DEFAULT_BASE_DECIMALS),
            quote_decimals: raw
                .quote_asset_decimals
                .filter(|d| *d > 0)
                .unwrap_or(DEFAULT_QUOTE_DECIMALS),
        }
    }
}

// region:    --- Order book

/// One price level: price in quote per base, quantity in base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Level-2 order book. Bids are sorted best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

/// `GET /orderbook/{pool_name}` payload; levels are `["price", "quantity"]`.
#[derive(Debug, Deserialize)]
pub struct OrderBookPayload {
    #[serde(default)]
    pub bids: Vec<(Value, Value)>,
    #[serde(default)]
    pub asks: Vec<(Value, Value)>,
}

fn decimal(value: &Value) -> Result<Decimal, DexError> {
    let parsed = match value {
        Value::String(s) => Decimal::from_str(s),
        Value::Number(n) => Decimal::from_str(&n.to_string()),
        other => return Err(DexError::Decode(format!("expected decimal, got {other}"))),
    };
    parsed.map_err(|e| DexError::Decode(format!("bad decimal {value}: {e}")))
}

fn levels(raw: &[(Value, Value)]) -> Result<Vec<Level>, DexError> {
    raw.iter()
        .map(|(price, quantity)| {
            Ok(Level {
                price: decimal(price)?,
                quantity: decimal(quantity)?,
            })
        })
        .filter(|level: &Result<Level, DexError>| match level {
            Ok(l) => l.price > Decimal::ZERO && l.quantity > Decimal::ZERO,
            Err(_) => true,
        })
        .collect()
}

impl TryFrom<OrderBookPayload> for OrderBook {
    type Error = DexError;

    fn try_from(payload: OrderBookPayload) -> Result<Self, Self::Error> {
        let mut bids = levels(&payload.bids)?;
        let mut asks = levels(&payload.asks)?;
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(OrderBook { bids, asks })
    }
}

// endregion: --- Order book
