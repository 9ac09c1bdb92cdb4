use serde::{Deserialize, Serialize};

/// DeepBook pool for a base/quote pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub pool_id: String,
    /// `BASE_QUOTE`, e.g. `DEEP_SUI`
    pub pool_name: String,
    pub base_coin: String,
    pub quote_coin: String,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub lot_size: String,
    pub tick_size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolsResponse {
    pub pools: Vec<Pool>,
}

/// Pool lookup by pair. `is_reversed` is set when the pair matched as `quote/base`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolLookupResponse {
    pub pool: Pool,
    pub is_reversed: bool,
}
