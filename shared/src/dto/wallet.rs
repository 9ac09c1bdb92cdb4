use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a best-effort read produced data.
///
/// `Empty` means the chain answered with nothing; `Unavailable` means the
/// chain could not be asked and any accompanying value is a placeholder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Ok,
    Empty,
    Unavailable,
}

/// Coin balance as reported by the chain (raw units)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalance {
    pub coin_type: String,
    #[serde(default)]
    pub coin_object_count: u64,
    pub total_balance: String,
}

/// `GET /api/swap/balances/{address}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalancesResponse {
    pub balances: Vec<CoinBalance>,
    pub availability: Availability,
}

/// `GET /api/swap/balances/{address}/{token}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceResponse {
    pub token: String,
    pub coin_type: String,
    pub balance: String,
    pub balance_raw: String,
    pub availability: Availability,
}

/// `GET /api/gas-price`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    pub reference_gas_price: String,
    pub availability: Availability,
}

/// `GET /api/swap/transaction/{digest}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    pub digest: String,
    /// `success`, `failure` or `unknown`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Value>,
}
