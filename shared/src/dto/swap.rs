use serde::{Deserialize, Serialize};

/// Unsigned swap transaction request (`POST /api/swap/build`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapBuildRequest {
    pub wallet_address: Option<String>,
    pub token_in: Option<String>,
    pub token_out: Option<String>,
    pub amount_in: Option<String>,
    /// Fraction, e.g. `0.01` for 1%. Server default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage: Option<f64>,
}

/// Serialized transaction ready for signing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuiltTransaction {
    /// Base64 BCS `TransactionData`
    pub tx_bytes: String,
    pub estimated_gas: String,
}

/// Quote figures the transaction was built from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteSummary {
    pub amount_in: String,
    pub estimated_amount_out: String,
    pub min_amount_out: String,
    pub price_impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapBuildResponse {
    pub transaction: BuiltTransaction,
    pub quote: SwapQuoteSummary,
    pub pool_id: String,
}

/// Signed transaction submission (`POST /api/swap/execute`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapExecuteRequest {
    pub tx_bytes: Option<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapExecuteResponse {
    pub digest: String,
    pub status: String,
}
