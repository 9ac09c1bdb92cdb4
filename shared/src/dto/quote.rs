use serde::{Deserialize, Serialize};

/// Quote request (`POST /api/price/quote`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub token_in: Option<String>,
    pub token_out: Option<String>,
    pub amount_in: Option<String>,
}

impl QuoteRequest {
    pub fn new(token_in: impl Into<String>, token_out: impl Into<String>, amount_in: impl Into<String>) -> Self {
        Self {
            token_in: Some(token_in.into()),
            token_out: Some(token_out.into()),
            amount_in: Some(amount_in.into()),
        }
    }
}

/// Swap quote. Derived on every request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_in_raw: String,
    pub estimated_amount_out: String,
    pub estimated_amount_out_raw: String,
    pub price_per_token: String,
    /// Percentage, two decimals
    pub price_impact: String,
    pub pool_id: String,
}
