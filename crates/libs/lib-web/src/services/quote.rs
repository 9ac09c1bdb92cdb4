//! # Quote Service
//!
//! Validates quote requests and prices them against DeepBook. Shared by
//! `POST /api/price/quote` and the `/ws/quotes` stream.

use lib_core::Result;
use lib_sui::DeepBook;
use lib_utils::validation::missing_fields;
use shared::{Quote, QuoteRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::missing_fields_error;

const REQUIRED: &[&str] = &["tokenIn", "tokenOut", "amountIn"];

/// A quote request with every field present and symbols upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
}

impl QuoteParams {
    /// `None` when any field is absent or blank.
    pub fn from_request(request: &QuoteRequest) -> Option<Self> {
        let missing = missing_fields(&[
            ("tokenIn", request.token_in.as_deref()),
            ("tokenOut", request.token_out.as_deref()),
            ("amountIn", request.amount_in.as_deref()),
        ]);
        if !missing.is_empty() {
            debug!(missing = ?missing, "[QUOTE] Incomplete request");
            return None;
        }

        Some(Self {
            token_in: request.token_in.as_deref()?.trim().to_uppercase(),
            token_out: request.token_out.as_deref()?.trim().to_uppercase(),
            amount_in: request.amount_in.as_deref()?.trim().to_string(),
        })
    }

    pub fn parse(request: &QuoteRequest) -> Result<Self> {
        Self::from_request(request).ok_or_else(|| missing_fields_error(REQUIRED))
    }
}

#[derive(Clone)]
pub struct QuoteService {
    deepbook: Arc<DeepBook>,
}

impl QuoteService {
    pub fn new(deepbook: Arc<DeepBook>) -> Self {
        Self { deepbook }
    }

    #[instrument(skip(self))]
    pub async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let params = QuoteParams::parse(request)?;
        self.quote(&params).await
    }

    pub async fn quote(&self, params: &QuoteParams) -> Result<Quote> {
        let outcome = self
            .deepbook
            .quote(&params.token_in, &params.token_out, &params.amount_in)
            .await?;
        Ok(outcome.quote)
    }
}
