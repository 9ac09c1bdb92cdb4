//! # Price Handlers
//!
//! ```bash
//! curl -X POST http://localhost:3001/api/price/quote \
//!   -H "Content-Type: application/json" \
//!   -d '{"tokenIn": "SUI", "tokenOut": "DEEP", "amountIn": "1.5"}'
//! ```
//!
//! Quotes walk the live order book of the matching pool, so
//! `estimatedAmountOut` and `priceImpact` reflect book depth rather than the
//! top-of-book price alone.

use axum::{extract::State, Json};
use lib_core::AppError;
use lib_sui::SuiState;
use shared::{Quote, QuoteRequest};
use tracing::instrument;

use crate::extract::AppJson;
use crate::services::QuoteService;

/// **Route**: `POST /api/price/quote`
///
/// # Errors
///
/// - 400 `INVALID_REQUEST`: a field is missing
/// - 400 `INVALID_TOKEN` / `INVALID_AMOUNT`
/// - 404 `POOL_NOT_FOUND`, 422 `INSUFFICIENT_LIQUIDITY`
/// - 503 `NETWORK_ERROR`: the indexer is unreachable
#[instrument(skip(sui))]
pub async fn get_quote(
    State(sui): State<SuiState>,
    AppJson(request): AppJson<QuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    let service = QuoteService::new(sui.deepbook);
    Ok(Json(service.get_quote(&request).await?))
}
