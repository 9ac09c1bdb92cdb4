//! # Swap Handlers
//!
//! ## Request Examples
//!
//! ```bash
//! # Build an unsigned swap of 1 SUI into DEEP with 0.5% slippage
//! curl -X POST http://localhost:3001/api/swap/build \
//!   -H "Content-Type: application/json" \
//!   -d '{
//!     "walletAddress": "0x7d20...",
//!     "tokenIn": "SUI",
//!     "tokenOut": "DEEP",
//!     "amountIn": "1",
//!     "slippage": 0.005
//!   }'
//!
//! # Submit the wallet-signed bytes
//! curl -X POST http://localhost:3001/api/swap/execute \
//!   -H "Content-Type: application/json" \
//!   -d '{"txBytes": "AAAC...", "signatures": ["AJx..."]}'
//!
//! # Poll the result
//! curl http://localhost:3001/api/swap/transaction/5Hq...
//! ```

use axum::{
    extract::{Path, State},
    Json,
};
use lib_core::{AppError, Config};
use lib_sui::SuiState;
use shared::{
    SwapBuildRequest, SwapBuildResponse, SwapExecuteRequest, SwapExecuteResponse, TransactionStatus,
};
use tracing::instrument;

use crate::extract::AppJson;
use crate::services::{SwapService, WalletService};

/// **Route**: `POST /api/swap/build`
///
/// `slippage` is optional and defaults to the configured value.
#[instrument(skip(sui, config))]
pub async fn build_swap(
    State(sui): State<SuiState>,
    State(config): State<Config>,
    AppJson(request): AppJson<SwapBuildRequest>,
) -> Result<Json<SwapBuildResponse>, AppError> {
    let service = SwapService::new(sui, config);
    Ok(Json(service.build(&request).await?))
}

/// **Route**: `POST /api/swap/execute`
#[instrument(skip(sui, config, request))]
pub async fn execute_swap(
    State(sui): State<SuiState>,
    State(config): State<Config>,
    AppJson(request): AppJson<SwapExecuteRequest>,
) -> Result<Json<SwapExecuteResponse>, AppError> {
    let service = SwapService::new(sui, config);
    Ok(Json(service.execute(&request).await?))
}

/// **Route**: `GET /api/swap/transaction/{digest}`
///
/// Unlike balance reads, a failed lookup is an error response.
#[instrument(skip(sui))]
pub async fn get_transaction(
    State(sui): State<SuiState>,
    Path(digest): Path<String>,
) -> Result<Json<TransactionStatus>, AppError> {
    let service = WalletService::new(sui.chain);
    Ok(Json(service.transaction(&digest).await?))
}
