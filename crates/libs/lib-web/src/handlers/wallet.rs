//! # Wallet Handlers
//!
//! Read-only wallet queries. None of them needs a signature; the address is
//! public and only validated for shape.
//!
//! ```bash
//! curl http://localhost:3001/api/swap/balances/0x7d20dcdb2bca4f508ea9613994683eb4e76e9c4ed371169677c1be02aaf0b58e
//! curl http://localhost:3001/api/swap/balances/0x7d20.../DEEP
//! curl http://localhost:3001/api/gas-price
//! ```

use axum::{
    extract::{Path, State},
    Json,
};
use lib_core::AppError;
use lib_sui::SuiState;
use shared::{BalancesResponse, GasPriceResponse, TokenBalanceResponse};
use tracing::instrument;

use crate::services::WalletService;

/// **Route**: `GET /api/swap/balances/{walletAddress}`
///
/// A wallet with no coins answers 200 with an empty list.
#[instrument(skip(sui))]
pub async fn get_balances(
    State(sui): State<SuiState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<BalancesResponse>, AppError> {
    let service = WalletService::new(sui.chain);
    Ok(Json(service.balances(&wallet_address).await?))
}

/// **Route**: `GET /api/swap/balances/{walletAddress}/{token}`
#[instrument(skip(sui))]
pub async fn get_token_balance(
    State(sui): State<SuiState>,
    Path((wallet_address, token)): Path<(String, String)>,
) -> Result<Json<TokenBalanceResponse>, AppError> {
    let service = WalletService::new(sui.chain);
    Ok(Json(service.token_balance(&wallet_address, &token).await?))
}

/// **Route**: `GET /api/gas-price`
#[instrument(skip(sui))]
pub async fn get_gas_price(State(sui): State<SuiState>) -> Json<GasPriceResponse> {
    let service = WalletService::new(sui.chain);
    Json(service.gas_price().await)
}
