//! # Pool Handlers
//!
//! ```bash
//! curl http://localhost:3001/api/pools
//! curl http://localhost:3001/api/pools/sui/deep
//! ```
//!
//! The pair lookup upper-cases both symbols and reports `isReversed` when the
//! pool lists them the other way round (`DEEP_SUI` for `SUI/DEEP`).

use axum::{
    extract::{Path, State},
    Json,
};
use lib_core::AppError;
use lib_sui::SuiState;
use shared::{PoolLookupResponse, PoolsResponse};
use tracing::instrument;

use crate::services::PoolService;

/// **Route**: `GET /api/pools`
#[instrument(skip(sui))]
pub async fn list_pools(State(sui): State<SuiState>) -> Result<Json<PoolsResponse>, AppError> {
    let service = PoolService::new(sui.deepbook);
    Ok(Json(service.list().await?))
}

/// **Route**: `GET /api/pools/{base}/{quote}`
///
/// 404 `POOL_NOT_FOUND` when no pool trades the pair.
#[instrument(skip(sui))]
pub async fn get_pool(
    State(sui): State<SuiState>,
    Path((base, quote)): Path<(String, String)>,
) -> Result<Json<PoolLookupResponse>, AppError> {
    let service = PoolService::new(sui.deepbook);
    Ok(Json(service.by_pair(&base, &quote).await?))
}
