//! # System Handlers
//!
//! Service info, health check, and the JSON 404 for unmatched routes.

use axum::{extract::State, http::Uri, Json};
use lib_core::{AppError, Config};
use lib_utils::now_iso;
use shared::{HealthResponse, ServiceInfo};
use std::collections::BTreeMap;
use tracing::info;

pub const SERVICE_NAME: &str = "SuiTent Backend";
pub const SERVICE_VERSION: &str = "1.0.0";

/// Named entry points advertised by `GET /`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("health", "/api/health"),
    ("pools", "/api/pools"),
    ("quote", "/api/price/quote"),
    ("buildSwap", "/api/swap/build"),
    ("executeSwap", "/api/swap/execute"),
    ("balances", "/api/swap/balances/:walletAddress"),
    ("transaction", "/api/swap/transaction/:txDigest"),
    ("gasPrice", "/api/gas-price"),
    ("quoteStream", "/ws/quotes"),
];

/// **Route**: `GET /`
pub async fn service_info(State(config): State<Config>) -> Json<ServiceInfo> {
    let endpoints: BTreeMap<String, String> = ENDPOINTS
        .iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect();

    Json(ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        network: config.network,
        endpoints,
    })
}

/// **Route**: `GET /api/health`
///
/// Does not touch the chain; 200 whenever the process is serving.
pub async fn health(State(config): State<Config>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        network: config.network,
        timestamp: now_iso(),
    })
}

/// Router fallback.
pub async fn not_found(uri: Uri) -> AppError {
    info!("[404 HANDLER] Unmatched route {}", uri.path());
    AppError::NotFound(format!("Route {} not found", uri.path()))
}
