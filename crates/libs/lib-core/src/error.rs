//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the backend. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! Every variant maps to an HTTP status and a machine-readable code:
//!
//! 1. **Client Errors** (4xx) - raised at the facade boundary before any adapter call
//!    - [`InvalidRequest`](AppError::InvalidRequest) → 400 `INVALID_REQUEST`
//!    - [`InvalidToken`](AppError::InvalidToken) → 400 `INVALID_TOKEN`
//!    - [`InvalidAmount`](AppError::InvalidAmount) → 400 `INVALID_AMOUNT`
//!    - [`InvalidWalletAddress`](AppError::InvalidWalletAddress) → 400 `INVALID_WALLET_ADDRESS`
//!    - [`NotFound`](AppError::NotFound) → 404 `NOT_FOUND`
//!
//! 2. **DEX Conditions** (4xx)
//!    - [`PoolNotFound`](AppError::PoolNotFound) → 404 `POOL_NOT_FOUND`
//!    - [`InsufficientLiquidity`](AppError::InsufficientLiquidity) → 422 `INSUFFICIENT_LIQUIDITY`
//!
//! 3. **Server Errors** (5xx)
//!    - [`TransactionBuildFailed`](AppError::TransactionBuildFailed) → 500 `TRANSACTION_BUILD_FAILED`
//!    - [`Network`](AppError::Network) → 503 `NETWORK_ERROR`
//!    - [`Config`](AppError::Config) / [`Internal`](AppError::Internal) → 500 `INTERNAL_ERROR`
//!
//! ## Response Body
//!
//! ```json
//! { "error": { "message": "Invalid token symbol", "code": "INVALID_TOKEN" } }
//! ```
//!
//! The error itself is attached to the response extensions so the response
//! mapping middleware can add the `stack` field in development mode.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_amount(amount: Option<&str>) -> Result<&str> {
//!     amount.ok_or_else(|| AppError::InvalidRequest("Missing required fields: amountIn".into()))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorBody, ErrorDetail};
use std::sync::Arc;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed body or missing required field.
    #[error("{0}")]
    InvalidRequest(String),

    /// Symbol not present in the token table.
    #[error("{0}")]
    InvalidToken(String),

    /// Amount that does not parse or is not positive.
    #[error("{0}")]
    InvalidAmount(String),

    #[error("{0}")]
    InvalidWalletAddress(String),

    /// Unknown route.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PoolNotFound(String),

    /// Order book too shallow to fill the requested amount.
    #[error("{0}")]
    InsufficientLiquidity(String),

    #[error("{0}")]
    TransactionBuildFailed(String),

    /// Upstream RPC node or indexer unreachable.
    #[error("{0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything unanticipated. The source chain is kept for diagnostics.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_)
            | AppError::InvalidToken(_)
            | AppError::InvalidAmount(_)
            | AppError::InvalidWalletAddress(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::PoolNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientLiquidity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::TransactionBuildFailed(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::InvalidAmount(_) => "INVALID_AMOUNT",
            AppError::InvalidWalletAddress(_) => "INVALID_WALLET_ADDRESS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PoolNotFound(_) => "POOL_NOT_FOUND",
            AppError::InsufficientLiquidity(_) => "INSUFFICIENT_LIQUIDITY",
            AppError::TransactionBuildFailed(_) => "TRANSACTION_BUILD_FAILED",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Config(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Full diagnostic rendering including the source chain.
    ///
    /// Only ever sent to clients in development mode.
    pub fn diagnostic(&self) -> String {
        match self {
            AppError::Internal(err) => format!("{err:?}"),
            other => format!("{other:?}"),
        }
    }

    /// Error body without diagnostics.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                message: self.user_message(),
                code: self.code().to_string(),
                stack: None,
            },
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log error details (full error message for server logs)
        if status.is_server_error() {
            tracing::error!(code = self.code(), "Server error: {:?}", self);
        } else {
            tracing::debug!(code = self.code(), "Client error: {}", self);
        }

        let mut res = (status, Json(self.body())).into_response();
        res.extensions_mut().insert(Arc::new(self));
        res
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidRequest(format!("Invalid JSON: {}", err))
    }
}

impl From<lib_utils::address::Error> for AppError {
    fn from(_: lib_utils::address::Error) -> Self {
        AppError::InvalidWalletAddress("Invalid wallet address format".to_string())
    }
}

impl From<lib_utils::amount::Error> for AppError {
    fn from(err: lib_utils::amount::Error) -> Self {
        AppError::InvalidAmount(format!("Invalid amount: {}", err))
    }
}
