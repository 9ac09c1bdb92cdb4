//! # Adapter Errors
//!
//! Failures raised by the chain and DEX adapters, and their mapping onto
//! [`AppError`] at the service boundary.
//!
//! | Adapter error | `AppError` |
//! |---------------|------------|
//! | [`ChainError::Transport`] | `Network` (503) |
//! | [`ChainError::Rpc`] / [`ChainError::Decode`] | `Internal` (500) |
//! | [`DexError`] (any) | `Network` (503) |

use lib_core::AppError;
use thiserror::Error;

/// Sui JSON-RPC failure.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Node unreachable, timed out, or answered with a non-2xx status.
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The result did not have the expected shape.
    #[error("RPC decode error: {0}")]
    Decode(String),
}

/// DeepBook indexer failure.
#[derive(Debug, Error)]
pub enum DexError {
    #[error("indexer transport error: {0}")]
    Transport(String),

    #[error("indexer returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("indexer decode error: {0}")]
    Decode(String),
}

impl From<ChainError> for AppError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Transport(_) => AppError::Network("Sui RPC node is unreachable".to_string()),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl From<DexError> for AppError {
    fn from(err: DexError) -> Self {
        tracing::warn!("[DEEPBOOK] {}", err);
        AppError::Network("DeepBook indexer is unavailable".to_string())
    }
}
