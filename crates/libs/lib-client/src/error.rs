//! # Client Error Types
//!
//! Errors surfaced by the API client, the hooks and the swap trigger.
//!
//! ## Error Categories
//!
//! - **Network**: the backend could not be reached or timed out
//! - **Api**: the backend answered with an error body (`{"error": {message, code}}`)
//! - **Decode**: a response body did not match the expected shape
//! - **Wallet**: no connected session, or the wallet refused to sign
//! - **Validation**: input rejected before any request was made
//! - **TransactionFailed**: the chain executed the swap with a non-success status
//! - **TriggerUnavailable**: the swap controller behind a trigger has stopped
//!
//! `Display` yields the message shown to the user, so a hook can publish
//! `HookState::Failed(err.to_string())` directly.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// Error body returned by the backend
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    Wallet(String),

    #[error("{0}")]
    Validation(String),

    #[error("Transaction failed with status {0}")]
    TransactionFailed(String),

    #[error("Swap trigger not registered")]
    TriggerUnavailable,
}

impl ClientError {
    /// Backend error code, when the backend produced one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_message() {
        let err = ClientError::Api {
            status: 400,
            code: "INVALID_TOKEN".to_string(),
            message: "Invalid token symbol".to_string(),
        };

        assert_eq!(err.to_string(), "Invalid token symbol");
        assert_eq!(err.code(), Some("INVALID_TOKEN"));
    }

    #[test]
    fn test_network_error_has_no_code() {
        let err = ClientError::Network("connection refused".to_string());

        assert_eq!(err.to_string(), "Network error: connection refused");
        assert!(err.code().is_none());
    }
}
