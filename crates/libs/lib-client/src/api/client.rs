//! # API Client
//!
//! HTTP client for the SuiTent backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::dto::error::ErrorBody;
use shared::dto::quote::{Quote, QuoteRequest};
use shared::dto::swap::{SwapBuildRequest, SwapBuildResponse, SwapExecuteRequest, SwapExecuteResponse};
use shared::dto::wallet::{BalancesResponse, TransactionStatus};

use super::ApiService;
use crate::error::{ClientError, Result};

/// Used when `BACKEND_URL` is not set
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the backend REST API.
///
/// Holds a pooled `reqwest::Client`; cloning is cheap.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Client for `BACKEND_URL`, or [`DEFAULT_BACKEND_URL`].
    pub fn new() -> Self {
        Self::with_base_url(lib_utils::get_env_or("BACKEND_URL", DEFAULT_BACKEND_URL))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // A 10 second timeout keeps a stalled backend from wedging a hook
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let start = Instant::now();
        let response = self.client.get(self.url(path)).send().await.map_err(|e| {
            tracing::error!(path, error = %e, "GET network error");
            ClientError::from(e)
        })?;

        let result = read_json(response).await;
        tracing::debug!(path, duration_ms = start.elapsed().as_millis(), ok = result.is_ok(), "GET");
        result
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let start = Instant::now();
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path, error = %e, "POST network error");
                ClientError::from(e)
            })?;

        let result = read_json(response).await;
        tracing::debug!(path, duration_ms = start.elapsed().as_millis(), ok = result.is_ok(), "POST");
        result
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a success body, or turn an error body into [`ClientError::Api`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let err = api_error(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), error = %err, "Backend returned an error");
    Err(err)
}

fn api_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error }) => ClientError::Api {
            status,
            code: error.code,
            message: error.message,
        },
        Err(_) => ClientError::Api {
            status,
            code: "UNKNOWN".to_string(),
            message: format!("Request failed: {status}"),
        },
    }
}

#[async_trait]
impl ApiService for ApiClient {
    #[tracing::instrument(skip(self, request), fields(token_in = ?request.token_in, token_out = ?request.token_out))]
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote> {
        self.post_json("/api/price/quote", request).await
    }

    async fn get_balances(&self, address: &str) -> Result<BalancesResponse> {
        self.get_json(&format!("/api/swap/balances/{address}")).await
    }

    #[tracing::instrument(skip(self, request), fields(wallet = ?request.wallet_address))]
    async fn build_swap(&self, request: &SwapBuildRequest) -> Result<SwapBuildResponse> {
        self.post_json("/api/swap/build", request).await
    }

    #[tracing::instrument(skip(self, request), fields(signatures = request.signatures.len()))]
    async fn execute_swap(&self, request: &SwapExecuteRequest) -> Result<SwapExecuteResponse> {
        let response: SwapExecuteResponse = self.post_json("/api/swap/execute", request).await?;
        tracing::info!(digest = %response.digest, status = %response.status, "Swap submitted");
        Ok(response)
    }

    async fn get_transaction(&self, digest: &str) -> Result<TransactionStatus> {
        self.get_json(&format!("/api/swap/transaction/{digest}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:3001/");

        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.url("/api/health"), "http://localhost:3001/api/health");
    }

    #[test]
    fn test_api_error_from_error_body() {
        let body = r#"{"error":{"message":"Invalid token symbol","code":"INVALID_TOKEN"}}"#;

        let err = api_error(400, body);

        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                code: "INVALID_TOKEN".to_string(),
                message: "Invalid token symbol".to_string(),
            }
        );
    }

    #[test]
    fn test_api_error_from_unparseable_body() {
        let err = api_error(502, "<html>Bad Gateway</html>");

        assert_eq!(err.to_string(), "Request failed: 502");
        assert_eq!(err.code(), Some("UNKNOWN"));
    }
}
