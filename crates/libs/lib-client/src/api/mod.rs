//! # Backend API
//!
//! [`ApiService`] is the seam between the hooks and the backend. [`ApiClient`]
//! implements it over HTTP; tests substitute an in-memory implementation.

mod client;

pub use client::{ApiClient, DEFAULT_BACKEND_URL};

use async_trait::async_trait;
use shared::dto::quote::{Quote, QuoteRequest};
use shared::dto::swap::{SwapBuildRequest, SwapBuildResponse, SwapExecuteRequest, SwapExecuteResponse};
use shared::dto::wallet::{BalancesResponse, TransactionStatus};

use crate::error::Result;

/// Backend operations used by the hooks and the swap controller.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// `POST /api/price/quote`
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote>;

    /// `GET /api/swap/balances/{address}`
    async fn get_balances(&self, address: &str) -> Result<BalancesResponse>;

    /// `POST /api/swap/build`, returns an unsigned transaction
    async fn build_swap(&self, request: &SwapBuildRequest) -> Result<SwapBuildResponse>;

    /// `POST /api/swap/execute` with wallet signatures
    async fn execute_swap(&self, request: &SwapExecuteRequest) -> Result<SwapExecuteResponse>;

    /// `GET /api/swap/transaction/{digest}`
    async fn get_transaction(&self, digest: &str) -> Result<TransactionStatus>;
}
