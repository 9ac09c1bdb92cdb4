//! # Services Layer
//!
//! Business logic between the HTTP handlers and the Sui adapters. Handlers
//! stay thin: they extract, call a service, and wrap the result in `Json`.
//!
//! ```text
//! Handlers (HTTP) → Services (validation, shaping) → lib-sui (ChainClient, DeepBook)
//! ```
//!
//! ## Module Organization
//!
//! - [`quote`] - Quote request validation and pricing
//! - [`swap`] - Unsigned swap building and signed transaction submission
//! - [`wallet`] - Balances, gas price and transaction status
//! - [`pools`] - DeepBook pool listing and pair lookup
//!
//! All services return `Result<T, AppError>`; adapter errors are converted at
//! the `lib-sui` boundary.

pub mod pools;
pub mod quote;
pub mod swap;
pub mod wallet;

pub use pools::PoolService;
pub use quote::{QuoteParams, QuoteService};
pub use swap::SwapService;
pub use wallet::WalletService;

/// Message for the quote family of requests when a field is absent.
pub(crate) fn missing_fields_error(required: &[&str]) -> lib_core::AppError {
    lib_core::AppError::InvalidRequest(format!("Missing required fields: {}", required.join(", ")))
}
