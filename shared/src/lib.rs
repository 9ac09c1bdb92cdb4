//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the trading clients and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::quote`]**: Quote requests and quotes
//!   - **[`dto::swap`]**: Swap build/execute requests and responses
//!   - **[`dto::wallet`]**: Balances, gas price and transaction status
//!   - **[`dto::pool`]**: DeepBook pool descriptors
//!   - **[`dto::stream`]**: `/ws/quotes` WebSocket frames
//!   - **[`dto::error`]**: Error response body
//!   - **[`dto::system`]**: Health and service info
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::coin_symbol`]**: Symbol from a Move coin type
//!
//! ## Wire Format
//!
//! Field names are **camelCase** in JSON (`tokenIn`, `amountIn`, `txBytes`).
//! Request fields are optional at the type level so the server can answer a
//! missing field with its own `INVALID_REQUEST` error instead of a
//! deserializer rejection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::quote::{Quote, QuoteRequest};
//!
//! # async fn example() -> Result<(), reqwest::Error> {
//! let request = QuoteRequest::new("SUI", "DEEP", "1.5");
//! let quote: Quote = reqwest::Client::new()
//!     .post("http://localhost:3001/api/price/quote")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! println!("{} DEEP", quote.estimated_amount_out);
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
