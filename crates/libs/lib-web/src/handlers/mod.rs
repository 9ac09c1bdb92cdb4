//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Each handler extracts its
//! inputs, delegates to a service in [`crate::services`], and returns
//! `Result<Json<T>, AppError>`; errors render as
//! `{"error": {"message", "code"}}` with the status of their variant.
//!
//! ## Handler Modules
//!
//! - **[`system`]**: service info, health, unknown routes
//!   - `GET /` - Service name, version and endpoint map
//!   - `GET /api/health` - Liveness, always 200
//!
//! - **[`pools`]**: DeepBook pools
//!   - `GET /api/pools` - Every pool the indexer reports
//!   - `GET /api/pools/{base}/{quote}` - Pool for a pair in either orientation
//!
//! - **[`price`]**: quotes
//!   - `POST /api/price/quote` - Price a swap against the order book
//!
//! - **[`swap`]**: swap transactions
//!   - `POST /api/swap/build` - Unsigned swap transaction for a wallet
//!   - `POST /api/swap/execute` - Submit a wallet-signed transaction
//!   - `GET /api/swap/transaction/{digest}` - Transaction status
//!
//! - **[`wallet`]**: read-only wallet queries
//!   - `GET /api/swap/balances/{address}` - All coin balances
//!   - `GET /api/swap/balances/{address}/{token}` - One token's balance
//!   - `GET /api/gas-price` - Reference gas price
//!
//! - **[`websocket`]**: `GET /ws/quotes` quote stream
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! CORS → stamp_req → TraceLayer → log_requests → map_res
//!     ↓
//! Handler → Service → lib-sui adapters
//!     ↓
//! Client Response
//! ```

pub mod pools;
pub mod price;
pub mod swap;
pub mod system;
pub mod wallet;
pub mod websocket;

#[cfg(test)]
mod tests;
