//! # SuiTent Client Library
//!
//! Client-side half of the trading backend: a typed API client, polling data
//! hooks, a read-only wallet session, and the swap trigger.
//!
//! ## Modules
//!
//! - **[`api`]**: [`ApiService`] trait and its HTTP implementation [`ApiClient`]
//! - **[`hooks`]**: balance, portfolio and quote watchers publishing [`HookState`]
//! - **[`wallet`]**: [`WalletSession`], [`WalletProvider`], [`TransactionSigner`]
//! - **[`swap`]**: swap intent parsing and the scoped [`SwapTrigger`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lib_client::{ApiClient, BalanceWatcher};
//!
//! # async fn example() {
//! let api = Arc::new(ApiClient::new());
//! let mut balances = BalanceWatcher::new(api);
//! balances.set_address(Some("0x2"));
//!
//! let mut updates = balances.subscribe();
//! while updates.changed().await.is_ok() {
//!     println!("{:?}", *updates.borrow());
//! }
//! # }
//! ```

pub mod api;
pub mod error;
pub mod hooks;
pub mod swap;
pub mod wallet;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiService};
pub use error::{ClientError, Result};
pub use hooks::{BalanceWatcher, HookState, PortfolioWatcher, QuoteInput, QuoteWatcher};
pub use swap::{parse_swap_intent, SwapController, SwapParams, SwapTrigger};
pub use wallet::{SessionHandle, TransactionSigner, WalletProvider, WalletSession};
