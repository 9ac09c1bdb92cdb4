//! # Data Hooks
//!
//! Long-lived watchers that keep a view of backend data fresh and publish it
//! through `tokio::sync::watch` channels.
//!
//! | Watcher | Source | Cadence |
//! |---------|--------|---------|
//! | [`BalanceWatcher`] | `GET /api/swap/balances/{address}` | every 15 s while an address is set |
//! | [`PortfolioWatcher`] | `GET /api/swap/balances/{address}` | every 30 s while the wallet session is connected |
//! | [`QuoteWatcher`] | `POST /api/price/quote` | 500 ms after the last input change |
//!
//! Every fetch is tagged with a generation number; a response is published
//! only when no newer fetch was issued after it. Dropping a watcher stops its
//! timers.

mod poller;
mod state;

pub mod balances;
pub mod portfolio;
pub mod quote;

pub use balances::{BalanceWatcher, TokenBalance};
pub use poller::Poller;
pub use portfolio::{PortfolioEntry, PortfolioWatcher};
pub use quote::{QuoteInput, QuoteWatcher};
pub use state::{Generation, HookState};
