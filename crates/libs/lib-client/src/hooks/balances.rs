//! # Balance Watcher
//!
//! Polls `GET /api/swap/balances/{address}` every 15 seconds while an address
//! is set and publishes the wallet's balances with display metadata.
//!
//! Each coin type is enriched from the token table (symbol, name, decimals).
//! Coin types outside the table fall back to the last `::` segment of the
//! type for the symbol and 9 decimals. Balances are formatted exactly, with
//! no float rounding, and sorted SUI first, then by balance descending.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use shared::dto::wallet::{Availability, CoinBalance};
use tokio::sync::watch;

use super::poller::Poller;
use super::state::{Feed, HookState};
use crate::api::ApiService;

pub const BALANCE_REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Shown by [`BalanceWatcher::balance_of`] for tokens the wallet lacks
pub const ZERO_BALANCE: &str = "0.00";

const DEFAULT_DECIMALS: u8 = 9;

/// One coin type held by the wallet, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub symbol: String,
    pub name: String,
    /// Human-readable amount (`"1.5"`)
    pub balance: String,
    /// Raw on-chain units
    pub balance_raw: String,
    pub decimals: u8,
    pub coin_type: String,
}

impl TokenBalance {
    pub fn from_coin(coin: &CoinBalance) -> Self {
        let known = lib_core::tokens::token_by_coin_type(&coin.coin_type);
        let decimals = known.map_or(DEFAULT_DECIMALS, |t| t.decimals);
        let symbol = match known {
            Some(token) => token.symbol.to_string(),
            None => shared::utils::coin_symbol(&coin.coin_type).to_uppercase(),
        };

        let balance = match coin.total_balance.parse::<u128>() {
            Ok(raw) => lib_utils::from_raw_amount(raw, decimals),
            Err(_) => {
                tracing::warn!(coin_type = %coin.coin_type, raw = %coin.total_balance, "Unparseable balance");
                "0".to_string()
            }
        };

        Self {
            symbol,
            name: known.map_or("Unknown Token", |t| t.name).to_string(),
            balance,
            balance_raw: coin.total_balance.clone(),
            decimals,
            coin_type: coin.coin_type.clone(),
        }
    }
}

/// Enrich and order raw chain balances.
pub fn enrich_balances(coins: &[CoinBalance]) -> Vec<TokenBalance> {
    let mut balances: Vec<TokenBalance> = coins.iter().map(TokenBalance::from_coin).collect();
    balances.sort_by(display_order);
    balances
}

fn display_order(a: &TokenBalance, b: &TokenBalance) -> Ordering {
    match (a.symbol == "SUI", b.symbol == "SUI") {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => amount(&b.balance).cmp(&amount(&a.balance)),
    }
}

fn amount(balance: &str) -> Decimal {
    Decimal::from_str(balance).unwrap_or_default()
}

struct BalanceFeed {
    api: Arc<dyn ApiService>,
    feed: Feed<Vec<TokenBalance>>,
}

impl BalanceFeed {
    async fn fetch(&self, address: &str) {
        let generation = self.feed.begin();
        tracing::debug!(address, generation, "[BALANCES] Fetching");

        let state = match self.api.get_balances(address).await {
            Ok(response) if response.availability == Availability::Unavailable => {
                HookState::Failed("Failed to fetch balances".to_string())
            }
            Ok(response) => HookState::Ready(enrich_balances(&response.balances)),
            Err(err) => {
                tracing::warn!(address, error = %err, "[BALANCES] Fetch failed");
                HookState::Failed(err.to_string())
            }
        };

        self.feed.settle(generation, state);
    }
}

/// Balances of one wallet address, refreshed on a fixed interval.
pub struct BalanceWatcher {
    inner: Arc<BalanceFeed>,
    address: Option<String>,
    poller: Poller,
}

impl BalanceWatcher {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            inner: Arc::new(BalanceFeed {
                api,
                feed: Feed::new(),
            }),
            address: None,
            poller: Poller::default(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<Vec<TokenBalance>>> {
        self.inner.feed.subscribe()
    }

    pub fn state(&self) -> HookState<Vec<TokenBalance>> {
        self.inner.feed.snapshot()
    }

    /// Normalized address being watched.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Watch `address`, or stop watching with `None`.
    ///
    /// Short addresses are left-padded to full length. Clearing the address
    /// stops the timer and publishes an empty list.
    pub fn set_address(&mut self, address: Option<&str>) {
        let Some(address) = address.filter(|a| !a.is_empty()) else {
            self.poller.stop();
            self.address = None;
            self.inner.feed.reset(HookState::Ready(Vec::new()));
            return;
        };

        let normalized = match lib_utils::normalize_sui_address(address) {
            Ok(normalized) => normalized,
            Err(_) => {
                self.poller.stop();
                self.address = None;
                self.inner.feed.reset(HookState::Failed("Invalid wallet address format".to_string()));
                return;
            }
        };

        if self.address.as_deref() == Some(normalized.as_str()) && self.poller.is_running() {
            return;
        }

        tracing::info!(address = %normalized, "[BALANCES] Watching address");
        self.poller.stop();
        self.inner.feed.reset(HookState::Loading);
        self.address = Some(normalized.clone());

        let inner = self.inner.clone();
        self.poller = Poller::start(BALANCE_REFRESH_INTERVAL, move || {
            let inner = inner.clone();
            let address = normalized.clone();
            async move { inner.fetch(&address).await }
        });
    }

    /// Fetch now, outside the interval.
    pub async fn refetch(&self) {
        match &self.address {
            Some(address) => self.inner.fetch(address).await,
            None => self.inner.feed.reset(HookState::Ready(Vec::new())),
        }
    }

    /// Display balance for `symbol`, `"0.00"` when not held.
    pub fn balance_of(&self, symbol: &str) -> String {
        self.state()
            .value()
            .and_then(|balances| balances.iter().find(|b| b.symbol == symbol))
            .map_or_else(|| ZERO_BALANCE.to_string(), |b| b.balance.clone())
    }
}
