//! # Portfolio Watcher
//!
//! Follows the wallet session: while it is connected with an address the
//! raw balances are polled every 30 seconds; otherwise the list is empty and
//! no requests are made.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::poller::Poller;
use super::state::{Feed, HookState};
use crate::api::ApiService;
use crate::wallet::{WalletProvider, WalletSession};

pub const PORTFOLIO_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Raw holding of one coin type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioEntry {
    pub coin_type: String,
    pub balance: String,
    pub total_balance: String,
}

struct PortfolioFeed {
    api: Arc<dyn ApiService>,
    feed: Feed<Vec<PortfolioEntry>>,
}

impl PortfolioFeed {
    async fn fetch(&self, address: &str) {
        let generation = self.feed.begin();

        let state = match self.api.get_balances(address).await {
            Ok(response) => HookState::Ready(
                response
                    .balances
                    .into_iter()
                    .map(|coin| PortfolioEntry {
                        coin_type: coin.coin_type,
                        balance: coin.total_balance.clone(),
                        total_balance: coin.total_balance,
                    })
                    .collect(),
            ),
            Err(err) => {
                tracing::warn!(address, error = %err, "[PORTFOLIO] Fetch failed");
                HookState::Failed(err.to_string())
            }
        };

        self.feed.settle(generation, state);
    }
}

/// Portfolio of the connected wallet.
pub struct PortfolioWatcher {
    inner: Arc<PortfolioFeed>,
    supervisor: JoinHandle<()>,
}

impl PortfolioWatcher {
    pub fn new(api: Arc<dyn ApiService>, wallet: &dyn WalletProvider) -> Self {
        let inner = Arc::new(PortfolioFeed {
            api,
            feed: Feed::new(),
        });
        let supervisor = tokio::spawn(supervise(inner.clone(), wallet.watch()));

        Self { inner, supervisor }
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<Vec<PortfolioEntry>>> {
        self.inner.feed.subscribe()
    }

    pub fn state(&self) -> HookState<Vec<PortfolioEntry>> {
        self.inner.feed.snapshot()
    }
}

impl Drop for PortfolioWatcher {
    fn drop(&mut self) {
        self.supervisor.abort();
    }
}

/// Restart or stop the poller on each session change.
async fn supervise(inner: Arc<PortfolioFeed>, mut sessions: watch::Receiver<WalletSession>) {
    let mut poller = Poller::default();
    let mut watching: Option<String> = None;

    loop {
        let address = sessions.borrow_and_update().active_address().map(str::to_string);

        if address != watching || !poller.is_running() {
            poller.stop();
            match &address {
                Some(address) => {
                    tracing::info!(address = %address, "[PORTFOLIO] Session connected");
                    let inner = inner.clone();
                    let address = address.clone();
                    poller = Poller::start(PORTFOLIO_REFRESH_INTERVAL, move || {
                        let inner = inner.clone();
                        let address = address.clone();
                        async move { inner.fetch(&address).await }
                    });
                }
                None => inner.feed.reset(HookState::Ready(Vec::new())),
            }
            watching = address;
        }

        if sessions.changed().await.is_err() {
            break;
        }
    }
}
