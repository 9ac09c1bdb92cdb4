//! # Quote Watcher
//!
//! Debounced quote for the swap form. Every input change restarts a 500 ms
//! timer; only when it expires is `POST /api/price/quote` called, so a burst
//! of keystrokes costs one request.
//!
//! Inputs are checked before any request:
//!
//! - absent or non-positive amount: state goes back to `Idle`
//! - pair other than SUI/DEEP in either direction: `Failed` with
//!   [`UNSUPPORTED_PAIR`]

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use shared::dto::quote::{Quote, QuoteRequest};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::{Feed, HookState};
use crate::api::ApiService;

pub const QUOTE_DEBOUNCE: Duration = Duration::from_millis(500);

pub const UNSUPPORTED_PAIR: &str = "Only SUI <-> DEEP swaps are supported";

const SUPPORTED_PAIRS: &[(&str, &str)] = &[("SUI", "DEEP"), ("DEEP", "SUI")];

/// Current contents of the swap form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteInput {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
}

impl QuoteInput {
    pub fn new(token_in: &str, token_out: &str, amount_in: &str) -> Self {
        Self {
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
            amount_in: amount_in.to_string(),
        }
    }

    fn has_positive_amount(&self) -> bool {
        Decimal::from_str(self.amount_in.trim()).is_ok_and(|amount| amount > Decimal::ZERO)
    }

    fn is_supported_pair(&self) -> bool {
        SUPPORTED_PAIRS
            .iter()
            .any(|(a, b)| *a == self.token_in && *b == self.token_out)
    }
}

struct QuoteFeed {
    api: Arc<dyn ApiService>,
    feed: Feed<Quote>,
}

impl QuoteFeed {
    async fn fetch(&self, input: QuoteInput) {
        if !input.has_positive_amount() {
            self.feed.reset(HookState::Idle);
            return;
        }
        if !input.is_supported_pair() {
            self.feed.reset(HookState::Failed(UNSUPPORTED_PAIR.to_string()));
            return;
        }

        let generation = self.feed.begin();
        tracing::debug!(
            token_in = %input.token_in,
            token_out = %input.token_out,
            amount_in = %input.amount_in,
            generation,
            "[QUOTE] Fetching"
        );

        let request = QuoteRequest::new(input.token_in, input.token_out, input.amount_in);
        let state = match self.api.get_quote(&request).await {
            Ok(quote) => HookState::Ready(quote),
            Err(err) => {
                tracing::warn!(error = %err, "[QUOTE] Fetch failed");
                HookState::Failed(err.to_string())
            }
        };

        self.feed.settle(generation, state);
    }
}

/// Quote for the current swap form input.
pub struct QuoteWatcher {
    inner: Arc<QuoteFeed>,
    input: QuoteInput,
    pending: Option<JoinHandle<()>>,
}

impl QuoteWatcher {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            inner: Arc::new(QuoteFeed {
                api,
                feed: Feed::new(),
            }),
            input: QuoteInput::default(),
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<Quote>> {
        self.inner.feed.subscribe()
    }

    pub fn state(&self) -> HookState<Quote> {
        self.inner.feed.snapshot()
    }

    pub fn input(&self) -> &QuoteInput {
        &self.input
    }

    /// Replace the form input and restart the debounce timer.
    pub fn set_input(&mut self, input: QuoteInput) {
        self.cancel_pending();
        self.input = input.clone();

        // Only the timer is cancellable; a fetch already sent runs to
        // completion and is dropped by the generation check if superseded.
        let inner = self.inner.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(QUOTE_DEBOUNCE).await;
            tokio::spawn(async move { inner.fetch(input).await });
        }));
    }

    /// Fetch immediately for the current input.
    pub async fn refetch(&mut self) {
        self.cancel_pending();
        self.inner.fetch(self.input.clone()).await;
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for QuoteWatcher {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::testing::FakeApi;

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_bursts() {
        // Arrange
        let api = Arc::new(FakeApi::new());
        let mut watcher = QuoteWatcher::new(api.clone());

        // Act
        for amount in ["1", "1.", "1.5"] {
            watcher.set_input(QuoteInput::new("SUI", "DEEP", amount));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(api.quote_calls(), 0);
        tokio::time::sleep(QUOTE_DEBOUNCE).await;

        // Assert
        assert_eq!(api.quote_calls(), 1);
        assert_eq!(watcher.state().value().unwrap().amount_in, "1.5");
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_positive_amount_is_idle_without_request() {
        let api = Arc::new(FakeApi::new());
        let mut watcher = QuoteWatcher::new(api.clone());

        for amount in ["", "0", "-2", "abc"] {
            watcher.set_input(QuoteInput::new("SUI", "DEEP", amount));
            tokio::time::sleep(QUOTE_DEBOUNCE * 2).await;
            assert_eq!(watcher.state(), HookState::Idle);
        }
        assert_eq!(api.quote_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_pair_fails_without_request() {
        let api = Arc::new(FakeApi::new());
        let mut watcher = QuoteWatcher::new(api.clone());

        watcher.set_input(QuoteInput::new("SUI", "DBUSDC", "1"));
        tokio::time::sleep(QUOTE_DEBOUNCE * 2).await;

        assert_eq!(watcher.state().error(), Some(UNSUPPORTED_PAIR));
        assert_eq!(api.quote_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_directions_supported() {
        let api = Arc::new(FakeApi::new());
        let mut watcher = QuoteWatcher::new(api.clone());

        watcher.set_input(QuoteInput::new("DEEP", "SUI", "100"));
        watcher.refetch().await;

        assert_eq!(api.quote_calls(), 1);
        assert_eq!(watcher.state().value().unwrap().token_in, "DEEP");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        // Arrange: the first request is slower than the second
        let api = Arc::new(
            FakeApi::new().with_quote_delays(&[Duration::from_secs(5), Duration::from_millis(10)]),
        );
        let mut watcher = QuoteWatcher::new(api.clone());

        // Act
        watcher.set_input(QuoteInput::new("SUI", "DEEP", "1"));
        tokio::time::sleep(QUOTE_DEBOUNCE + Duration::from_millis(1)).await;
        watcher.set_input(QuoteInput::new("SUI", "DEEP", "2"));
        tokio::time::sleep(Duration::from_secs(10)).await;

        // Assert
        assert_eq!(api.quote_calls(), 2);
        assert_eq!(watcher.state().value().unwrap().amount_in, "2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_message_is_published() {
        let api = Arc::new(FakeApi::new());
        api.fail_quotes(ClientError::Api {
            status: 422,
            code: "INSUFFICIENT_LIQUIDITY".to_string(),
            message: "Insufficient liquidity for this trade".to_string(),
        });
        let mut watcher = QuoteWatcher::new(api.clone());

        watcher.set_input(QuoteInput::new("SUI", "DEEP", "1"));
        watcher.refetch().await;

        assert_eq!(watcher.state().error(), Some("Insufficient liquidity for this trade"));
    }
}
