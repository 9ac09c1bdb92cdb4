//! # Hook State
//!
//! What a watcher publishes, and the generation counter that keeps a slow
//! response from overwriting a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Published state of a hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HookState<T> {
    /// Nothing to show: no input, or input cleared
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> HookState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Monotonic fetch counter.
///
/// Each fetch takes a number with [`Generation::issue`]; its result is
/// published only if no newer fetch was issued meanwhile.
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// Watch channel plus generation counter, shared by every watcher.
#[derive(Debug)]
pub(crate) struct Feed<T> {
    state: watch::Sender<HookState<T>>,
    generation: Generation,
}

impl<T: Clone> Feed<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(HookState::Idle);
        Self {
            state,
            generation: Generation::default(),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<HookState<T>> {
        self.state.subscribe()
    }

    pub(crate) fn snapshot(&self) -> HookState<T> {
        self.state.borrow().clone()
    }

    /// Start a fetch. A ready value stays visible while it refreshes.
    pub(crate) fn begin(&self) -> u64 {
        let generation = self.generation.issue();
        if !matches!(*self.state.borrow(), HookState::Ready(_)) {
            self.state.send_replace(HookState::Loading);
        }
        generation
    }

    /// Publish a fetch result unless a newer fetch has started.
    pub(crate) fn settle(&self, generation: u64, state: HookState<T>) -> bool {
        if !self.generation.is_current(generation) {
            tracing::debug!(generation, "Discarding stale result");
            return false;
        }
        self.state.send_replace(state);
        true
    }

    /// Publish `state` and orphan any fetch still in flight.
    pub(crate) fn reset(&self, state: HookState<T>) {
        self.generation.issue();
        self.state.send_replace(state);
    }
}
