//! # Best-Effort Reads
//!
//! Balance and gas price reads never fail the request that asked for them.
//! Instead of collapsing "the wallet holds nothing" and "the node is down"
//! into the same zero, they return a [`Fetched`] value that keeps the two apart
//! while still yielding the fallback the HTTP surface reports.
//!
//! ```rust
//! use lib_sui::Fetched;
//!
//! let down: Fetched<Vec<u8>> = Fetched::Unavailable("timeout".into());
//! assert!(down.is_unavailable());
//! assert_eq!(down.or_fallback(Vec::new()), Vec::<u8>::new());
//! ```

use shared::Availability;

/// Outcome of a read that degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The read succeeded and returned data.
    Ready(T),
    /// The read succeeded and there was nothing to return.
    Empty,
    /// The read failed; the reason is kept for logs.
    Unavailable(String),
}

impl<T> Fetched<T> {
    /// Classify a result, treating values matching `is_empty` as [`Fetched::Empty`].
    pub fn classify<E: std::fmt::Display>(
        result: Result<T, E>,
        is_empty: impl FnOnce(&T) -> bool,
    ) -> Self {
        match result {
            Ok(value) if is_empty(&value) => Fetched::Empty,
            Ok(value) => Fetched::Ready(value),
            Err(err) => Fetched::Unavailable(err.to_string()),
        }
    }

    pub fn availability(&self) -> Availability {
        match self {
            Fetched::Ready(_) => Availability::Ok,
            Fetched::Empty => Availability::Empty,
            Fetched::Unavailable(_) => Availability::Unavailable,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetched::Unavailable(_))
    }

    /// The data, or `fallback` when empty or unavailable.
    pub fn or_fallback(self, fallback: T) -> T {
        match self {
            Fetched::Ready(value) => value,
            Fetched::Empty | Fetched::Unavailable(_) => fallback,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Ready(value) => Fetched::Ready(f(value)),
            Fetched::Empty => Fetched::Empty,
            Fetched::Unavailable(reason) => Fetched::Unavailable(reason),
        }
    }
}
