//! # Swap Intents
//!
//! Parses chat-style swap requests (`"swap 1.5 sui to deep"`) and formats the
//! messages shown around a swap.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ClientError;

static SWAP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)swap\s+(\d+\.?\d*)\s+(\w+)\s+to\s+(\w+)").expect("swap intent pattern is valid")
});

/// What to swap. Symbols are upper-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub from_token: String,
    pub to_token: String,
    pub amount: String,
}

impl SwapParams {
    pub fn new(from_token: &str, to_token: &str, amount: &str) -> Self {
        Self {
            from_token: from_token.to_uppercase(),
            to_token: to_token.to_uppercase(),
            amount: amount.to_string(),
        }
    }
}

/// Find a swap request anywhere in `message`.
pub fn parse_swap_intent(message: &str) -> Option<SwapParams> {
    let captures = SWAP_PATTERN.captures(message)?;
    Some(SwapParams::new(&captures[2], &captures[3], &captures[1]))
}

pub fn format_swap_confirmation(params: &SwapParams) -> String {
    format!("Ready to swap {} {} to {}?", params.amount, params.from_token, params.to_token)
}

pub fn format_swap_success(params: &SwapParams) -> String {
    format!("Successfully swapped {} {} to {}!", params.amount, params.from_token, params.to_token)
}

pub fn format_swap_error(err: &ClientError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "Swap failed: Unknown error".to_string()
    } else {
        format!("Swap failed: {message}")
    }
}
