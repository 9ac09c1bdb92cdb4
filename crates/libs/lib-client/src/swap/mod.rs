//! # Swaps
//!
//! Intent parsing and the scoped swap trigger.

pub mod intent;
pub mod trigger;

pub use intent::{
    format_swap_confirmation, format_swap_error, format_swap_success, parse_swap_intent, SwapParams,
};
pub use trigger::{SwapController, SwapOutcome, SwapRegistration, SwapTrigger};
