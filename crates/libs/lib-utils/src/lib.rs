//! # Utilities Library
//!
//! Shared utility functions for token amounts, Sui addresses, base64 encoding,
//! environment variables, time and request validation.

pub mod address;
pub mod amount;
pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use address::{is_valid_sui_address, normalize_sui_address};
pub use amount::{from_raw_amount, to_raw_amount};
pub use b64::{b64_decode, b64_encode};
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse_or};
pub use time::{now_iso, now_millis, now_utc};
pub use validation::missing_fields;
