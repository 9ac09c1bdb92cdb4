//! # Core Library
//!
//! Configuration, the application error taxonomy, and the static token table.

pub mod config;
pub mod error;
pub mod tokens;

// Re-export commonly used types
pub use config::{Config, RunMode};
pub use error::{AppError, Result};
pub use tokens::{TokenConfig, TOKENS};
