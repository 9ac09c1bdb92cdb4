//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the clients and the backend via the REST API and the quote stream.

pub mod error;
pub mod pool;
pub mod quote;
pub mod stream;
pub mod swap;
pub mod system;
pub mod wallet;

pub use error::*;
pub use pool::*;
pub use quote::*;
pub use stream::*;
pub use swap::*;
pub use system::*;
pub use wallet::*;
