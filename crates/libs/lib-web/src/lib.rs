//! # Web Library
//!
//! REST facade, middleware, services and the `/ws/quotes` quote stream.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, start_server, AppState, ServerConfig};
