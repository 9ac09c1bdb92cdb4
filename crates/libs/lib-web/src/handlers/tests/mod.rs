//! # Router Tests
//!
//! Drive the full router, middleware included, against in-memory adapters.

mod swap;

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::{Config, RunMode};
use lib_sui::deepbook::testing::{sample_pools, FakeChain, FakeVenue};
use lib_sui::SuiState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// DEEP_SUI book: bids at 0.05 SUI, asks at 0.06 SUI.
pub fn test_venue() -> FakeVenue {
    FakeVenue::new(sample_pools()).with_book(&[("0.05", "1000")], &[("0.06", "1000")])
}

pub fn test_config(run_mode: RunMode) -> Config {
    Config {
        run_mode,
        ..Config::default()
    }
}

/// Create test app over the given adapters.
pub fn test_app_with(chain: FakeChain, venue: FakeVenue, run_mode: RunMode) -> Router {
    let config = test_config(run_mode);
    let sui = SuiState::from_parts(Arc::new(chain), Arc::new(venue), &config.deepbook_package_id);
    create_router(AppState { config, sui })
}

/// Funded wallet, healthy venue, production mode.
pub fn test_app() -> Router {
    test_app_with(FakeChain::funded(), test_venue(), RunMode::Production)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
