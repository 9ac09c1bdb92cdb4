//! # Response Mapping Middleware
//!
//! Handlers fail with [`AppError`], whose `IntoResponse` renders the public
//! body and stashes the error itself in the response extensions. This layer
//! runs with access to the [`RunMode`]: in development it re-renders error
//! bodies with a `stack` field carrying the full diagnostic, in production it
//! leaves them untouched.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use lib_core::{AppError, RunMode};
use std::sync::Arc;
use tracing::error;

pub async fn map_res(State(mode): State<RunMode>, req: Request, next: Next) -> Response {
    let res = next.run(req).await;

    if res.status().is_server_error() {
        error!("[RESPONSE] Server error: {}", res.status());
    }

    if !mode.is_development() {
        return res;
    }

    let Some(err) = res.extensions().get::<Arc<AppError>>().cloned() else {
        return res;
    };

    let mut body = err.body();
    body.error.stack = Some(err.diagnostic());
    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(_) => return res,
    };

    let (mut parts, _) = res.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
