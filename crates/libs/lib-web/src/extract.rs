//! # Request Extractors
//!
//! [`AppJson`] behaves like `axum::Json` but rejects with [`AppError`], so a
//! malformed body gets the same `{"error": {...}}` shape as every other
//! failure instead of axum's plain-text rejection.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use lib_core::AppError;
use tracing::debug;

/// JSON body extractor answering parse failures with `INVALID_REQUEST`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "[REQUEST] Body rejected");
                Err(AppError::InvalidRequest("Invalid JSON body".to_string()))
            }
        }
    }
}
