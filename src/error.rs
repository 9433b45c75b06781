//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror. Store and cache layers
//! carry their own error enums; `AppError` is what services and handlers
//! surface to the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::CacheError;
use crate::store::StoreError;

// == App Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Lookup miss, including an empty paginated result
    #[error("Not found: {0}")]
    NotFound(String),

    /// Document store failure, propagated unmodified
    #[error(transparent)]
    Store(StoreError),

    /// Cache failure, propagated unmodified
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Payload could not be encoded for the cache
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            StoreError::InvalidPayload(msg) => AppError::BadRequest(msg),
            other => AppError::Store(other),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, AppError>;
