//! API error type and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use database::DatabaseError;
use mailer::MailError;
use pipeline::PipelineError;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid session.
    #[error("Unauthorized: {0}")]
    Auth(String),

    /// An upstream provider failed on a write path.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Store I/O failure. The client gets a generic message.
    #[error("Database error")]
    Database(#[source] DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} {}", entity, id))
            }
            DatabaseError::Rejected(msg) => ApiError::Validation(msg),
            other => ApiError::Database(other),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(msg) => ApiError::Validation(msg),
            PipelineError::NotFound(msg) => ApiError::NotFound(msg),
            PipelineError::Database(db) => ApiError::Database(db),
        }
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
