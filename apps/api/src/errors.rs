use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Client errors answer with a plain-text message; server errors are logged
/// and answer with a generic JSON body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session store error: {0}")]
    Session(#[from] redis::RedisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => return (StatusCode::NOT_FOUND, msg.clone()).into_response(),
            AppError::Validation(msg) => {
                return (StatusCode::BAD_REQUEST, msg.clone()).into_response()
            }
            AppError::Unauthorized => {
                return (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "A database error occurred")
            }
            AppError::Session(e) => {
                tracing::error!("Session store error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "A session error occurred")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
