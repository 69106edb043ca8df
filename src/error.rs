//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const BAKERY_NOT_FOUND: &str = "Bakery not found";
pub const BAKED_GOOD_NOT_FOUND: &str = "Baked good not found";

#[derive(Error, Debug)]
pub enum AppError {
    /// Entity-specific message, rendered verbatim with 404.
    #[error("{0}")]
    NotFound(&'static str),
    /// Missing or malformed request input.
    #[error("{0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    /// Startup-only: invalid settings or DATABASE_URL. Never produced by a handler.
    #[error("config: {0}")]
    Config(String),
}

/// Flat error envelope: `{"error": "<message>"}`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            AppError::BadRequest(msg) => {
                tracing::warn!(reason = %msg, "rejected request input");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            AppError::Config(msg) => {
                tracing::error!(reason = %msg, "configuration failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
