//! Web-specific error types and conversions
//!
//! Every error leaves the server in the same envelope:
//! `{"error": {"code": ..., "message": ..., "status": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Not found: {message}")]
    NotFound { message: String },
}

/// Response extension set by handlers that already logged the failure cause.
///
/// [`error_handler_middleware`](crate::middleware::error_handler_middleware)
/// leaves such responses alone.
#[derive(Debug, Clone, Copy)]
pub struct ErrorLogged;

impl WebError {
    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound { message: message.into() }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> &str {
        match self {
            WebError::NotFound { message } => message,
        }
    }
}

/// Build the JSON error envelope
pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "error": {
            "code": code,
            "message": message,
            "status": status.as_u16()
        }
    });
    (status, Json(body)).into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.error_code(), self.public_message())
    }
}
