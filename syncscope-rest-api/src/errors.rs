//! REST API error types
//!
//! Internal causes are logged here and never echoed to clients; the
//! response only carries a fixed message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use syncscope_core::{RegistryError, SourceError};
use syncscope_web::{errors::error_response, ErrorLogged};
use thiserror::Error;
use tracing::error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Failed to read logs")]
    Logs(#[source] SourceError),

    #[error("Failed to read statistics")]
    Statistics(#[source] SourceError),

    #[error("Failed to read repositories")]
    Repositories(#[source] RegistryError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Logs(_) | RestError::Statistics(_) | RestError::Repositories(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RestError::Logs(_) | RestError::Statistics(_) => "JOURNAL_UNAVAILABLE",
            RestError::Repositories(_) => "REPOSITORY_LIST_UNREADABLE",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match &self {
            RestError::Logs(cause) | RestError::Statistics(cause) => {
                error!(error = %cause, timeout = cause.is_timeout(), "{}", self);
            }
            RestError::Repositories(cause) => error!(error = %cause, "{}", self),
        }

        let mut response = error_response(self.status_code(), self.error_code(), &self.to_string());
        response.extensions_mut().insert(ErrorLogged);
        response
    }
}
