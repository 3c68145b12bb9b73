//! Client error types

use reqwest::StatusCode;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint refused the password grant
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API rejected the bearer token
    #[error("Access token rejected")]
    Unauthorized,

    /// Non-success status from the API
    #[error("{status} for {url}: {message}")]
    Status {
        status: StatusCode,
        url: String,
        message: String,
    },

    /// Local precondition failed before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body is not what the endpoint documents
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Status code of a failed call, if the service answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Map onto the shared error code space
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::AccessUnavailable,
            Self::Auth(_) => ErrorCode::AccessAuthFailed,
            Self::Unauthorized => ErrorCode::AccessUnauthorized,
            Self::Status { .. } => ErrorCode::AccessRequestFailed,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Serialization(_) => ErrorCode::AccessResponseInvalid,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        let mut err = AppError::with_message(e.error_code(), e.to_string());
        if let Some(status) = e.status() {
            err = err.with_detail("remote_status", status.as_u16());
        }
        err
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
