//! Unified service-layer error type for club-sync
//!
//! `ServiceError` bridges store errors, access-service failures and the
//! API-layer error (`AppError`), so hooks can propagate with `?` and still
//! answer the host with a precise error code.

use axum::response::IntoResponse;
use brivo_client::ClientError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Access-service call failed; `code` names the step that failed
    #[error("{}: {source}", .code.message())]
    Remote {
        code: ErrorCode,
        #[source]
        source: ClientError,
    },
    /// Database or infrastructure error (auto-logged, mapped to DatabaseError)
    #[error("database error: {0}")]
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    #[error(transparent)]
    App(AppError),
}

impl ServiceError {
    /// `map_err` adapter tagging a client failure with the step it broke
    pub fn remote(code: ErrorCode) -> impl FnOnce(ClientError) -> ServiceError {
        move |source| ServiceError::Remote { code, source }
    }
}

impl From<ClientError> for ServiceError {
    fn from(source: ClientError) -> Self {
        ServiceError::Remote {
            code: source.error_code(),
            source,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Remote { code, source } => {
                let message = format!("{}: {source}", code.message());
                let remote: AppError = source.into();
                AppError {
                    code,
                    message,
                    details: remote.details,
                }
            }
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
