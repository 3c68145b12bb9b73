//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::CustomerNotFound
            | Self::SubscriptionNotFound
            | Self::TemplateNotFound
            | Self::GroupNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::CustomerNotLinked => StatusCode::CONFLICT,

            // 502 Bad Gateway (the access service answered, but not usefully)
            Self::AccessAuthFailed
            | Self::AccessRequestFailed
            | Self::AccessResponseInvalid
            | Self::AccessUnauthorized
            | Self::CustomerProvisionFailed
            | Self::CredentialIssueFailed
            | Self::CredentialAssignFailed
            | Self::CustomerSyncFailed
            | Self::GroupReassignFailed
            | Self::GroupSyncFailed => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient, caller can retry)
            Self::AccessUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed | Self::CustomerNameInvalid => StatusCode::BAD_REQUEST,
        }
    }
}
