//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Access service errors
//! - 2xxx: Customer errors
//! - 3xxx: Membership and group errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so callers in other languages can match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Access service ====================
    /// Password-grant authentication was rejected
    AccessAuthFailed = 1001,
    /// Access service answered with a non-success status
    AccessRequestFailed = 1002,
    /// Access service could not be reached
    AccessUnavailable = 1003,
    /// Access service response could not be decoded
    AccessResponseInvalid = 1004,
    /// Bearer token rejected by the access service
    AccessUnauthorized = 1005,

    // ==================== 2xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 2001,
    /// Customer name cannot be split into first and last name
    CustomerNameInvalid = 2002,
    /// Customer has no remote user yet
    CustomerNotLinked = 2003,
    /// Remote user could not be created
    CustomerProvisionFailed = 2004,
    /// Barcode credential could not be created
    CredentialIssueFailed = 2005,
    /// Credential could not be assigned to the remote user
    CredentialAssignFailed = 2006,
    /// Remote user could not be updated
    CustomerSyncFailed = 2007,

    // ==================== 3xxx: Membership / groups ====================
    /// Subscription not found
    SubscriptionNotFound = 3001,
    /// Subscription template not found
    TemplateNotFound = 3002,
    /// Group cache row not found
    GroupNotFound = 3003,
    /// Member migration between groups failed
    GroupReassignFailed = 3004,
    /// Group reconciliation failed
    GroupSyncFailed = 3005,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",

            // Access service
            ErrorCode::AccessAuthFailed => "Cannot authenticate with the access service",
            ErrorCode::AccessRequestFailed => "Access service request failed",
            ErrorCode::AccessUnavailable => "Access service is unavailable",
            ErrorCode::AccessResponseInvalid => "Access service returned an invalid response",
            ErrorCode::AccessUnauthorized => "Access service rejected the token",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerNameInvalid => "Customer name must contain first and last name",
            ErrorCode::CustomerNotLinked => "Customer has no access service user",
            ErrorCode::CustomerProvisionFailed => "Cannot create user on the access service",
            ErrorCode::CredentialIssueFailed => "Cannot create user credential on the access service",
            ErrorCode::CredentialAssignFailed => "Cannot assign credential to user on the access service",
            ErrorCode::CustomerSyncFailed => "Cannot update user on the access service",

            // Membership / groups
            ErrorCode::SubscriptionNotFound => "Subscription not found",
            ErrorCode::TemplateNotFound => "Subscription template not found",
            ErrorCode::GroupNotFound => "Access group not found",
            ErrorCode::GroupReassignFailed => "Access group reassignment failed",
            ErrorCode::GroupSyncFailed => "Access group synchronization failed",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),

            // Access service
            1001 => Ok(ErrorCode::AccessAuthFailed),
            1002 => Ok(ErrorCode::AccessRequestFailed),
            1003 => Ok(ErrorCode::AccessUnavailable),
            1004 => Ok(ErrorCode::AccessResponseInvalid),
            1005 => Ok(ErrorCode::AccessUnauthorized),

            // Customer
            2001 => Ok(ErrorCode::CustomerNotFound),
            2002 => Ok(ErrorCode::CustomerNameInvalid),
            2003 => Ok(ErrorCode::CustomerNotLinked),
            2004 => Ok(ErrorCode::CustomerProvisionFailed),
            2005 => Ok(ErrorCode::CredentialIssueFailed),
            2006 => Ok(ErrorCode::CredentialAssignFailed),
            2007 => Ok(ErrorCode::CustomerSyncFailed),

            // Membership / groups
            3001 => Ok(ErrorCode::SubscriptionNotFound),
            3002 => Ok(ErrorCode::TemplateNotFound),
            3003 => Ok(ErrorCode::GroupNotFound),
            3004 => Ok(ErrorCode::GroupReassignFailed),
            3005 => Ok(ErrorCode::GroupSyncFailed),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
