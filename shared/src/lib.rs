//! Shared types for the club access-control sync
//!
//! Common types used by the Brivo client and the sync service:
//! error codes, API response envelopes, the uniform remote-call status
//! shape, and the local data models.

pub mod error;
pub mod models;
pub mod status;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, ErrorCode};
pub use status::CallStatus;
