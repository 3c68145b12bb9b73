//! Uniform outcome shape of a remote call
//!
//! Every access-service operation resolves to either `{"status": "SUCCESS"}`
//! or `{"status": "FAILURE", "error": "..."}` when reported to callers that
//! only care whether the call went through.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    Success,
    Failure { error: String },
}

impl CallStatus {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl<T, E: fmt::Display> From<&Result<T, E>> for CallStatus {
    fn from(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
