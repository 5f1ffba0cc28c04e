//! Normalized outcomes returned across the backend boundary.
//!
//! Every public operation reports a success flag plus a human-readable
//! message; views only render these.

use serde::Serialize;

use crate::errors::AppError;

/// Result of one registration attempt.
///
/// `timestamp` is the local clock time the attempt started, whatever the
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

impl RegistrationOutcome {
    pub fn success(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn failure(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Render an error at the service boundary.
    pub fn from_error(error: &AppError, timestamp: impl Into<String>) -> Self {
        Self::failure(error.user_message(), timestamp)
    }

    /// Tuple form `(success, message, timestamp)`.
    pub fn into_parts(self) -> (bool, String, String) {
        (self.success, self.message, self.timestamp)
    }
}

/// Result of a credentials update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub success: bool,
    pub message: String,
}

impl UpdateOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn from_error(error: &AppError) -> Self {
        Self {
            success: false,
            message: error.user_message(),
        }
    }
}
