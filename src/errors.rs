//! Centralized error handling.
//!
//! Provides a unified error type for the whole backend. Nothing crosses the
//! public service boundary as an error: services render these into the
//! `(success, message)` outcomes the views display.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Vault storage
    #[error("{0}")]
    ConfigIo(String),

    // Credential cipher
    #[error("No password stored")]
    NoPasswordStored,

    #[error("Failed to decrypt password: {0}")]
    Cipher(String),

    // Attendance service
    #[error("Falha de conexão na autenticação: {0}")]
    AuthNetwork(String),

    #[error("{0}")]
    AuthProtocol(String),

    #[error("{0}")]
    Registration(String),

    // Never surfaced, replaced by the fallback coordinates
    #[error("Location unavailable: {0}")]
    Location(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Concurrency
    #[error("Registration already in progress")]
    Busy,

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConfigIo(_) => "CONFIG_IO",
            AppError::NoPasswordStored => "NO_PASSWORD",
            AppError::Cipher(_) => "CIPHER",
            AppError::AuthNetwork(_) => "AUTH_NETWORK",
            AppError::AuthProtocol(_) => "AUTH_PROTOCOL",
            AppError::Registration(_) => "REGISTRATION",
            AppError::Location(_) => "LOCATION",
            AppError::Validation(_) => "VALIDATION",
            AppError::Busy => "BUSY",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Busy => crate::config::MSG_REGISTRATION_IN_PROGRESS.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn config_io(msg: impl Into<String>) -> Self {
        AppError::ConfigIo(msg.into())
    }

    pub fn cipher(msg: impl Into<String>) -> Self {
        AppError::Cipher(msg.into())
    }

    pub fn auth_protocol(msg: impl Into<String>) -> Self {
        AppError::AuthProtocol(msg.into())
    }

    pub fn registration(msg: impl Into<String>) -> Self {
        AppError::Registration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
