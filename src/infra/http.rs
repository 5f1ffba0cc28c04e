//! Shared HTTP client construction.

use reqwest::Client;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Build the client used for every outbound call, with the configured
/// request and connect timeouts.
pub fn build_client(config: &Config) -> AppResult<Client> {
    Client::builder()
        .timeout(config.http_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))
}

/// Short description of a transport failure for user-facing messages.
pub fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "tempo limite excedido".to_string()
    } else if error.is_connect() {
        "não foi possível conectar ao servidor".to_string()
    } else {
        error.to_string()
    }
}
