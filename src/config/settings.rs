//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_GEOLOCATION_URL, DEFAULT_HTTP_TIMEOUT_SECS,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub geolocation_url: String,
    pub config_file: PathBuf,
    pub http_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            config_file: default_config_dir().join(CONFIG_FILE_NAME),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every value is optional; unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            api_base_url: env::var("PONTO_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            geolocation_url: env::var("PONTO_GEOLOCATION_URL")
                .unwrap_or(defaults.geolocation_url),
            config_file: env::var("PONTO_CONFIG_DIR")
                .map(|dir| PathBuf::from(dir).join(CONFIG_FILE_NAME))
                .unwrap_or(defaults.config_file),
            http_timeout: env::var("PONTO_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            connect_timeout: env::var("PONTO_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
        }
    }

    /// Override the vault location with an explicit file path.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    /// Build a URL on the attendance backend.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Per-user configuration directory (`~/.config/ponto_app`).
fn default_config_dir() -> PathBuf {
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(".config").join(CONFIG_DIR_NAME),
        None => PathBuf::from(".config").join(CONFIG_DIR_NAME),
    }
}
