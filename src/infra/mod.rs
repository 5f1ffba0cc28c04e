//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Vault file persistence
//! - The remote attendance API
//! - IP geolocation
//! - Shared HTTP client setup

pub mod attendance;
pub mod config_store;
pub mod http;
pub mod location;

pub use attendance::{
    interpret_clock_response, parse_login_response, AttendanceApi, HttpAttendanceClient,
};
pub use config_store::{load_or_default, ConfigStore, FileConfigStore};
pub use http::build_client;
pub use location::{resolve_or_fallback, IpGeolocator, LocationProvider};

#[cfg(any(test, feature = "test-utils"))]
pub use attendance::MockAttendanceApi;
#[cfg(any(test, feature = "test-utils"))]
pub use config_store::MockConfigStore;
#[cfg(any(test, feature = "test-utils"))]
pub use location::MockLocationProvider;
