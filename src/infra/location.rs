//! Approximate device location via IP geolocation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::http::describe_transport_error;
use crate::domain::Coordinates;
use crate::errors::{AppError, AppResult};

/// Source of the device's coordinates.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Look up the current position. May fail.
    async fn locate(&self) -> AppResult<Coordinates>;
}

/// Resolve coordinates, substituting the fixed fallback on any failure.
///
/// Never fails: a registration proceeds even without a location fix.
pub async fn resolve_or_fallback(provider: &dyn LocationProvider) -> Coordinates {
    match provider.locate().await {
        Ok(coordinates) => {
            tracing::debug!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "Location resolved"
            );
            coordinates
        }
        Err(e) => {
            tracing::warn!("Using fallback coordinates: {}", e);
            Coordinates::fallback()
        }
    }
}

/// Geolocation through an ipinfo-style JSON endpoint.
#[derive(Clone)]
pub struct IpGeolocator {
    client: Client,
    url: String,
}

impl IpGeolocator {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpGeolocator {
    async fn locate(&self) -> AppResult<Coordinates> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Location(describe_transport_error(&e)))?;

        if !response.status().is_success() {
            return Err(AppError::Location(format!(
                "provider answered {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Location(format!("invalid provider response: {}", e)))?;

        parse_location(&body).ok_or_else(|| AppError::Location("no location fix".to_string()))
    }
}

/// Read `loc: "lat,lon"` (ipinfo) or numeric `lat`/`lon` fields.
pub fn parse_location(body: &Value) -> Option<Coordinates> {
    if let Some(loc) = body.get("loc").and_then(Value::as_str) {
        return Coordinates::parse_pair(loc);
    }

    let latitude = body.get("lat").and_then(Value::as_f64)?;
    let longitude = body.get("lon").and_then(Value::as_f64)?;
    Some(Coordinates::new(latitude, longitude))
}
