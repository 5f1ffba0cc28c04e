//! Attendance domain types - session, location and clock event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{
    CLOCK_EVENT_METHOD, CLOCK_EVENT_PRECISION, FALLBACK_LATITUDE, FALLBACK_LONGITUDE,
};

/// Employee identifier (`idMutuario`) returned at login.
///
/// The upstream type is not fixed (number or string), so the raw JSON
/// value is kept and sent back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Value);

impl EmployeeId {
    /// Accept a login field as an identifier.
    ///
    /// Null, `false`, zero and empty strings/containers are treated as absent.
    pub fn from_value(value: Value) -> Option<Self> {
        let present = match &value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        };
        present.then_some(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

/// Authenticated session, used for exactly one clock event.
#[derive(Clone)]
pub struct Session {
    pub token: String,
    pub employee_id: EmployeeId,
}

// Don't expose bearer token in debug output
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("employee_id", &self.employee_id)
            .finish()
    }
}

impl Session {
    pub fn new(token: impl Into<String>, employee_id: EmployeeId) -> Self {
        Self {
            token: token.into(),
            employee_id,
        }
    }
}

/// Approximate position of the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Position reported when geolocation fails.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE)
    }

    /// Parse the `"lat,lon"` form used by IP geolocation providers.
    pub fn parse_pair(text: &str) -> Option<Self> {
        let (lat, lon) = text.split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Self::new(latitude, longitude))
    }
}

/// Body of the clock event submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockEvent {
    #[serde(rename = "idMutuario")]
    pub employee_id: EmployeeId,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "precisao")]
    pub precision: f64,
    #[serde(rename = "meioBatida")]
    pub method: String,
}

impl ClockEvent {
    /// Build the event this client submits: fixed precision and channel tag.
    pub fn new(session: &Session, coordinates: Coordinates) -> Self {
        Self {
            employee_id: session.employee_id.clone(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            precision: CLOCK_EVENT_PRECISION,
            method: CLOCK_EVENT_METHOD.to_string(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employee_id_presence() {
        assert!(EmployeeId::from_value(json!(1234)).is_some());
        assert!(EmployeeId::from_value(json!("A-17")).is_some());
        assert!(EmployeeId::from_value(json!(0)).is_none());
        assert!(EmployeeId::from_value(json!("")).is_none());
        assert!(EmployeeId::from_value(Value::Null).is_none());
        assert!(EmployeeId::from_value(json!(false)).is_none());
    }

    #[test]
    fn test_clock_event_wire_format() {
        let session = Session::new("tok", EmployeeId::from_value(json!(987)).unwrap());
        let event = ClockEvent::new(&session, Coordinates::new(-27.5, -48.5));

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "idMutuario": 987,
                "latitude": -27.5,
                "longitude": -48.5,
                "precisao": 42.5,
                "meioBatida": "NAVEGADOR"
            })
        );
    }

    #[test]
    fn test_string_employee_id_sent_verbatim() {
        let session = Session::new("tok", EmployeeId::from_value(json!("00042")).unwrap());
        let event = ClockEvent::new(&session, Coordinates::fallback());
        let body = serde_json::to_value(&event).unwrap();
        assert_eq!(body["idMutuario"], "00042");
    }

    #[test]
    fn test_fallback_coordinates() {
        let fallback = Coordinates::fallback();
        assert_eq!(fallback.latitude, -27.572293);
        assert_eq!(fallback.longitude, -48.5095271);
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            Coordinates::parse_pair("-27.5954,-48.5480"),
            Some(Coordinates::new(-27.5954, -48.548))
        );
        assert_eq!(Coordinates::parse_pair("nope"), None);
        assert_eq!(Coordinates::parse_pair("1.0,"), None);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("bearer-xyz", EmployeeId::from_value(json!(1)).unwrap());
        assert!(!format!("{:?}", session).contains("bearer-xyz"));
    }
}
