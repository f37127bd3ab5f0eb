use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// One sensed position report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub position: LatLng,
    /// Radius of the 95% confidence disc, in meters.
    pub accuracy_m: f64,
}

impl Reading {
    pub fn new(lat: f64, lng: f64, accuracy_m: f64) -> Self {
        Reading {
            position: LatLng::new(lat, lng),
            accuracy_m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorErrorKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl SensorErrorKind {
    /// Map a W3C `GeolocationPositionError.code` to a kind.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => SensorErrorKind::PermissionDenied,
            2 => SensorErrorKind::PositionUnavailable,
            3 => SensorErrorKind::Timeout,
            _ => SensorErrorKind::Unknown,
        }
    }

    /// Map the constant name (`"PERMISSION_DENIED"` etc.) to a kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "PERMISSION_DENIED" => SensorErrorKind::PermissionDenied,
            "POSITION_UNAVAILABLE" => SensorErrorKind::PositionUnavailable,
            "TIMEOUT" => SensorErrorKind::Timeout,
            _ => SensorErrorKind::Unknown,
        }
    }
}

impl std::fmt::Display for SensorErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorErrorKind::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            SensorErrorKind::PositionUnavailable => write!(f, "POSITION_UNAVAILABLE"),
            SensorErrorKind::Timeout => write!(f, "TIMEOUT"),
            SensorErrorKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// An error delivered by the location subscription. Never fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorError {
    pub kind: SensorErrorKind,
    pub message: String,
}

impl SensorError {
    pub fn new(kind: SensorErrorKind, message: impl Into<String>) -> Self {
        SensorError {
            kind,
            message: message.into(),
        }
    }
}

/// Everything the location subscription can push at the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    Reading(Reading),
    SensorError(SensorError),
}

/// Characteristics requested from the continuous location subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        WatchOptions {
            high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 0,
        }
    }
}
