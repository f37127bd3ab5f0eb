//! User-visible status texts.

use crate::error::TrackerError;
use crate::models::{Reading, SensorError, SensorErrorKind};

pub const LOADING: &str = "App loaded. Initializing map...";
pub const REQUESTING: &str = "Geolocation supported. Requesting position...";
pub const UNSUPPORTED: &str = "Error: Geolocation is not supported by your browser.";

const PERMISSION_DENIED: &str =
    "Error: Location access denied. Please enable location services for your browser.";
const POSITION_UNAVAILABLE: &str =
    "Error: Location information is unavailable. Check your device's GPS/Wi-Fi.";
const TIMEOUT: &str =
    "Error: The request to get user location timed out. Try again or check signal.";

/// Negative zero prints as `-0.000000`; browsers print it unsigned.
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Status line for a successful reading: 6 decimals for coordinates, whole meters for accuracy.
///
/// Accuracy halves round up (`12.5` shows as `13`).
pub fn location(reading: &Reading) -> String {
    format!(
        "Location: {:.6}, {:.6} (Accuracy: ±{:.0}m)",
        unsigned_zero(reading.position.lat),
        unsigned_zero(reading.position.lng),
        unsigned_zero(reading.accuracy_m.round())
    )
}

pub fn sensor_error(error: &SensorError) -> String {
    match error.kind {
        SensorErrorKind::PermissionDenied => PERMISSION_DENIED.to_string(),
        SensorErrorKind::PositionUnavailable => POSITION_UNAVAILABLE.to_string(),
        SensorErrorKind::Timeout => TIMEOUT.to_string(),
        SensorErrorKind::Unknown => {
            format!("Error: An unknown error occurred: {}", error.message)
        }
    }
}

pub fn init_failure(error: &TrackerError) -> String {
    format!("Critical error: could not initialize the map: {}", error)
}

/// Whether a status text reports a failure, for styling.
pub fn is_error(text: &str) -> bool {
    text.starts_with("Error") || text.starts_with("Critical error")
}
