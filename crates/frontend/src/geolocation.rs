use geotrack_shared::error::TrackerError;
use geotrack_shared::models::{Reading, SensorError, SensorErrorKind, TrackerEvent, WatchOptions};
use geotrack_shared::tracker::{EventSender, LocationSensor};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Position as GeolocationPosition, PositionError as GeolocationPositionError, PositionOptions,
};

use crate::leaflet::js_error_message;

type PositionCallback = Closure<dyn FnMut(GeolocationPosition)>;
type ErrorCallback = Closure<dyn FnMut(GeolocationPositionError)>;

/// `navigator.geolocation`, delivering every fix or error as a [`TrackerEvent`].
///
/// The callbacks live as long as this value; keep it alive for the page lifetime.
#[derive(Default)]
pub struct BrowserGeolocation {
    watch_id: Option<i32>,
    callbacks: Option<(PositionCallback, ErrorCallback)>,
}

impl BrowserGeolocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch_id(&self) -> Option<i32> {
        self.watch_id
    }

    pub fn is_watching(&self) -> bool {
        self.callbacks.is_some()
    }
}

pub fn reading_event(lat: f64, lng: f64, accuracy_m: f64) -> TrackerEvent {
    TrackerEvent::Reading(Reading::new(lat, lng, accuracy_m))
}

pub fn error_event(code: u16, message: String) -> TrackerEvent {
    TrackerEvent::SensorError(SensorError::new(SensorErrorKind::from_code(code), message))
}

fn position_options(options: &WatchOptions) -> PositionOptions {
    let opts = PositionOptions::new();
    opts.set_enable_high_accuracy(options.high_accuracy);
    opts.set_timeout(options.timeout_ms);
    opts.set_maximum_age(options.maximum_age_ms);
    opts
}

impl LocationSensor for BrowserGeolocation {
    fn is_available(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("geolocation"))
            .unwrap_or(false)
    }

    fn watch(&mut self, options: &WatchOptions, events: EventSender) -> Result<(), TrackerError> {
        let geolocation = web_sys::window()
            .ok_or_else(|| TrackerError::Subscription("no window".to_string()))?
            .navigator()
            .geolocation()
            .map_err(|e| TrackerError::Subscription(js_error_message(&e)))?;

        let tx = events.clone();
        let on_position: PositionCallback = Closure::new(move |position: GeolocationPosition| {
            let coords = position.coords();
            // The receiver only goes away with the page.
            let _ = tx.send(reading_event(
                coords.latitude(),
                coords.longitude(),
                coords.accuracy(),
            ));
        });
        let on_error: ErrorCallback = Closure::new(move |err: GeolocationPositionError| {
            let _ = events.send(error_event(err.code(), err.message()));
        });

        let id = geolocation
            .watch_position_with_error_callback_and_options(
                on_position.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options(options),
            )
            .map_err(|e| TrackerError::Subscription(js_error_message(&e)))?;
        debug!(watch_id = id, "geolocation watch registered");

        self.watch_id = Some(id);
        self.callbacks = Some((on_position, on_error));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_event_maps_codes() {
        match error_event(1, "User denied Geolocation".to_string()) {
            TrackerEvent::SensorError(e) => {
                assert_eq!(e.kind, SensorErrorKind::PermissionDenied);
                assert_eq!(e.message, "User denied Geolocation");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match error_event(3, String::new()) {
            TrackerEvent::SensorError(e) => assert_eq!(e.kind, SensorErrorKind::Timeout),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_reading_event() {
        assert_eq!(
            reading_event(1.5, -2.5, 30.0),
            TrackerEvent::Reading(Reading::new(1.5, -2.5, 30.0))
        );
    }

    #[test]
    fn test_new_has_no_watch() {
        let geo = BrowserGeolocation::new();
        assert!(geo.watch_id().is_none());
        assert!(!geo.is_watching());
    }
}
