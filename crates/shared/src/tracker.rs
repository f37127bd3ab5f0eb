use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::config::{CircleStyle, LineStyle, TrackerConfig};
use crate::error::TrackerError;
use crate::models::{LatLng, Reading, SensorError, TrackerEvent, WatchOptions};
use crate::status;
use crate::trail::Trail;

pub type EventSender = UnboundedSender<TrackerEvent>;
pub type EventReceiver = UnboundedReceiver<TrackerEvent>;

/// The single text region the user reads. Every call overwrites the previous text.
pub trait StatusSink {
    fn set_status(&mut self, text: String);
}

/// A live map view that overlays can be drawn on.
///
/// Handles are opaque to the tracker; it only hands them back to the surface
/// to update the overlay they were created for.
pub trait MapSurface {
    type Marker;
    type Circle;
    type Line;

    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Create a point marker with a label and reveal the label immediately.
    fn add_marker(&mut self, at: LatLng, label: &str) -> Self::Marker;
    fn move_marker(&mut self, marker: &Self::Marker, at: LatLng);

    fn add_circle(&mut self, center: LatLng, radius_m: f64, style: &CircleStyle) -> Self::Circle;
    fn update_circle(&mut self, circle: &Self::Circle, center: LatLng, radius_m: f64);

    fn add_line(&mut self, points: &[LatLng], style: &LineStyle) -> Self::Line;
    /// Replace the full vertex list of a line.
    fn set_line_points(&mut self, line: &Self::Line, points: &[LatLng]);
}

/// Builds the map view, positioned at the initial view with its tile layer attached.
pub trait MapFactory {
    type Surface: MapSurface;

    fn open(&mut self, config: &TrackerConfig) -> Result<Self::Surface, TrackerError>;
}

/// Continuous location sensing.
pub trait LocationSensor {
    fn is_available(&self) -> bool;

    /// Start a subscription that pushes every reading and error into `events`
    /// until the page goes away.
    fn watch(&mut self, options: &WatchOptions, events: EventSender) -> Result<(), TrackerError>;
}

struct Overlays<S: MapSurface> {
    marker: S::Marker,
    circle: S::Circle,
    line: S::Line,
}

/// Owns the map and the overlay state that follows the device.
pub struct LocationTracker<S: MapSurface> {
    map: S,
    follow_zoom: u8,
    marker_label: String,
    accuracy_style: CircleStyle,
    path_style: LineStyle,
    // Marker, circle and line are created together on the first reading.
    overlays: Option<Overlays<S>>,
    trail: Trail,
    readings_seen: u64,
    errors_seen: u64,
}

/// How startup ended.
pub enum Startup<S: MapSurface> {
    Tracking {
        tracker: LocationTracker<S>,
        events: EventReceiver,
    },
    /// Location sensing is missing. Terminal for the session.
    Unsupported,
    Failed(TrackerError),
}

/// Build the map, check for location sensing and subscribe to it.
///
/// Failures never escape: each one is reported through `status` and the log,
/// and the returned [`Startup`] says which state the page ended in.
pub fn start<F, L, D>(
    config: &TrackerConfig,
    factory: &mut F,
    sensor: &mut L,
    status: &mut D,
) -> Startup<F::Surface>
where
    F: MapFactory,
    L: LocationSensor,
    D: StatusSink,
{
    status.set_status(status::LOADING.to_string());

    let map = match factory.open(config) {
        Ok(map) => map,
        Err(e) => {
            error!("map initialization failed: {}", e);
            status.set_status(status::init_failure(&e));
            return Startup::Failed(e);
        }
    };
    info!(
        "map ready on #{} at zoom {}",
        config.container_id, config.initial_view.zoom
    );

    if !sensor.is_available() {
        error!("geolocation is not supported by this browser");
        status.set_status(status::UNSUPPORTED.to_string());
        return Startup::Unsupported;
    }

    let (tx, rx) = unbounded_channel();
    if let Err(e) = sensor.watch(&config.watch, tx) {
        error!("location subscription failed: {}", e);
        status.set_status(status::init_failure(&e));
        return Startup::Failed(e);
    }
    info!(
        high_accuracy = config.watch.high_accuracy,
        timeout_ms = config.watch.timeout_ms,
        maximum_age_ms = config.watch.maximum_age_ms,
        "watching position"
    );
    status.set_status(status::REQUESTING.to_string());

    Startup::Tracking {
        tracker: LocationTracker::new(map, config),
        events: rx,
    }
}

impl<S: MapSurface> LocationTracker<S> {
    pub fn new(map: S, config: &TrackerConfig) -> Self {
        LocationTracker {
            map,
            follow_zoom: config.follow_zoom,
            marker_label: config.marker_label.clone(),
            accuracy_style: config.accuracy_style.clone(),
            path_style: config.path_style.clone(),
            overlays: None,
            trail: Trail::with_limit(config.trail_limit),
            readings_seen: 0,
            errors_seen: 0,
        }
    }

    /// Process events one at a time until every sender is gone.
    pub async fn run<D: StatusSink>(&mut self, mut events: EventReceiver, status: &mut D) {
        while let Some(event) = events.recv().await {
            self.handle(event, status);
        }
        info!("location event stream closed");
    }

    pub fn handle<D: StatusSink>(&mut self, event: TrackerEvent, status: &mut D) {
        match event {
            TrackerEvent::Reading(reading) => self.handle_reading(&reading, status),
            TrackerEvent::SensorError(err) => self.handle_error(&err, status),
        }
    }

    pub fn handle_reading<D: StatusSink>(&mut self, reading: &Reading, status: &mut D) {
        let at = reading.position;
        self.readings_seen += 1;
        debug!(
            lat = at.lat,
            lng = at.lng,
            accuracy_m = reading.accuracy_m,
            "position update"
        );

        status.set_status(status::location(reading));
        self.map.set_view(at, self.follow_zoom);

        match self.overlays.as_ref() {
            Some(o) => {
                self.map.move_marker(&o.marker, at);
                self.map.update_circle(&o.circle, at, reading.accuracy_m);
                self.trail.push(at);
                self.map.set_line_points(&o.line, self.trail.points());
            }
            None => {
                let marker = self.map.add_marker(at, &self.marker_label);
                let circle = self
                    .map
                    .add_circle(at, reading.accuracy_m, &self.accuracy_style);
                self.trail.push(at);
                let line = self.map.add_line(self.trail.points(), &self.path_style);
                self.overlays = Some(Overlays {
                    marker,
                    circle,
                    line,
                });
            }
        }

        if self.trail.trim() {
            if let Some(o) = self.overlays.as_ref() {
                self.map.set_line_points(&o.line, self.trail.points());
            }
        }
    }

    /// Report a sensor error. Overlays and trail stay as they are.
    pub fn handle_error<D: StatusSink>(&mut self, err: &SensorError, status: &mut D) {
        self.errors_seen += 1;
        warn!(kind = %err.kind, "geolocation error: {}", err.message);
        status.set_status(status::sensor_error(err));
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn has_overlays(&self) -> bool {
        self.overlays.is_some()
    }

    pub fn readings_seen(&self) -> u64 {
        self.readings_seen
    }

    pub fn errors_seen(&self) -> u64 {
        self.errors_seen
    }

    pub fn map(&self) -> &S {
        &self.map
    }
}
