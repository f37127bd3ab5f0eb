use dioxus::prelude::*;
use geotrack_shared::config::TrackerConfig;
use geotrack_shared::tracker::{self, StatusSink, Startup};
use tracing::{info, warn};

use crate::components::status_bar::StatusBar;
use crate::geolocation::BrowserGeolocation;
use crate::leaflet::LeafletFactory;

/// Where the page ended up after startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Starting,
    Tracking,
    Unsupported,
    Failed,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Starting => "starting",
            Phase::Tracking => "live",
            Phase::Unsupported => "unsupported",
            Phase::Failed => "offline",
        }
    }
}

/// Status text backed by a signal, so every overwrite re-renders the status bar.
#[derive(Clone, Copy)]
struct StatusText(Signal<String>);

impl StatusSink for StatusText {
    fn set_status(&mut self, text: String) {
        self.0.set(text);
    }
}

#[component]
pub fn Tracker() -> Element {
    let config = use_context::<TrackerConfig>();
    let status = use_signal(String::new);
    let mut phase = use_signal(|| Phase::Starting);

    // Runs once the map container is in the DOM. Nothing here is read
    // reactively, so it never re-runs.
    let startup_config = config.clone();
    use_effect(move || {
        let mut sink = StatusText(status);
        let mut sensor = BrowserGeolocation::new();

        match tracker::start(&startup_config, &mut LeafletFactory, &mut sensor, &mut sink) {
            Startup::Tracking {
                tracker: mut location_tracker,
                events,
            } => {
                phase.set(Phase::Tracking);
                spawn(async move {
                    // The sensor owns the platform callbacks; keep it for as long as events flow.
                    let sensor = sensor;
                    info!(
                        watch_id = ?sensor.watch_id(),
                        watching = sensor.is_watching(),
                        "tracking started"
                    );
                    location_tracker.run(events, &mut sink).await;
                    drop(sensor);
                });
            }
            Startup::Unsupported => phase.set(Phase::Unsupported),
            Startup::Failed(e) => {
                warn!(phase = Phase::Failed.label(), "tracker offline: {}", e);
                phase.set(Phase::Failed);
            }
        }
    });

    let phase_label = phase.read().label();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Live Location Tracker" }
                span {
                    class: "phase phase-{phase_label}",
                    "{phase_label}"
                }
            }
            StatusBar { id: config.status_id.clone(), text: status }
            div { id: "{config.container_id}", class: "map" }
        }
    }
}
