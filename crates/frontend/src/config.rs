use geotrack_shared::config::TrackerConfig;
use geotrack_shared::error::TrackerError;

/// `localStorage` key holding optional JSON overrides for [`TrackerConfig`].
pub const STORAGE_KEY: &str = "geotrack.config";

/// Turn stored overrides into a config. Bad overrides fall back to the defaults
/// and the problem is handed back so it can be logged once logging is up.
pub fn resolve(stored: Option<String>) -> (TrackerConfig, Option<TrackerError>) {
    match stored {
        None => (TrackerConfig::default(), None),
        Some(json) if json.trim().is_empty() => (TrackerConfig::default(), None),
        Some(json) => match TrackerConfig::from_json(&json) {
            Ok(config) => (config, None),
            Err(e) => (TrackerConfig::default(), Some(e)),
        },
    }
}

fn read_stored() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(STORAGE_KEY).ok()?
}

/// Load the page config from `localStorage`.
pub fn load() -> (TrackerConfig, Option<TrackerError>) {
    resolve(read_stored())
}
