use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{LatLng, WatchOptions};
use crate::trail::{MAX_TRAIL_LIMIT, TRAIL_LIMIT};

/// Highest zoom level the OpenStreetMap tile servers publish.
pub const MAX_ZOOM: u8 = 22;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    pub url: String,
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

/// Style of the accuracy disc. Field names match Leaflet's path options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleStyle {
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for CircleStyle {
    fn default() -> Self {
        CircleStyle {
            color: "blue".to_string(),
            fill_color: "#30f".to_string(),
            fill_opacity: 0.2,
        }
    }
}

/// Style of the trail line. Field names match Leaflet's path options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: "red".to_string(),
            weight: 4.0,
            opacity: 0.7,
        }
    }
}

/// Everything tunable about the tracker page. Every field falls back to its
/// default when absent, so overrides can be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// DOM id of the element the map is mounted in.
    pub container_id: String,
    /// DOM id of the status text region.
    pub status_id: String,
    /// View shown before the first fix arrives.
    pub initial_view: MapView,
    /// Zoom used when re-centering on every reading.
    pub follow_zoom: u8,
    pub tiles: TileConfig,
    pub marker_label: String,
    pub accuracy_style: CircleStyle,
    pub path_style: LineStyle,
    pub trail_limit: usize,
    pub watch: WatchOptions,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            container_id: "map".to_string(),
            status_id: "status-message".to_string(),
            initial_view: MapView {
                center: LatLng::new(0.0, 0.0),
                zoom: 2,
            },
            follow_zoom: 16,
            tiles: TileConfig::default(),
            marker_label: "You are here!".to_string(),
            accuracy_style: CircleStyle::default(),
            path_style: LineStyle::default(),
            trail_limit: TRAIL_LIMIT,
            watch: WatchOptions::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parse (possibly partial) JSON overrides and validate the result.
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let config: TrackerConfig =
            serde_json::from_str(json).map_err(|e| TrackerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.trail_limit == 0 {
            return Err(TrackerError::Config("trailLimit must be at least 1".to_string()));
        }
        if self.trail_limit > MAX_TRAIL_LIMIT {
            return Err(TrackerError::Config(format!(
                "trailLimit must be at most {}",
                MAX_TRAIL_LIMIT
            )));
        }
        if self.follow_zoom > MAX_ZOOM || self.initial_view.zoom > MAX_ZOOM {
            return Err(TrackerError::Config(format!(
                "zoom levels must be within 0..={}",
                MAX_ZOOM
            )));
        }
        if self.tiles.url.trim().is_empty() {
            return Err(TrackerError::Config("tiles.url must not be empty".to_string()));
        }
        if self.container_id.is_empty() {
            return Err(TrackerError::Config("containerId must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_constants() {
        let c = TrackerConfig::default();
        assert_eq!(c.container_id, "map");
        assert_eq!(c.initial_view.center, LatLng::new(0.0, 0.0));
        assert_eq!(c.initial_view.zoom, 2);
        assert_eq!(c.follow_zoom, 16);
        assert_eq!(c.trail_limit, 50);
        assert_eq!(c.marker_label, "You are here!");
        assert!(c.tiles.attribution.contains("OpenStreetMap"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let c = TrackerConfig::from_json(r#"{ "followZoom": 18, "trailLimit": 10 }"#).unwrap();
        assert_eq!(c.follow_zoom, 18);
        assert_eq!(c.trail_limit, 10);
        assert_eq!(c.container_id, "map");
        assert_eq!(c.watch, WatchOptions::default());
    }

    #[test]
    fn test_nested_override() {
        let c = TrackerConfig::from_json(
            r#"{ "pathStyle": { "color": "green", "weight": 2, "opacity": 1 } }"#,
        )
        .unwrap();
        assert_eq!(c.path_style.color, "green");
        assert!((c.path_style.weight - 2.0).abs() < 1e-9);
        assert_eq!(c.accuracy_style, CircleStyle::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(TrackerConfig::from_json("{}").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = TrackerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_zero_trail_limit_rejected() {
        let err = TrackerConfig::from_json(r#"{ "trailLimit": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("trailLimit"));
    }

    #[test]
    fn test_oversized_trail_limit_rejected() {
        let err = TrackerConfig::from_json(r#"{ "trailLimit": 18446744073709551615 }"#).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(TrackerConfig::from_json(r#"{ "trailLimit": 10000 }"#).is_ok());
        assert!(TrackerConfig::from_json(r#"{ "trailLimit": 10001 }"#).is_err());
    }

    #[test]
    fn test_zoom_out_of_range_rejected() {
        assert!(TrackerConfig::from_json(r#"{ "followZoom": 30 }"#).is_err());
    }

    #[test]
    fn test_blank_tile_url_rejected() {
        let mut c = TrackerConfig::default();
        c.tiles.url = "  ".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_style_serializes_as_leaflet_options() {
        let json = serde_json::to_value(CircleStyle::default()).unwrap();
        assert_eq!(json["fillColor"], "#30f");
        assert_eq!(json["color"], "blue");
    }
}
