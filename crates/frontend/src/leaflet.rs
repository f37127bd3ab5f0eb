//! Bindings to the Leaflet global `L`, loaded as a page script.

use geotrack_shared::config::{CircleStyle, LineStyle, TileConfig, TrackerConfig};
use geotrack_shared::error::TrackerError;
use geotrack_shared::models::LatLng;
use geotrack_shared::tracker::{MapFactory, MapSurface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container_id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setView)]
    fn try_set_view(this: &Map, center: &JsValue, zoom: u8) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: u8);

    pub type Layer;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    fn try_add_to(this: &Layer, map: &Map) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map);

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn create_tile_layer(url: &str, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(extends = Layer)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn create_marker(at: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn move_to(this: &Marker, at: &JsValue);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker);

    #[wasm_bindgen(extends = Layer)]
    pub type Circle;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    fn create_circle(center: &JsValue, options: &JsValue) -> Circle;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_center(this: &Circle, center: &JsValue);

    #[wasm_bindgen(method, js_name = setRadius)]
    fn set_radius(this: &Circle, radius_m: f64);

    #[wasm_bindgen(extends = Layer)]
    pub type Polyline;

    #[wasm_bindgen(js_namespace = L, js_name = polyline)]
    fn create_polyline(points: &JsValue, options: &JsValue) -> Polyline;

    #[wasm_bindgen(method, js_name = setLatLngs)]
    fn set_lat_lngs(this: &Polyline, points: &JsValue);
}

/// Best-effort text of a thrown JS value.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn init_error(err: JsValue) -> TrackerError {
    TrackerError::Initialization(js_error_message(&err))
}

fn lat_lng(p: LatLng) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng)).into()
}

fn lat_lngs(points: &[LatLng]) -> JsValue {
    points
        .iter()
        .map(|p| lat_lng(*p))
        .collect::<js_sys::Array>()
        .into()
}

/// Leaflet options object for the tile layer.
pub fn tile_options(tiles: &TileConfig) -> serde_json::Value {
    serde_json::json!({ "attribution": tiles.attribution })
}

/// Leaflet options object for the accuracy circle: the style plus its radius.
pub fn circle_options(style: &CircleStyle, radius_m: f64) -> serde_json::Value {
    let mut options = serde_json::to_value(style).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = options.as_object_mut() {
        obj.insert("radius".to_string(), serde_json::json!(radius_m));
    }
    options
}

pub fn line_options(style: &LineStyle) -> serde_json::Value {
    serde_json::to_value(style).unwrap_or_else(|_| serde_json::json!({}))
}

fn to_js(value: &serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::UNDEFINED)
}

/// Creates the Leaflet map in the configured container.
pub struct LeafletFactory;

impl MapFactory for LeafletFactory {
    type Surface = LeafletMap;

    fn open(&mut self, config: &TrackerConfig) -> Result<LeafletMap, TrackerError> {
        let map = create_map(&config.container_id).map_err(init_error)?;
        map.try_set_view(&lat_lng(config.initial_view.center), config.initial_view.zoom)
            .map_err(init_error)?;

        let tiles = create_tile_layer(&config.tiles.url, &to_js(&tile_options(&config.tiles)))
            .map_err(init_error)?;
        tiles.try_add_to(&map).map_err(init_error)?;

        Ok(LeafletMap { map })
    }
}

pub struct LeafletMap {
    map: Map,
}

impl MapSurface for LeafletMap {
    type Marker = Marker;
    type Circle = Circle;
    type Line = Polyline;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_marker(&mut self, at: LatLng, label: &str) -> Marker {
        let marker = create_marker(&lat_lng(at));
        marker.add_to(&self.map);
        marker.bind_popup(label);
        marker.open_popup();
        marker
    }

    fn move_marker(&mut self, marker: &Marker, at: LatLng) {
        marker.move_to(&lat_lng(at));
    }

    fn add_circle(&mut self, center: LatLng, radius_m: f64, style: &CircleStyle) -> Circle {
        let circle = create_circle(&lat_lng(center), &to_js(&circle_options(style, radius_m)));
        circle.add_to(&self.map);
        circle
    }

    fn update_circle(&mut self, circle: &Circle, center: LatLng, radius_m: f64) {
        circle.set_center(&lat_lng(center));
        circle.set_radius(radius_m);
    }

    fn add_line(&mut self, points: &[LatLng], style: &LineStyle) -> Polyline {
        let line = create_polyline(&lat_lngs(points), &to_js(&line_options(style)));
        line.add_to(&self.map);
        line
    }

    fn set_line_points(&mut self, line: &Polyline, points: &[LatLng]) {
        line.set_lat_lngs(&lat_lngs(points));
    }
}
