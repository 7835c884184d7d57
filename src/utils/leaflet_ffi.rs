// ============================================================================
// LEAFLET FFI - Foreign Function Interface for the global `L`
// ============================================================================
// Bindings and value conversions only. No state, no logic.
// Requires leaflet, leaflet.heat and leaflet-control-geocoder on the page.
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use crate::maps::MapError;
use crate::models::{LatLng, LatLngBounds};

#[wasm_bindgen]
extern "C" {
    // ---- Map ---------------------------------------------------------------

    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    #[derive(Clone)]
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container: &HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = getCenter)]
    pub fn get_center(this: &LeafletMap) -> JsValue;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &LeafletMap) -> f64;

    #[wasm_bindgen(catch, method, js_name = fitBounds)]
    pub fn fit_bounds(this: &LeafletMap, bounds: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = removeLayer)]
    pub fn remove_layer(this: &LeafletMap, layer: &Layer) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = addControl)]
    pub fn add_control(this: &LeafletMap, control: &Control) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = removeControl)]
    pub fn remove_control(this: &LeafletMap, control: &Control) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &LeafletMap, event: &str, handler: &js_sys::Function);

    /// Without a handler, drops every listener registered on the map
    #[wasm_bindgen(method, js_name = off)]
    pub fn off_all(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn destroy(this: &LeafletMap);

    // ---- Layers --------------------------------------------------------------

    #[wasm_bindgen(js_namespace = L, js_name = Layer)]
    #[derive(Clone)]
    pub type Layer;

    #[wasm_bindgen(catch, method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &LeafletMap) -> Result<Layer, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, content: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Layer) -> Layer;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &Layer, event: &str, handler: &js_sys::Function) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = TileLayer, extends = Layer)]
    #[derive(Clone)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = bringToBack)]
    pub fn bring_to_back(this: &TileLayer) -> TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = Marker, extends = Layer)]
    #[derive(Clone)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(position: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = getLatLng)]
    pub fn get_lat_lng(this: &Marker) -> JsValue;

    /// Icon element, only once the marker is on a map
    #[wasm_bindgen(method, js_name = getElement)]
    pub fn get_element(this: &Marker) -> Option<HtmlElement>;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    pub fn circle(center: &JsValue, options: &JsValue) -> Layer;

    /// leaflet.heat
    #[wasm_bindgen(catch, js_namespace = L, js_name = heatLayer)]
    pub fn heat_layer(points: &JsValue, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = LayerGroup, extends = Layer)]
    #[derive(Clone)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LayerGroup, layer: &Layer) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup) -> LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    pub fn icon(options: &JsValue) -> JsValue;

    // ---- Controls ------------------------------------------------------------

    #[wasm_bindgen(js_namespace = L, js_name = Control)]
    #[derive(Clone)]
    pub type Control;

    /// Bare control; `onAdd` is assigned afterwards
    #[wasm_bindgen(js_namespace = L, js_name = control)]
    pub fn control(options: &JsValue) -> Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = zoom)]
    pub fn zoom_control(options: &JsValue) -> Control;

    /// leaflet-control-geocoder
    #[wasm_bindgen(catch, js_namespace = ["L", "Control"], js_name = geocoder)]
    pub fn geocoder_control(options: &JsValue) -> Result<Control, JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &Control, event: &str, handler: &js_sys::Function) -> Control;

    #[wasm_bindgen(js_namespace = ["L", "DomEvent"], js_name = disableClickPropagation)]
    pub fn disable_click_propagation(element: &HtmlElement);
}

/// Plain JS object (not a Map) from any serializable value.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, MapError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| MapError::Bridge(format!("Serialization error: {}", e)))
}

pub fn latlng_to_js(position: LatLng) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(position.lat));
    array.push(&JsValue::from_f64(position.lng));
    array.into()
}

pub fn bounds_to_js(bounds: LatLngBounds) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&latlng_to_js(bounds.south_west));
    array.push(&latlng_to_js(bounds.north_east));
    array.into()
}

/// Reads a Leaflet `LatLng` (`{lat, lng}`).
pub fn latlng_from_js(value: &JsValue) -> Option<LatLng> {
    let lat = js_sys::Reflect::get(value, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(value, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some(LatLng::new(lat, lng))
}

/// Reads `object[key]` as a `LatLng`.
pub fn latlng_field(object: &JsValue, key: &str) -> Option<LatLng> {
    let field = js_sys::Reflect::get(object, &JsValue::from_str(key)).ok()?;
    latlng_from_js(&field)
}

/// Reads a Leaflet `LatLngBounds` (`{_southWest, _northEast}`).
pub fn bounds_from_js(value: &JsValue) -> Option<LatLngBounds> {
    let south_west = latlng_field(value, "_southWest")?;
    let north_east = latlng_field(value, "_northEast")?;
    Some(LatLngBounds::new(south_west, north_east))
}

pub fn string_field(object: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(object, &JsValue::from_str(key)).ok()?.as_string()
}
