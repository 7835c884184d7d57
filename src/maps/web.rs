// ============================================================================
// LEAFLET VIEWPORT - `ViewportControl` on top of Leaflet
// ============================================================================
// Every Leaflet callback is turned into a `MapEvent` and handed to
// `crate::dispatch`, which runs it after the current call stack unwinds.
// ============================================================================

use std::collections::{BTreeMap, HashMap};
use gloo_events::EventListener;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use crate::models::{GeocodeOutcome, GeocodeResult, LatLng, LatLngBounds, TileSource};
use crate::state::MapEvent;
use crate::utils::constants::{
    MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR, MARKER_SHADOW, MARKER_SHADOW_SIZE,
    DEFAULT_MARKER_ICON,
};
use crate::utils::leaflet_ffi::{
    self as leaflet, bounds_from_js, bounds_to_js, latlng_field, latlng_from_js, latlng_to_js, string_field, to_js,
    Control, Layer, LayerGroup, LeafletMap, Marker, TileLayer,
};
use crate::viewmodels::marker_viewmodel::{MarkerKind, MarkerView, RadiusCircle};
use crate::views::{render_catalog_popup, render_mode_control, render_user_marker_popup, render_weather_card};
use super::{ControlKind, ControlPosition, ControlSpec, GeocoderOptions, MapError, OverlayHandle, OverlayLayer, ViewportControl};

const TILE_MAX_ZOOM: u8 = 19;

type EventClosure = Closure<dyn FnMut(JsValue)>;
type FactoryClosure = Closure<dyn FnMut() -> JsValue>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
    zoom_control: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IconOptions<'a> {
    icon_url: &'a str,
    shadow_url: &'a str,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
    popup_anchor: [i32; 2],
    shadow_size: [u32; 2],
}

#[derive(Serialize)]
struct MarkerOptions<'a> {
    draggable: bool,
    title: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleOptions<'a> {
    radius: f64,
    color: &'a str,
    fill_color: &'a str,
    fill_opacity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatOptions {
    radius: u32,
    blur: u32,
    max_zoom: u8,
    gradient: BTreeMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeocoderJsOptions<'a> {
    default_mark_geocode: bool,
    position: &'a str,
    placeholder: &'a str,
    error_message: &'a str,
    suggest_min_length: u32,
    suggest_timeout: u32,
    query_min_length: u32,
}

#[derive(Serialize)]
struct PositionOptions<'a> {
    position: &'a str,
}

/// A control on the map plus the closures it calls into.
struct InstalledControl {
    control: Control,
    _listeners: Vec<EventClosure>,
    _dom_listeners: Vec<EventListener>,
    _on_add: Option<FactoryClosure>,
}

impl InstalledControl {
    fn bare(control: Control) -> Self {
        Self { control, _listeners: Vec::new(), _dom_listeners: Vec::new(), _on_add: None }
    }
}

pub struct LeafletViewport {
    map: Option<LeafletMap>,
    fallback_center: LatLng,
    fallback_zoom: u8,
    tile_layer: Option<TileLayer>,
    marker_layer: LayerGroup,
    marker_listeners: Vec<EventClosure>,
    /// Popup buttons and inputs; dropped with the markers they belong to
    popup_listeners: Vec<EventListener>,
    layers: HashMap<OverlayHandle, Layer>,
    controls: HashMap<OverlayHandle, InstalledControl>,
    map_listeners: Vec<EventClosure>,
    next_handle: u32,
}

impl LeafletViewport {
    /// Create the Leaflet map inside `container`. The built-in zoom control is
    /// disabled; `ZoomControl` installs one bottom-right.
    pub fn new(container: &HtmlElement, center: LatLng, zoom: u8) -> Result<Self, MapError> {
        let options = to_js(&MapOptions {
            center: center.to_array(),
            zoom,
            zoom_control: false,
        })?;
        let map = leaflet::create_map(container, &options)?;

        let marker_layer = leaflet::layer_group();
        marker_layer.add_to(&map)?;

        let mut viewport = Self {
            map: Some(map),
            fallback_center: center,
            fallback_zoom: zoom,
            tile_layer: None,
            marker_layer,
            marker_listeners: Vec::new(),
            popup_listeners: Vec::new(),
            layers: HashMap::new(),
            controls: HashMap::new(),
            map_listeners: Vec::new(),
            next_handle: 0,
        };
        viewport.listen_to_map()?;
        log::info!("🗺️ [MAP] Leaflet map created at ({}, {}) zoom {}", center.lat, center.lng, zoom);
        Ok(viewport)
    }

    fn map(&self) -> Result<&LeafletMap, MapError> {
        self.map.as_ref().ok_or(MapError::NotReady)
    }

    fn allocate(&mut self) -> OverlayHandle {
        self.next_handle += 1;
        OverlayHandle(self.next_handle)
    }

    fn listen_to_map(&mut self) -> Result<(), MapError> {
        let map = self.map()?.clone();

        let on_click = Closure::wrap(Box::new(move |e: JsValue| {
            match latlng_field(&e, "latlng") {
                Some(at) => crate::dispatch(MapEvent::ViewportClicked(at)),
                None => log::warn!("⚠️ [MAP] Click event without latlng"),
            }
        }) as Box<dyn FnMut(JsValue)>);
        map.on("click", on_click.as_ref().unchecked_ref());

        let moved_map = map.clone();
        let on_move_end = Closure::wrap(Box::new(move |_e: JsValue| {
            if let Some(center) = latlng_from_js(&moved_map.get_center()) {
                let zoom = moved_map.get_zoom().round().clamp(0.0, u8::MAX as f64) as u8;
                crate::dispatch(MapEvent::ViewportMoved { center, zoom });
            }
        }) as Box<dyn FnMut(JsValue)>);
        map.on("moveend", on_move_end.as_ref().unchecked_ref());

        self.map_listeners.push(on_click);
        self.map_listeners.push(on_move_end);
        Ok(())
    }

    fn marker_icon(icon_url: &str) -> Result<JsValue, MapError> {
        let options = to_js(&IconOptions {
            icon_url,
            shadow_url: MARKER_SHADOW,
            icon_size: [MARKER_ICON_SIZE.0, MARKER_ICON_SIZE.1],
            icon_anchor: [MARKER_ICON_ANCHOR.0, MARKER_ICON_ANCHOR.1],
            popup_anchor: [MARKER_POPUP_ANCHOR.0, MARKER_POPUP_ANCHOR.1],
            shadow_size: [MARKER_SHADOW_SIZE.0, MARKER_SHADOW_SIZE.1],
        })?;
        Ok(leaflet::icon(&options))
    }

    fn build_marker(view: &MarkerView) -> Result<Marker, MapError> {
        let options = to_js(&MarkerOptions {
            draggable: view.draggable,
            title: &view.title,
        })?;
        js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &Self::marker_icon(view.icon_url)?)?;
        Ok(leaflet::marker(&latlng_to_js(view.position), &options))
    }

    fn add_catalog_marker(&mut self, index: usize, view: &MarkerView) -> Result<(), MapError> {
        let marker = Self::build_marker(view)?;
        let (popup, listeners) = render_catalog_popup(index, &view.title, &view.body)?.into_parts();
        marker.bind_popup(&popup);
        self.popup_listeners.extend(listeners);

        let on_click = Closure::wrap(Box::new(move |_e: JsValue| {
            crate::dispatch(MapEvent::CatalogMarkerActivated(index));
        }) as Box<dyn FnMut(JsValue)>);
        marker.on("click", on_click.as_ref().unchecked_ref());

        self.marker_layer.add_layer(&marker);
        self.marker_listeners.push(on_click);
        Ok(())
    }

    fn add_user_marker(&mut self, view: &MarkerView) -> Result<(), MapError> {
        let MarkerKind::User(id) = view.kind else {
            return Err(MapError::Unknown("catalog entry passed as user marker".to_string()));
        };
        let marker = Self::build_marker(view)?;
        let (popup, listeners) = render_user_marker_popup(id, &view.title, &view.body)?.into_parts();
        marker.bind_popup(&popup);
        self.popup_listeners.extend(listeners);

        let dragged = marker.clone();
        let on_drag_end = Closure::wrap(Box::new(move |_e: JsValue| {
            match latlng_from_js(&dragged.get_lat_lng()) {
                Some(position) => crate::dispatch(MapEvent::UserMarkerDragged { id, position }),
                None => log::warn!("⚠️ [MARKERS] Drag end without position for {}", id),
            }
        }) as Box<dyn FnMut(JsValue)>);
        marker.on("dragend", on_drag_end.as_ref().unchecked_ref());

        self.marker_layer.add_layer(&marker);
        self.marker_listeners.push(on_drag_end);
        Ok(())
    }

    fn add_circle(&self, circle: &RadiusCircle) -> Result<(), MapError> {
        let options = to_js(&CircleOptions {
            radius: circle.radius_m,
            color: &circle.color,
            fill_color: &circle.color,
            fill_opacity: circle.fill_opacity,
        })?;
        self.marker_layer.add_layer(&leaflet::circle(&latlng_to_js(circle.center), &options));
        Ok(())
    }

    fn heat_layer(points: &[crate::overlays::WeightedPoint], options: &crate::overlays::HeatmapOptions) -> Result<Layer, MapError> {
        let arrays: Vec<[f64; 3]> = points.iter().map(|p| p.to_array()).collect();
        let gradient = options
            .gradient
            .iter()
            .map(|(stop, color)| (stop.to_string(), color.clone()))
            .collect();
        let js_options = to_js(&HeatOptions {
            radius: options.radius,
            blur: options.blur,
            max_zoom: options.max_zoom,
            gradient,
        })?;
        Ok(leaflet::heat_layer(&to_js(&arrays)?, &js_options)?)
    }

    fn transient_marker(&self, position: LatLng, label: &str, entrance_class: Option<&str>) -> Result<Layer, MapError> {
        let map = self.map()?;
        let options = to_js(&MarkerOptions { draggable: false, title: label })?;
        js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &Self::marker_icon(DEFAULT_MARKER_ICON)?)?;
        let marker = leaflet::marker(&latlng_to_js(position), &options);
        marker.add_to(map)?;
        marker.bind_popup(&JsValue::from_str(label));
        marker.open_popup();
        if let (Some(class), Some(element)) = (entrance_class, marker.get_element()) {
            element.class_list().add_1(class)?;
        }
        Ok(marker.unchecked_into::<Layer>())
    }

    fn element_control(position: ControlPosition, element: HtmlElement) -> Result<(Control, FactoryClosure), MapError> {
        let control = leaflet::control(&to_js(&PositionOptions { position: position.as_str() })?);
        let on_add = Closure::wrap(Box::new(move || -> JsValue { element.clone().into() }) as Box<dyn FnMut() -> JsValue>);
        js_sys::Reflect::set(&control, &JsValue::from_str("onAdd"), on_add.as_ref())?;
        Ok((control, on_add))
    }

    fn geocoder(position: ControlPosition, options: &GeocoderOptions) -> Result<InstalledControl, MapError> {
        let js_options = to_js(&GeocoderJsOptions {
            default_mark_geocode: false,
            position: position.as_str(),
            placeholder: &options.placeholder,
            error_message: &options.error_message,
            suggest_min_length: options.suggest_min_length,
            suggest_timeout: options.suggest_timeout_ms,
            query_min_length: options.query_min_length,
        })?;
        let control = leaflet::geocoder_control(&js_options)?;

        let on_mark = Closure::wrap(Box::new(move |e: JsValue| {
            match geocode_result_from_event(&e) {
                Some(result) => crate::dispatch(MapEvent::GeocodeFinished(GeocodeOutcome::Found(result))),
                None => log::warn!("⚠️ [SEARCH] Unreadable geocode result"),
            }
        }) as Box<dyn FnMut(JsValue)>);
        control.on("markgeocode", on_mark.as_ref().unchecked_ref());

        let on_finish = Closure::wrap(Box::new(move |e: JsValue| {
            let empty = js_sys::Reflect::get(&e, &JsValue::from_str("results"))
                .ok()
                .and_then(|r| r.dyn_into::<js_sys::Array>().ok())
                .map(|r| r.length() == 0)
                .unwrap_or(true);
            if empty {
                let query = string_field(&e, "input").unwrap_or_default();
                crate::dispatch(MapEvent::GeocodeFinished(GeocodeOutcome::NoMatch { query }));
            }
        }) as Box<dyn FnMut(JsValue)>);
        control.on("finishgeocode", on_finish.as_ref().unchecked_ref());

        Ok(InstalledControl {
            _listeners: vec![on_mark, on_finish],
            ..InstalledControl::bare(control)
        })
    }

    fn build_control(spec: &ControlSpec) -> Result<InstalledControl, MapError> {
        match &spec.kind {
            ControlKind::Geocoder(options) => Self::geocoder(spec.position, options),
            ControlKind::Zoom => {
                let control = leaflet::zoom_control(&to_js(&PositionOptions { position: spec.position.as_str() })?);
                Ok(InstalledControl::bare(control))
            }
            ControlKind::Weather(report) => {
                let element = render_weather_card(report)?.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
                let (control, on_add) = Self::element_control(spec.position, element)?;
                Ok(InstalledControl { _on_add: Some(on_add), ..InstalledControl::bare(control) })
            }
            ControlKind::ModeButtons { add_marker_active, heatmap_active } => {
                let (element, dom_listeners) = render_mode_control(*add_marker_active, *heatmap_active)?.into_parts();
                let element = element.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
                leaflet::disable_click_propagation(&element);
                let (control, on_add) = Self::element_control(spec.position, element)?;
                Ok(InstalledControl {
                    _dom_listeners: dom_listeners,
                    _on_add: Some(on_add),
                    ..InstalledControl::bare(control)
                })
            }
        }
    }
}

fn geocode_result_from_event(event: &JsValue) -> Option<GeocodeResult> {
    let geocode = js_sys::Reflect::get(event, &JsValue::from_str("geocode")).ok()?;
    let center = latlng_field(&geocode, "center")?;
    let bbox = js_sys::Reflect::get(&geocode, &JsValue::from_str("bbox")).ok()?;
    let bounds = bounds_from_js(&bbox).unwrap_or_else(|| LatLngBounds::new(center, center));
    let label = string_field(&geocode, "name").unwrap_or_default();
    Some(GeocodeResult { center, bounds, label })
}

impl ViewportControl for LeafletViewport {
    fn center(&self) -> LatLng {
        self.map
            .as_ref()
            .and_then(|m| latlng_from_js(&m.get_center()))
            .unwrap_or(self.fallback_center)
    }

    fn zoom(&self) -> u8 {
        self.map
            .as_ref()
            .map(|m| m.get_zoom().round().clamp(0.0, u8::MAX as f64) as u8)
            .unwrap_or(self.fallback_zoom)
    }

    fn set_tile_source(&mut self, source: TileSource) -> Result<(), MapError> {
        let map = self.map()?.clone();
        let options = to_js(&TileOptions {
            attribution: source.attribution,
            max_zoom: TILE_MAX_ZOOM,
        })?;
        let layer = leaflet::tile_layer(source.url_template, &options);
        layer.add_to(&map)?;
        layer.bring_to_back();
        if let Some(previous) = self.tile_layer.replace(layer) {
            map.remove_layer(&previous)?;
        }
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) -> Result<(), MapError> {
        if !bounds.is_valid() {
            return Err(MapError::InvalidCoordinates);
        }
        self.map()?.fit_bounds(&bounds_to_js(bounds))?;
        Ok(())
    }

    fn add_layer(&mut self, layer: OverlayLayer) -> Result<OverlayHandle, MapError> {
        let installed = match &layer {
            OverlayLayer::Heatmap { points, options } => {
                let heat = Self::heat_layer(points, options)?;
                heat.add_to(self.map()?)?;
                heat
            }
            OverlayLayer::TransientMarker { position, label, entrance } => {
                self.transient_marker(*position, label, entrance.css_class())?
            }
        };
        let handle = self.allocate();
        self.layers.insert(handle, installed);
        Ok(handle)
    }

    fn add_control(&mut self, control: ControlSpec) -> Result<OverlayHandle, MapError> {
        let installed = Self::build_control(&control)?;
        self.map()?.add_control(&installed.control)?;
        let handle = self.allocate();
        self.controls.insert(handle, installed);
        Ok(handle)
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<(), MapError> {
        let map = self.map()?.clone();
        if let Some(layer) = self.layers.remove(&handle) {
            map.remove_layer(&layer)?;
            return Ok(());
        }
        if let Some(installed) = self.controls.remove(&handle) {
            map.remove_control(&installed.control)?;
            return Ok(());
        }
        Err(MapError::UnknownHandle(handle))
    }

    fn render_markers(&mut self, markers: &[MarkerView], circles: &[RadiusCircle]) -> Result<(), MapError> {
        self.map()?;
        self.marker_layer.clear_layers();
        self.marker_listeners.clear();
        self.popup_listeners.clear();

        for circle in circles {
            self.add_circle(circle)?;
        }
        for view in markers {
            match view.kind {
                MarkerKind::Catalog(index) => self.add_catalog_marker(index, view)?,
                MarkerKind::User(_) => self.add_user_marker(view)?,
            }
        }
        log::debug!("📍 [MARKERS] Rendered {} markers, {} radius circles", markers.len(), circles.len());
        Ok(())
    }

    fn refresh_size(&mut self) {
        if let Some(map) = &self.map {
            map.invalidate_size();
        }
    }

    fn destroy(&mut self) {
        if let Some(map) = self.map.take() {
            map.off_all();
            map.destroy();
        }
        self.layers.clear();
        self.controls.clear();
        self.marker_listeners.clear();
        self.popup_listeners.clear();
        self.map_listeners.clear();
        self.tile_layer = None;
        log::info!("🧹 [MAP] Leaflet map removed");
    }
}
