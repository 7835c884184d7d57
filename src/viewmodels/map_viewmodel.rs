// ============================================================================
// MAP VIEWMODEL - Routes UI events to state and overlays
// ============================================================================
// Owns the viewport and every overlay attached to it. The viewport is a
// type parameter so the same logic drives Leaflet in the browser and the
// in-memory viewport in tests.
// ============================================================================

use std::cell::RefCell;
use std::rc::Weak;
use crate::config::{AppConfig, GeocoderConfig};
use crate::maps::{MapError, OverlaySlot, ViewportControl};
use crate::models::{GeocodeOutcome, WeatherReport};
use crate::overlays::{
    GeocoderControl, HeatmapOptions, HeatmapOverlay, ModeControl, SearchResultMarker, WeatherCard, ZoomControl,
};
use crate::state::{AppState, MapEvent};
use crate::viewmodels::marker_viewmodel::MarkerViewModel;

pub struct MapViewModel<V: ViewportControl> {
    state: AppState,
    viewport: V,
    heatmap_options: HeatmapOptions,
    geocoder_config: GeocoderConfig,

    geocoder: OverlaySlot<GeocoderControl>,
    zoom: OverlaySlot<ZoomControl>,
    mode_control: OverlaySlot<ModeControl>,
    heatmap: OverlaySlot<HeatmapOverlay>,
    weather_card: OverlaySlot<WeatherCard>,
    search_marker: OverlaySlot<SearchResultMarker>,

    torn_down: bool,
}

impl<V: ViewportControl> MapViewModel<V> {
    pub fn new(state: AppState, viewport: V, config: &AppConfig) -> Self {
        Self {
            state,
            viewport,
            heatmap_options: HeatmapOptions::from(&config.heatmap_config),
            geocoder_config: config.geocoder_config.clone(),
            geocoder: OverlaySlot::new(),
            zoom: OverlaySlot::new(),
            mode_control: OverlaySlot::new(),
            heatmap: OverlaySlot::new(),
            weather_card: OverlaySlot::new(),
            search_marker: OverlaySlot::new(),
            torn_down: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Base tiles, markers and the always-on controls. A heatmap left on by a
    /// previous map over the same state is drawn again.
    pub fn mount(&mut self) -> Result<(), MapError> {
        let style = self.state.viewport_snapshot().tile_style;
        self.viewport.set_tile_source(style.tile_source())?;
        self.sync_markers()?;
        self.geocoder.mount(GeocoderControl::new(&self.geocoder_config), &mut self.viewport)?;
        self.zoom.mount(ZoomControl, &mut self.viewport)?;
        if self.state.is_heatmap_active() {
            self.install_heatmap()?;
        }
        self.refresh_mode_control()?;
        log::info!("✅ [MAP] Map mounted ({} catalog points, style {})", self.state.catalog.len(), style.as_str());
        Ok(())
    }

    pub fn handle(&mut self, event: MapEvent) -> Result<(), MapError> {
        if self.torn_down {
            log::debug!("🔇 [MAP] Dropping {:?}, map already torn down", event);
            return Ok(());
        }

        match event {
            MapEvent::ViewportClicked(at) => {
                if self.state.handle_viewport_click(at).is_some() {
                    self.sync_markers()?;
                }
            }
            MapEvent::ViewportMoved { center, zoom } => {
                self.state.viewport_moved(center, zoom);
            }
            MapEvent::CatalogMarkerActivated(index) => {
                self.state.open_detail(index);
            }
            MapEvent::DetailPanelClosed => {
                self.state.close_detail();
            }
            MapEvent::ToggleAddMarkerMode => {
                self.state.toggle_add_marker_mode();
                self.refresh_mode_control()?;
            }
            MapEvent::ToggleHeatmap => {
                self.toggle_heatmap()?;
            }
            MapEvent::TileStyleSelected(raw) => {
                let style = self.state.select_tile_style(&raw);
                self.viewport.set_tile_source(style.tile_source())?;
            }
            MapEvent::UserMarkerDragged { id, position } => {
                if !self.state.move_marker(id, position) {
                    log::warn!("⚠️ [MARKERS] Drag ignored for marker {}", id);
                }
            }
            // The popup inputs already show the new text; only the state changes
            MapEvent::UserMarkerTitleEdited { id, title } => {
                self.state.edit_marker_title(id, &title);
            }
            MapEvent::UserMarkerNoteEdited { id, note } => {
                self.state.edit_marker_note(id, &note);
            }
            MapEvent::UserMarkerRemoved(id) => {
                if self.state.remove_marker(id) {
                    self.sync_markers()?;
                }
            }
            MapEvent::GeocodeFinished(outcome) => {
                self.apply_geocode(outcome)?;
            }
            MapEvent::WeatherLoaded(report) => {
                self.show_weather(report)?;
            }
        }
        Ok(())
    }

    /// Redraw catalog + user markers from the current state
    pub fn sync_markers(&mut self) -> Result<(), MapError> {
        let markers = self.state.markers.borrow();
        let views = MarkerViewModel::all_markers(&self.state.catalog, markers.as_slice());
        let circles = MarkerViewModel::radius_circles(&self.state.catalog);
        self.viewport.render_markers(&views, &circles)
    }

    fn refresh_mode_control(&mut self) -> Result<(), MapError> {
        let control = ModeControl {
            add_marker_active: self.state.is_add_marker_mode(),
            heatmap_active: self.state.is_heatmap_active(),
        };
        self.mode_control.mount(control, &mut self.viewport)?;
        Ok(())
    }

    fn toggle_heatmap(&mut self) -> Result<(), MapError> {
        if self.heatmap.is_mounted() {
            self.heatmap.unmount(&mut self.viewport)?;
            self.state.set_heatmap_active(false);
        } else {
            self.install_heatmap()?;
        }
        self.refresh_mode_control()
    }

    // Fresh point set on every activation
    fn install_heatmap(&mut self) -> Result<(), MapError> {
        let points = self.state.heatmap_points();
        self.heatmap
            .mount(HeatmapOverlay::new(points, self.heatmap_options.clone()), &mut self.viewport)?;
        self.state.set_heatmap_active(true);
        Ok(())
    }

    fn apply_geocode(&mut self, outcome: GeocodeOutcome) -> Result<(), MapError> {
        match outcome {
            GeocodeOutcome::Found(result) => {
                log::info!("🔍 [SEARCH] '{}' found at ({}, {})", result.label, result.center.lat, result.center.lng);
                self.viewport.fit_bounds(result.bounds)?;
                self.search_marker
                    .mount(SearchResultMarker::new(result.center, result.label), &mut self.viewport)?;
                self.state.set_search_message(None);
            }
            GeocodeOutcome::NoMatch { query } => {
                log::info!("🔍 [SEARCH] No result for '{}'", query);
                self.state.set_search_message(Some(self.geocoder_config.error_message.clone()));
            }
        }
        Ok(())
    }

    fn show_weather(&mut self, report: WeatherReport) -> Result<(), MapError> {
        log::info!(
            "🌤️ [WEATHER] {} {}°C, {}% humidity, {} km/h",
            report.condition.label(),
            report.temperature_c,
            report.humidity_pct,
            report.wind_kph
        );
        self.state.set_weather(Some(report.clone()));
        self.weather_card.mount(WeatherCard::new(report), &mut self.viewport)?;
        Ok(())
    }

    /// Detach every overlay and destroy the map. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let results = [
            self.search_marker.unmount(&mut self.viewport),
            self.weather_card.unmount(&mut self.viewport),
            self.heatmap.unmount(&mut self.viewport),
            self.mode_control.unmount(&mut self.viewport),
            self.zoom.unmount(&mut self.viewport),
            self.geocoder.unmount(&mut self.viewport),
        ];
        for result in results {
            if let Err(e) = result {
                log::warn!("⚠️ [MAP] Overlay detach failed during teardown: {}", e);
            }
        }
        self.viewport.destroy();
        log::info!("🧹 [MAP] Map torn down");
    }
}

/// Applies a weather result if the view model still exists. Returns whether
/// the report was applied. Async fetches hold only a `Weak`, so a result
/// arriving after teardown is dropped here.
pub fn deliver_weather<V: ViewportControl>(target: &Weak<RefCell<MapViewModel<V>>>, report: WeatherReport) -> bool {
    let Some(view_model) = target.upgrade() else {
        log::debug!("🔇 [WEATHER] View gone, discarding report");
        return false;
    };
    let Ok(mut view_model) = view_model.try_borrow_mut() else {
        log::warn!("⚠️ [WEATHER] View model busy, discarding report");
        return false;
    };
    if view_model.is_torn_down() {
        return false;
    }
    match view_model.handle(MapEvent::WeatherLoaded(report)) {
        Ok(()) => true,
        Err(e) => {
            log::error!("❌ [WEATHER] Could not show weather card: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use crate::maps::headless::HeadlessViewport;
    use crate::maps::{ControlKind, OverlayLayer};
    use crate::models::{GeocodeResult, LatLng, LatLngBounds, TileStyle, WeatherCondition};
    use crate::overlays::heatmap::{CATALOG_WEIGHT, USER_MARKER_WEIGHT};
    use crate::state::{DetailPanel, IncrementalUpdate, UpdateType};
    use crate::test_support::sample_catalog;
    use crate::viewmodels::marker_viewmodel::MarkerKind;

    fn mounted() -> MapViewModel<HeadlessViewport> {
        let config = AppConfig::default();
        let state = AppState::new(sample_catalog(), &config);
        let viewport = HeadlessViewport::new(config.map_config.center(), config.map_config.default_zoom);
        let mut vm = MapViewModel::new(state, viewport, &config);
        vm.mount().unwrap();
        vm
    }

    fn click(vm: &mut MapViewModel<HeadlessViewport>, lat: f64, lng: f64) {
        vm.handle(MapEvent::ViewportClicked(LatLng::new(lat, lng))).unwrap();
    }

    fn heat_points(vm: &MapViewModel<HeadlessViewport>) -> Vec<(LatLng, f64)> {
        match vm.viewport().heatmap_layers().as_slice() {
            [OverlayLayer::Heatmap { points, .. }] => points.iter().map(|p| (p.position, p.weight)).collect(),
            other => panic!("expected exactly one heat layer, got {}", other.len()),
        }
    }

    fn sample_report() -> WeatherReport {
        WeatherReport::new(WeatherCondition::Sunny, 21.0, 40.0, 12.0)
    }

    #[test]
    fn test_mount_installs_tiles_markers_and_controls() {
        let vm = mounted();
        let vp = vm.viewport();
        assert_eq!(vp.tile_source, Some(TileStyle::Streets.tile_source()));
        assert_eq!(vp.markers.len(), vm.state().catalog.len());
        assert_eq!(vp.circles.len(), 1);
        // geocoder, zoom, mode buttons
        assert_eq!(vp.controls.len(), 3);
        assert!(vp.layers.is_empty());
    }

    #[test]
    fn test_clicks_in_add_mode_create_numbered_markers() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        for i in 0..5 {
            click(&mut vm, 40.0 + i as f64, 2.0);
        }

        let markers = vm.state().markers.borrow();
        assert_eq!(markers.len(), 5);
        for (i, m) in markers.iter().enumerate() {
            assert_eq!(m.title, format!("My Marker #{}", i + 1));
        }
        let drawn_users = vm
            .viewport()
            .markers
            .iter()
            .filter(|v| matches!(v.kind, MarkerKind::User(_)))
            .count();
        assert_eq!(drawn_users, 5);
        assert!(vm.state().is_add_marker_mode());
    }

    #[test]
    fn test_click_after_mode_off_creates_nothing() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        click(&mut vm, 1.0, 1.0);
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        click(&mut vm, 2.0, 2.0);
        assert_eq!(vm.state().markers.borrow().len(), 1);
    }

    #[test]
    fn test_mode_control_tracks_flags() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        let buttons: Vec<_> = vm
            .viewport()
            .controls
            .values()
            .filter_map(|c| match c.kind {
                ControlKind::ModeButtons { add_marker_active, heatmap_active } => Some((add_marker_active, heatmap_active)),
                _ => None,
            })
            .collect();
        assert_eq!(buttons, vec![(true, true)]);
    }

    #[test]
    fn test_drag_and_edit_only_touch_target() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        click(&mut vm, 1.0, 1.0);
        click(&mut vm, 2.0, 2.0);
        let ids: Vec<_> = vm.state().markers.borrow().iter().map(|m| m.id).collect();

        vm.handle(MapEvent::UserMarkerDragged { id: ids[0], position: LatLng::new(7.0, 7.0) }).unwrap();
        vm.handle(MapEvent::UserMarkerTitleEdited { id: ids[1], title: "Home".into() }).unwrap();
        vm.handle(MapEvent::UserMarkerNoteEdited { id: ids[1], note: "door code 42".into() }).unwrap();

        let markers = vm.state().markers.borrow();
        let a = markers.get(ids[0]).unwrap();
        let b = markers.get(ids[1]).unwrap();
        assert_eq!(a.position, LatLng::new(7.0, 7.0));
        assert_eq!(a.title, "My Marker #1");
        assert_eq!(b.position, LatLng::new(2.0, 2.0));
        assert_eq!((b.id, b.title.as_str(), b.note.as_str()), (ids[1], "Home", "door code 42"));
    }

    #[test]
    fn test_remove_redraws_without_marker() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        click(&mut vm, 1.0, 1.0);
        click(&mut vm, 2.0, 2.0);
        let first = vm.state().markers.borrow().iter().next().map(|m| m.id).unwrap();

        vm.handle(MapEvent::UserMarkerRemoved(first)).unwrap();
        assert_eq!(vm.state().markers.borrow().len(), 1);
        assert!(!vm.viewport().markers.iter().any(|v| v.kind == MarkerKind::User(first)));
    }

    #[test]
    fn test_selecting_another_point_never_passes_through_closed() {
        let mut vm = mounted();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            let panel = vm.state().detail_panel.clone();
            vm.state().subscribe_to_changes(move |u| {
                if u == UpdateType::Incremental(IncrementalUpdate::DetailPanel) {
                    seen.borrow_mut().push(*panel.borrow());
                }
            });
        }

        vm.handle(MapEvent::CatalogMarkerActivated(0)).unwrap();
        vm.handle(MapEvent::CatalogMarkerActivated(1)).unwrap();
        assert_eq!(*vm.state().detail_panel.borrow(), DetailPanel::Open(1));
        assert_eq!(*seen.borrow(), vec![DetailPanel::Open(0), DetailPanel::Open(1)]);

        vm.handle(MapEvent::DetailPanelClosed).unwrap();
        assert_eq!(*vm.state().detail_panel.borrow(), DetailPanel::Closed);
    }

    #[test]
    fn test_heatmap_recomputes_on_each_activation() {
        let mut vm = mounted();
        let catalog_len = vm.state().catalog.len();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        click(&mut vm, 10.0, 10.0);
        click(&mut vm, 11.0, 11.0);

        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        let points = heat_points(&vm);
        assert_eq!(points.len(), catalog_len + 2);
        assert_eq!(points.iter().filter(|(_, w)| *w == CATALOG_WEIGHT).count(), catalog_len);
        assert!(points.contains(&(LatLng::new(10.0, 10.0), USER_MARKER_WEIGHT)));
        assert!(points.contains(&(LatLng::new(11.0, 11.0), USER_MARKER_WEIGHT)));

        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        assert!(vm.viewport().heatmap_layers().is_empty());
        assert!(!vm.state().is_heatmap_active());

        click(&mut vm, 12.0, 12.0);
        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        let points = heat_points(&vm);
        assert_eq!(points.len(), catalog_len + 3);
        assert!(points.contains(&(LatLng::new(12.0, 12.0), USER_MARKER_WEIGHT)));
    }

    #[test]
    fn test_heatmap_sees_dragged_positions() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleAddMarkerMode).unwrap();
        click(&mut vm, 10.0, 10.0);
        let id = vm.state().markers.borrow().iter().next().map(|m| m.id).unwrap();
        vm.handle(MapEvent::UserMarkerDragged { id, position: LatLng::new(30.0, 30.0) }).unwrap();

        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        let points = heat_points(&vm);
        assert!(points.contains(&(LatLng::new(30.0, 30.0), USER_MARKER_WEIGHT)));
        assert!(!points.iter().any(|(p, _)| *p == LatLng::new(10.0, 10.0)));
    }

    #[test]
    fn test_tile_styles_only_swap_tile_source() {
        let mut vm = mounted();
        vm.handle(MapEvent::ViewportMoved { center: LatLng::new(45.0, 7.0), zoom: 9 }).unwrap();
        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        let overlays_before = vm.viewport().overlay_count();

        for style in TileStyle::ALL {
            vm.handle(MapEvent::TileStyleSelected(style.as_str().to_string())).unwrap();
            let snapshot = vm.state().viewport_snapshot();
            assert_eq!(snapshot.center, LatLng::new(45.0, 7.0));
            assert_eq!(snapshot.zoom, 9);
            assert_eq!(snapshot.tile_style, style);
            assert_eq!(vm.viewport().tile_source, Some(style.tile_source()));
            assert_eq!(vm.viewport().overlay_count(), overlays_before);
        }

        vm.handle(MapEvent::TileStyleSelected("blueprint".into())).unwrap();
        assert_eq!(vm.viewport().tile_source, Some(TileStyle::Streets.tile_source()));
    }

    #[test]
    fn test_geocode_no_match_leaves_viewport_alone() {
        let mut vm = mounted();
        let before = vm.state().viewport_snapshot();
        vm.handle(MapEvent::GeocodeFinished(GeocodeOutcome::NoMatch { query: "atlantis".into() })).unwrap();

        assert_eq!(vm.state().viewport_snapshot(), before);
        assert!(vm.viewport().fitted.is_empty());
        assert_eq!(vm.viewport().center, before.center);
        assert_eq!(vm.state().search_message.borrow().as_deref(), Some("Nothing found."));
    }

    #[test]
    fn test_geocode_result_fits_bounds_and_replaces_marker() {
        let mut vm = mounted();
        let found = |label: &str, lat: f64| {
            GeocodeOutcome::Found(GeocodeResult {
                center: LatLng::new(lat, 2.0),
                bounds: LatLngBounds::new(LatLng::new(lat - 0.5, 1.5), LatLng::new(lat + 0.5, 2.5)),
                label: label.to_string(),
            })
        };

        vm.handle(MapEvent::GeocodeFinished(GeocodeOutcome::NoMatch { query: "x".into() })).unwrap();
        vm.handle(MapEvent::GeocodeFinished(found("Lyon", 45.0))).unwrap();
        vm.handle(MapEvent::GeocodeFinished(found("Dijon", 47.0))).unwrap();

        assert_eq!(vm.viewport().fitted.len(), 2);
        let labels: Vec<_> = vm
            .viewport()
            .layers
            .values()
            .filter_map(|l| match l {
                OverlayLayer::TransientMarker { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Dijon".to_string()]);
        assert!(vm.state().search_message.borrow().is_none());
    }

    #[test]
    fn test_weather_card_appears_once_loaded() {
        let mut vm = mounted();
        let controls_before = vm.viewport().controls.len();
        vm.handle(MapEvent::WeatherLoaded(sample_report())).unwrap();
        vm.handle(MapEvent::WeatherLoaded(sample_report())).unwrap();
        assert_eq!(vm.viewport().controls.len(), controls_before + 1);
        assert_eq!(*vm.state().weather.borrow(), Some(sample_report()));
    }

    #[test]
    fn test_teardown_detaches_everything() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        vm.handle(MapEvent::WeatherLoaded(sample_report())).unwrap();
        assert!(vm.viewport().overlay_count() > 0);

        vm.teardown();
        assert_eq!(vm.viewport().overlay_count(), 0);
        assert!(vm.viewport().destroyed);

        // late events are dropped, not errors
        vm.handle(MapEvent::WeatherLoaded(sample_report())).unwrap();
        vm.teardown();
        assert_eq!(vm.viewport().overlay_count(), 0);
    }

    #[test]
    fn test_remount_on_same_state_redraws_active_heatmap() {
        let mut vm = mounted();
        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        vm.teardown();

        let config = AppConfig::default();
        let viewport = HeadlessViewport::new(config.map_config.center(), config.map_config.default_zoom);
        let mut vm = MapViewModel::new(vm.state().clone(), viewport, &config);
        vm.mount().unwrap();

        assert!(vm.state().is_heatmap_active());
        assert_eq!(heat_points(&vm).len(), vm.state().catalog.len());
        let flags: Vec<_> = vm
            .viewport()
            .controls
            .values()
            .filter_map(|c| match c.kind {
                ControlKind::ModeButtons { heatmap_active, .. } => Some(heatmap_active),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![true]);

        // the button and the layer agree: one click turns both off
        vm.handle(MapEvent::ToggleHeatmap).unwrap();
        assert!(vm.viewport().heatmap_layers().is_empty());
        assert!(!vm.state().is_heatmap_active());
    }

    #[test]
    fn test_weather_after_drop_is_discarded() {
        let vm = Rc::new(RefCell::new(mounted()));
        let weak = Rc::downgrade(&vm);
        assert!(deliver_weather(&weak, sample_report()));

        vm.borrow_mut().teardown();
        assert!(!deliver_weather(&weak, sample_report()));

        drop(vm);
        assert!(!deliver_weather(&weak, sample_report()));
    }
}
