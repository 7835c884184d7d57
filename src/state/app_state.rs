// ============================================================================
// APP STATE - Session-wide application state
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::config::AppConfig;
use crate::models::{LatLng, MarkerId, PointOfInterest, TileStyle, WeatherReport};
use crate::overlays::heatmap::{weighted_points, WeightedPoint};
use crate::state::{DetailPanel, UserMarkerStore, ViewportState};

/// DOM update kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Incremental update (only the affected elements)
    Incremental(IncrementalUpdate),
    /// Full re-render (startup only; it rebuilds the map container)
    FullRender,
}

/// Parts of the page living outside the map viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Info panel + `with-panel` class on the map container
    DetailPanel,
    /// Add-marker button, style select, search message
    ControlsBar,
}

type Subscriber = Rc<dyn Fn(UpdateType)>;

/// Global application state. Clones share the same cells.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Rc<Vec<PointOfInterest>>,
    pub viewport: Rc<RefCell<ViewportState>>,
    pub markers: Rc<RefCell<UserMarkerStore>>,
    pub detail_panel: Rc<RefCell<DetailPanel>>,

    // UI State
    pub add_marker_mode: Rc<RefCell<bool>>,
    pub heatmap_active: Rc<RefCell<bool>>,
    pub search_message: Rc<RefCell<Option<String>>>,
    pub weather: Rc<RefCell<Option<WeatherReport>>>,

    // Reactivity: callbacks notified with the kind of update needed
    pub change_subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl AppState {
    pub fn new(catalog: Vec<PointOfInterest>, config: &AppConfig) -> Self {
        let viewport = ViewportState::new(
            config.map_config.center(),
            config.map_config.default_zoom,
            config.map_config.tile_style(),
        );

        Self {
            catalog: Rc::new(catalog),
            viewport: Rc::new(RefCell::new(viewport)),
            markers: Rc::new(RefCell::new(UserMarkerStore::new())),
            detail_panel: Rc::new(RefCell::new(DetailPanel::Closed)),

            add_marker_mode: Rc::new(RefCell::new(false)),
            heatmap_active: Rc::new(RefCell::new(false)),
            search_message: Rc::new(RefCell::new(None)),
            weather: Rc::new(RefCell::new(None)),

            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Subscribe to state changes that need a DOM update
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(UpdateType) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify_subscribers_with_type(&self, update_type: UpdateType) {
        // Snapshot so a subscriber may subscribe again without a double borrow
        let subscribers: Vec<Subscriber> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback(update_type);
        }
    }

    fn notify(&self, update: IncrementalUpdate) {
        self.notify_subscribers_with_type(UpdateType::Incremental(update));
    }

    // ------------------------------------------------------------------
    // Add-marker mode
    // ------------------------------------------------------------------

    pub fn is_add_marker_mode(&self) -> bool {
        *self.add_marker_mode.borrow()
    }

    /// Returns the new mode
    pub fn toggle_add_marker_mode(&self) -> bool {
        let active = {
            let mut mode = self.add_marker_mode.borrow_mut();
            *mode = !*mode;
            *mode
        };
        log::info!("📍 [MODE] Add-marker mode {}", if active { "ON" } else { "OFF" });
        self.notify(IncrementalUpdate::ControlsBar);
        active
    }

    /// Viewport click. Creates a marker only while add-marker mode is active;
    /// the mode stays on afterwards.
    pub fn handle_viewport_click(&self, at: LatLng) -> Option<MarkerId> {
        if !self.is_add_marker_mode() {
            return None;
        }
        if !at.is_valid() {
            log::warn!("⚠️ [MARKERS] Ignoring click at invalid coordinate {:?}", at);
            return None;
        }
        let id = self.markers.borrow_mut().add(at);
        log::info!("📍 [MARKERS] Marker {} added at ({}, {})", id, at.lat, at.lng);
        Some(id)
    }

    // ------------------------------------------------------------------
    // User marker edits
    // ------------------------------------------------------------------

    pub fn move_marker(&self, id: MarkerId, position: LatLng) -> bool {
        if !position.is_valid() {
            return false;
        }
        self.markers.borrow_mut().move_to(id, position)
    }

    pub fn edit_marker_title(&self, id: MarkerId, title: &str) -> bool {
        self.markers.borrow_mut().set_title(id, title)
    }

    pub fn edit_marker_note(&self, id: MarkerId, note: &str) -> bool {
        self.markers.borrow_mut().set_note(id, note)
    }

    pub fn remove_marker(&self, id: MarkerId) -> bool {
        let removed = self.markers.borrow_mut().remove(id).is_some();
        if removed {
            log::info!("🗑️ [MARKERS] Marker {} removed", id);
        }
        removed
    }

    // ------------------------------------------------------------------
    // Detail panel
    // ------------------------------------------------------------------

    /// Returns false when `index` is not in the catalog.
    pub fn open_detail(&self, index: usize) -> bool {
        if index >= self.catalog.len() {
            log::warn!("⚠️ [DETAIL] No catalog point at index {}", index);
            return false;
        }
        self.detail_panel.borrow_mut().open(index);
        self.notify(IncrementalUpdate::DetailPanel);
        true
    }

    pub fn close_detail(&self) {
        self.detail_panel.borrow_mut().close();
        self.notify(IncrementalUpdate::DetailPanel);
    }

    pub fn selected_point(&self) -> Option<PointOfInterest> {
        self.detail_panel.borrow().selected(&self.catalog).cloned()
    }

    // ------------------------------------------------------------------
    // Heatmap
    // ------------------------------------------------------------------

    pub fn is_heatmap_active(&self) -> bool {
        *self.heatmap_active.borrow()
    }

    pub fn set_heatmap_active(&self, active: bool) {
        *self.heatmap_active.borrow_mut() = active;
    }

    /// Computed fresh on every call from the current markers.
    pub fn heatmap_points(&self) -> Vec<WeightedPoint> {
        weighted_points(&self.catalog, self.markers.borrow().as_slice())
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn select_tile_style(&self, raw: &str) -> TileStyle {
        let style = TileStyle::parse_or_default(raw);
        if self.viewport.borrow_mut().set_tile_style(style) {
            log::info!("🗺️ [TILES] Tile style -> {}", style.as_str());
        }
        self.notify(IncrementalUpdate::ControlsBar);
        style
    }

    pub fn viewport_moved(&self, center: LatLng, zoom: u8) {
        self.viewport.borrow_mut().moved(center, zoom);
    }

    pub fn viewport_snapshot(&self) -> ViewportState {
        *self.viewport.borrow()
    }

    // ------------------------------------------------------------------
    // Search / weather
    // ------------------------------------------------------------------

    pub fn set_search_message(&self, message: Option<String>) {
        let changed = *self.search_message.borrow() != message;
        *self.search_message.borrow_mut() = message;
        if changed {
            self.notify(IncrementalUpdate::ControlsBar);
        }
    }

    pub fn set_weather(&self, report: Option<WeatherReport>) {
        *self.weather.borrow_mut() = report;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    fn recorded(state: &AppState) -> Rc<RefCell<Vec<UpdateType>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        state.subscribe_to_changes(move |u| sink.borrow_mut().push(u));
        log
    }

    #[test]
    fn test_clicks_only_create_markers_in_add_mode() {
        let state = AppState::new(sample_catalog(), &AppConfig::default());
        assert!(state.handle_viewport_click(LatLng::new(1.0, 1.0)).is_none());

        state.toggle_add_marker_mode();
        for i in 0..3 {
            assert!(state.handle_viewport_click(LatLng::new(i as f64, 2.0)).is_some());
        }
        assert!(state.is_add_marker_mode());
        assert_eq!(state.markers.borrow().len(), 3);

        state.toggle_add_marker_mode();
        assert!(state.handle_viewport_click(LatLng::new(5.0, 5.0)).is_none());
        assert_eq!(state.markers.borrow().len(), 3);
    }

    #[test]
    fn test_detail_panel_notifications() {
        let state = AppState::new(sample_catalog(), &AppConfig::default());
        let log = recorded(&state);

        assert!(state.open_detail(1));
        assert!(!state.open_detail(7));
        state.close_detail();

        assert_eq!(
            *log.borrow(),
            vec![
                UpdateType::Incremental(IncrementalUpdate::DetailPanel),
                UpdateType::Incremental(IncrementalUpdate::DetailPanel),
            ]
        );
        assert!(state.selected_point().is_none());
    }

    #[test]
    fn test_tile_style_keeps_center_and_zoom() {
        let state = AppState::new(sample_catalog(), &AppConfig::default());
        state.viewport_moved(LatLng::new(40.0, 3.0), 8);
        let before = state.viewport_snapshot();

        assert_eq!(state.select_tile_style("dark"), TileStyle::Dark);
        let after = state.viewport_snapshot();
        assert_eq!(after.center, before.center);
        assert_eq!(after.zoom, before.zoom);
        assert_eq!(after.tile_style, TileStyle::Dark);
    }

    #[test]
    fn test_search_message_notifies_only_on_change() {
        let state = AppState::new(sample_catalog(), &AppConfig::default());
        let log = recorded(&state);
        state.set_search_message(Some("Nothing found.".into()));
        state.set_search_message(Some("Nothing found.".into()));
        state.set_search_message(None);
        assert_eq!(log.borrow().len(), 2);
    }
}
