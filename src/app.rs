// ============================================================================
// APP - Owns the page, the map view model and the weather source
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::dom::incremental::{update_controls_bar, update_detail_panel};
use crate::maps::web::LeafletViewport;
use crate::maps::ViewportControl;
use crate::services::{load_catalog, WeatherSource};
use crate::state::app_state::{AppState, IncrementalUpdate};
use crate::state::MapEvent;
use crate::viewmodels::{deliver_weather, MapViewModel};
use crate::views::app::LEAFLET_MAP_ID;
use crate::views::render_app;

type SharedViewModel = Rc<RefCell<MapViewModel<LeafletViewport>>>;

pub struct App {
    state: AppState,
    root: Option<Element>,
    view_model: Option<SharedViewModel>,
    weather: Rc<RefCell<WeatherSource>>,
    weather_refresh: Option<Interval>,
    /// Controls bar; replaced on every full render
    page_listeners: Vec<EventListener>,
    /// Detail panel buttons; replaced whenever the panel is rebuilt
    panel_listeners: RefCell<Vec<EventListener>>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let catalog = load_catalog().map_err(|e| JsValue::from_str(&e))?;
        let state = AppState::new(catalog, &CONFIG);

        // Batch DOM updates after the current event
        state.subscribe_to_changes(move |update_type| {
            Timeout::new(0, move || {
                crate::rerender_app_with_type(update_type);
            }).forget();
        });

        Ok(Self {
            state,
            root: Some(root),
            view_model: None,
            weather: Rc::new(RefCell::new(WeatherSource::from_config(&CONFIG.weather_config))),
            weather_refresh: None,
            page_listeners: Vec::new(),
            panel_listeners: RefCell::new(Vec::new()),
        })
    }

    /// Build the page and the map. Tears down any previous map first.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(root) = self.root.clone() else {
            return Err(JsValue::from_str("App already destroyed"));
        };
        self.teardown_map();

        set_inner_html(&root, "");
        let (page, listeners) = render_app(&self.state)?.into_parts();
        append_child(&root, &page)?;
        self.page_listeners = listeners;
        *self.panel_listeners.borrow_mut() = update_detail_panel(&self.state)?;

        let container = get_element_by_id(LEAFLET_MAP_ID)
            .ok_or_else(|| JsValue::from_str("No map container"))?
            .dyn_into::<HtmlElement>()?;
        let snapshot = self.state.viewport_snapshot();
        let viewport = LeafletViewport::new(&container, snapshot.center, snapshot.zoom)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut view_model = MapViewModel::new(self.state.clone(), viewport, &CONFIG);
        view_model.mount().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let view_model = Rc::new(RefCell::new(view_model));

        request_weather(&self.weather, &Rc::downgrade(&view_model));
        if let Some(secs) = CONFIG.weather_config.refresh_interval_secs {
            let weather = self.weather.clone();
            let target = Rc::downgrade(&view_model);
            self.weather_refresh = Some(Interval::new(secs.saturating_mul(1000), move || {
                request_weather(&weather, &target);
            }));
            log::info!("⏱️ [WEATHER] Refreshing every {}s", secs);
        }

        self.view_model = Some(view_model);
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn handle_event(&self, event: MapEvent) {
        let Some(view_model) = &self.view_model else {
            log::warn!("⚠️ [APP] Event before map exists: {:?}", event);
            return;
        };
        let Ok(mut view_model) = view_model.try_borrow_mut() else {
            // Re-queue behind whatever holds the view model
            crate::dispatch(event);
            return;
        };
        if let Err(e) = view_model.handle(event) {
            log::error!("❌ [MAP] {}", e);
        }
    }

    /// DOM outside the map only
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::DetailPanel => {
                *self.panel_listeners.borrow_mut() = update_detail_panel(&self.state)?;
                // The map container changed width
                if let Some(view_model) = &self.view_model {
                    if let Ok(mut view_model) = view_model.try_borrow_mut() {
                        view_model.viewport_mut().refresh_size();
                    }
                }
            }
            IncrementalUpdate::ControlsBar => {
                update_controls_bar(&self.state)?;
            }
        }
        Ok(())
    }

    fn teardown_map(&mut self) {
        // Dropping the interval cancels it
        self.weather_refresh = None;
        if let Some(view_model) = self.view_model.take() {
            match view_model.try_borrow_mut() {
                Ok(mut view_model) => view_model.teardown(),
                Err(_) => log::error!("❌ [APP] View model busy during teardown"),
            }
        }
    }

    /// Remove everything. Pending weather results are discarded.
    pub fn destroy(&mut self) {
        self.teardown_map();
        self.page_listeners.clear();
        self.panel_listeners.borrow_mut().clear();
        if let Some(root) = self.root.take() {
            set_inner_html(&root, "");
        }
        log::info!("👋 [APP] Unmounted");
    }
}

/// Fire-and-forget fetch; only a weak handle travels with the future.
fn request_weather(weather: &Rc<RefCell<WeatherSource>>, target: &Weak<RefCell<MapViewModel<LeafletViewport>>>) {
    let Some(view_model) = target.upgrade() else {
        return;
    };
    let at = match view_model.try_borrow() {
        Ok(view_model) => view_model.viewport().center(),
        Err(_) => CONFIG.map_config.center(),
    };
    drop(view_model);

    let request = weather.borrow_mut().fetch(at);
    let target = target.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match request.await {
            Ok(report) => {
                deliver_weather(&target, report);
            }
            Err(e) => log::warn!("⚠️ [WEATHER] Fetch failed: {}", e),
        }
    });
}
