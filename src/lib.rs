// ============================================================================
// INTERACTIVE WORLD MAP - FRONTEND MVVM (PURE RUST)
// ============================================================================
// - Views: functions that build DOM (no logic)
// - ViewModels: UI logic, routes events to state and overlays
// - Overlays: everything attached on top of the base tiles
// - Services: data sources only (catalog, weather)
// - State: state management with Rc<RefCell>
// - Models: shared data structures
// ============================================================================

pub mod config;
pub mod models;
pub mod state;
pub mod maps;
pub mod overlays;
pub mod services;
pub mod viewmodels;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;
#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(target_arch = "wasm32")]
pub use web_entry::*;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use std::cell::RefCell;
    use gloo_timers::callback::Timeout;
    use wasm_bindgen::prelude::*;
    use crate::app::App;
    use crate::config::CONFIG;
    use crate::state::app_state::UpdateType;
    use crate::state::MapEvent;

    // Global App instance
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() { log::Level::Debug } else { log::Level::Warn };
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("🚀 Interactive World Map - Pure Rust + MVVM");

        let mut app = App::new()?;
        app.render()?;

        APP.with(|app_cell| {
            *app_cell.borrow_mut() = Some(app);
        });
        Ok(())
    }

    /// Queue a UI event. Runs after the current call stack, so Leaflet
    /// callbacks fired from inside a view model call never re-enter it.
    pub fn dispatch(event: MapEvent) {
        Timeout::new(0, move || {
            APP.with(|app_cell| {
                match app_cell.try_borrow() {
                    Ok(app) => match app.as_ref() {
                        Some(app) => app.handle_event(event),
                        None => log::debug!("🔇 [DISPATCH] No app, dropping {:?}", event),
                    },
                    Err(_) => dispatch(event),
                }
            });
        }).forget();
    }

    pub fn rerender_app_with_type(update_type: UpdateType) {
        APP.with(|app_cell| {
            let needs_full_render = match app_cell.try_borrow() {
                Ok(app) => match app.as_ref() {
                    Some(app) => match update_type {
                        UpdateType::Incremental(inc_type) => match app.update_incremental(inc_type) {
                            Ok(()) => false,
                            Err(e) => {
                                log::warn!("⚠️ [UPDATE] Incremental update {:?} failed: {:?}", inc_type, e);
                                true
                            }
                        },
                        UpdateType::FullRender => true,
                    },
                    None => {
                        log::warn!("⚠️ [UPDATE] App is not initialized");
                        false
                    }
                },
                Err(_) => {
                    log::warn!("⚠️ [UPDATE] App busy, update {:?} skipped", update_type);
                    false
                }
            };

            if needs_full_render {
                if let Some(app) = app_cell.borrow_mut().as_mut() {
                    log::info!("🔄 [RERENDER] Full re-render");
                    if let Err(e) = app.render() {
                        log::error!("❌ Error re-rendering: {:?}", e);
                    }
                }
            }
        });
    }

    /// Tear the app down (callable from JavaScript)
    #[wasm_bindgen]
    pub fn unmount_app() {
        APP.with(|app_cell| {
            if let Some(mut app) = app_cell.borrow_mut().take() {
                app.destroy();
            }
        });
    }

    /// Current marker count (callable from JavaScript)
    #[wasm_bindgen]
    pub fn user_marker_count() -> usize {
        APP.with(|app_cell| {
            app_cell
                .try_borrow()
                .ok()
                .and_then(|app| app.as_ref().map(|app| app.state().markers.borrow().len()))
                .unwrap_or(0)
        })
    }
}
