// ============================================================================
// VIEWS - Functions that build DOM (no logic)
// ============================================================================

pub mod app;
pub mod map_controls;
pub mod detail_panel;
pub mod popups;
pub mod weather_card;
pub mod mode_control;

pub use app::render_app;
pub use map_controls::render_controls_bar;
pub use detail_panel::render_detail_panel;
pub use popups::{render_catalog_popup, render_user_marker_popup};
pub use weather_card::render_weather_card;
pub use mode_control::render_mode_control;
