// ============================================================================
// MODE CONTROL VIEW - 📍 / 🔥 buttons inside the map
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Event;
use crate::dom::{ElementBuilder, View};
use crate::state::MapEvent;

pub fn render_mode_control(add_marker_active: bool, heatmap_active: bool) -> Result<View, JsValue> {
    let marker_title = if add_marker_active { "Cancel adding markers" } else { "Add your own markers" };

    Ok(ElementBuilder::new("div")?
        .class("leaflet-bar leaflet-control map-mode-control")
        .view(mode_button("📍", marker_title, add_marker_active, MapEvent::ToggleAddMarkerMode)?)?
        .view(mode_button("🔥", "Toggle heatmap", heatmap_active, MapEvent::ToggleHeatmap)?)?
        .finish())
}

fn mode_button(icon: &str, title: &str, active: bool, event: MapEvent) -> Result<View, JsValue> {
    Ok(ElementBuilder::new("a")?
        .class_if("active", active)?
        .attr("href", "#")?
        .attr("title", title)?
        .child(ElementBuilder::new("span")?.text(icon).build())?
        .on_click(move |e: &Event| {
            e.prevent_default();
            e.stop_propagation();
            crate::dispatch(event.clone());
        })
        .finish())
}
