// ============================================================================
// MAP CONTROLS VIEW - Add-marker button, style selector, search message
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::HtmlSelectElement;
use wasm_bindgen::JsCast;
use crate::dom::{append_child, ElementBuilder, View};
use crate::models::TileStyle;
use crate::state::app_state::AppState;
use crate::state::MapEvent;

pub const CONTROLS_BAR_ID: &str = "controls-bar";
pub const ADD_MARKER_BUTTON_ID: &str = "add-marker-btn";
pub const STYLE_SELECT_ID: &str = "style-select";
pub const SEARCH_MESSAGE_ID: &str = "search-message";

pub fn add_marker_label(active: bool) -> &'static str {
    if active { "Cancel" } else { "Add Markers" }
}

pub fn render_controls_bar(state: &AppState) -> Result<View, JsValue> {
    let add_marker_mode = state.is_add_marker_mode();
    let current_style = state.viewport_snapshot().tile_style;

    let mut bar = ElementBuilder::new("div")?
        .id(CONTROLS_BAR_ID)?
        .class("map-controls")
        .finish();

    // Add-marker mode
    let button = ElementBuilder::new("button")?
        .id(ADD_MARKER_BUTTON_ID)?
        .class("mode-btn")
        .class_if("active", add_marker_mode)?
        .text(add_marker_label(add_marker_mode))
        .on_click(|_e| crate::dispatch(MapEvent::ToggleAddMarkerMode))
        .finish();
    bar.adopt(
        ElementBuilder::new("div")?
            .class("mode-selector")
            .view(button)?
            .finish(),
    )?;

    // Tile style
    let mut select = ElementBuilder::new("select")?
        .id(STYLE_SELECT_ID)?
        .on_change(|value| crate::dispatch(MapEvent::TileStyleSelected(value)));
    for style in TileStyle::ALL {
        select = select.child(
            ElementBuilder::new("option")?
                .attr("value", style.as_str())?
                .text(style.label())
                .build(),
        )?;
    }
    let select = select.finish();
    if let Some(select) = select.element().dyn_ref::<HtmlSelectElement>() {
        select.set_value(current_style.as_str());
    }
    bar.adopt(
        ElementBuilder::new("div")?
            .class("style-selector")
            .child(ElementBuilder::new("label")?.text("Map Style:").build())?
            .view(select)?
            .finish(),
    )?;

    let message = state.search_message.borrow().clone();
    let message_el = ElementBuilder::new("span")?
        .id(SEARCH_MESSAGE_ID)?
        .class("search-message")
        .text(message.as_deref().unwrap_or(""))
        .build();
    if message.is_none() {
        message_el.set_attribute("hidden", "")?;
    }
    append_child(bar.element(), &message_el)?;

    Ok(bar)
}
