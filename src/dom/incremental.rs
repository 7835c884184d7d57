// ============================================================================
// INCREMENTAL DOM UPDATES
// ============================================================================
// Only touches the elements that changed. The map container itself is never
// rebuilt after startup.
// ============================================================================

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use crate::dom::{append_child, get_element_by_id, set_inner_html, set_text_content, toggle_class};
use crate::state::app_state::AppState;
use crate::views::app::{DETAIL_PANEL_SLOT_ID, MAP_CONTAINER_ID};
use crate::views::map_controls::{add_marker_label, ADD_MARKER_BUTTON_ID, SEARCH_MESSAGE_ID, STYLE_SELECT_ID};
use crate::views::render_detail_panel;

/// Rebuild the panel contents and sync the `with-panel` class. Returns the
/// listeners of the new panel; the caller replaces the previous ones with them.
pub fn update_detail_panel(state: &AppState) -> Result<Vec<EventListener>, JsValue> {
    let slot = get_element_by_id(DETAIL_PANEL_SLOT_ID)
        .ok_or_else(|| JsValue::from_str("Detail panel slot not found, needs full render"))?;
    set_inner_html(&slot, "");

    let selected = state.selected_point();
    let mut listeners = Vec::new();
    if let Some(point) = &selected {
        let (panel, panel_listeners) = render_detail_panel(point)?.into_parts();
        append_child(&slot, &panel)?;
        listeners = panel_listeners;
        log::debug!("ℹ️ [DETAIL] Showing '{}'", point.name);
    }

    if let Some(container) = get_element_by_id(MAP_CONTAINER_ID) {
        toggle_class(&container, "with-panel", selected.is_some())?;
    }
    Ok(listeners)
}

pub fn update_controls_bar(state: &AppState) -> Result<(), JsValue> {
    let add_marker_mode = state.is_add_marker_mode();
    if let Some(button) = get_element_by_id(ADD_MARKER_BUTTON_ID) {
        toggle_class(&button, "active", add_marker_mode)?;
        set_text_content(&button, add_marker_label(add_marker_mode));
    }

    if let Some(select) = get_element_by_id(STYLE_SELECT_ID).and_then(|e| e.dyn_into::<HtmlSelectElement>().ok()) {
        let style = state.viewport_snapshot().tile_style;
        if select.value() != style.as_str() {
            select.set_value(style.as_str());
        }
    }

    if let Some(message_el) = get_element_by_id(SEARCH_MESSAGE_ID) {
        match state.search_message.borrow().as_deref() {
            Some(message) => {
                set_text_content(&message_el, message);
                message_el.remove_attribute("hidden")?;
            }
            None => {
                set_text_content(&message_el, "");
                message_el.set_attribute("hidden", "")?;
            }
        }
    }
    Ok(())
}
