// ============================================================================
// POPUPS VIEW - Marker popup contents
// ============================================================================

use wasm_bindgen::prelude::*;
use crate::dom::{ElementBuilder, View};
use crate::models::MarkerId;
use crate::state::MapEvent;

/// Name, description and "More Info" for a catalog point.
pub fn render_catalog_popup(index: usize, name: &str, description: &str) -> Result<View, JsValue> {
    let more_info = ElementBuilder::new("button")?
        .class("popup-btn")
        .text("More Info")
        .on_click(move |_e| crate::dispatch(MapEvent::CatalogMarkerActivated(index)))
        .finish();

    Ok(ElementBuilder::new("div")?
        .class("custom-popup")
        .child(ElementBuilder::new("h3")?.text(name).build())?
        .child(ElementBuilder::new("p")?.text(description).build())?
        .view(more_info)?
        .finish())
}

/// Editable title and note; every keystroke is committed.
pub fn render_user_marker_popup(id: MarkerId, title: &str, note: &str) -> Result<View, JsValue> {
    let title_input = ElementBuilder::new("input")?
        .attr("type", "text")?
        .attr("value", title)?
        .attr("placeholder", "Location name")?
        .on_input(move |title| crate::dispatch(MapEvent::UserMarkerTitleEdited { id, title }))
        .finish();

    let note_area = ElementBuilder::new("textarea")?
        .attr("placeholder", "Add notes about this location")?
        .text(note)
        .on_input(move |note| crate::dispatch(MapEvent::UserMarkerNoteEdited { id, note }))
        .finish();

    let remove_btn = ElementBuilder::new("button")?
        .class("remove-marker-btn")
        .text("Remove")
        .on_click(move |_e| crate::dispatch(MapEvent::UserMarkerRemoved(id)))
        .finish();

    Ok(ElementBuilder::new("div")?
        .class("user-marker-popup")
        .view(title_input)?
        .view(note_area)?
        .view(remove_btn)?
        .finish())
}
