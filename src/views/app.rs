// ============================================================================
// APP VIEW - Page skeleton around the map
// ============================================================================
// The Leaflet map is created afterwards inside `#leaflet-map`; the detail
// panel slot is filled by `update_detail_panel`.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, View};
use crate::state::app_state::AppState;
use crate::views::render_controls_bar;

pub const MAP_CONTAINER_ID: &str = "map-container";
pub const LEAFLET_MAP_ID: &str = "leaflet-map";
pub const DETAIL_PANEL_SLOT_ID: &str = "detail-panel-slot";

pub fn render_app(state: &AppState) -> Result<View, JsValue> {
    let header = ElementBuilder::new("header")?
        .class("app-header")
        .child(
            ElementBuilder::new("h1")?
                .text("My Interactive World Map")
                .build(),
        )?
        .build();

    let map_container = ElementBuilder::new("div")?
        .id(MAP_CONTAINER_ID)?
        .class("map-container")
        .view(render_controls_bar(state)?)?
        .child(
            ElementBuilder::new("div")?
                .id(LEAFLET_MAP_ID)?
                .class("leaflet-container")
                .build(),
        )?
        .child(render_hint_tooltip()?)?
        .finish();

    let page = ElementBuilder::new("div")?
        .class("map-page")
        .child(ElementBuilder::new("div")?.id(DETAIL_PANEL_SLOT_ID)?.build())?
        .view(map_container)?
        .finish();

    Ok(ElementBuilder::new("div")?
        .class("app-container")
        .child(header)?
        .view(
            ElementBuilder::new("main")?
                .class("app-main")
                .view(page)?
                .finish(),
        )?
        .finish())
}

fn render_hint_tooltip() -> Result<Element, JsValue> {
    let content = ElementBuilder::new("div")?
        .class("tooltip-content")
        .child(ElementBuilder::new("h3")?.text("Interactive Map").build())?
        .child(ElementBuilder::new("p")?.text("Click on markers to explore the world!").build())?
        .build();
    Ok(ElementBuilder::new("div")?
        .class("map-tooltip")
        .child(content)?
        .build())
}
