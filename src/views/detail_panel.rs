// ============================================================================
// DETAIL PANEL VIEW - Information about the selected catalog point
// ============================================================================

use wasm_bindgen::prelude::*;
use crate::dom::{append_child, ElementBuilder, View};
use crate::models::PointOfInterest;
use crate::state::MapEvent;

pub fn render_detail_panel(point: &PointOfInterest) -> Result<View, JsValue> {
    let mut panel = ElementBuilder::new("div")?
        .class("city-info-panel")
        .view(
            ElementBuilder::new("button")?
                .class("close-btn")
                .text("×")
                .on_click(|_e| crate::dispatch(MapEvent::DetailPanelClosed))
                .finish(),
        )?
        .child(ElementBuilder::new("h2")?.text(&point.name).build())?
        .finish();

    if let Some(url) = &point.image_url {
        let image = ElementBuilder::new("img")?
            .class("city-image")
            .attr("src", url)?
            .attr("alt", &point.name)?
            .build();
        append_child(panel.element(), &image)?;
    }

    append_child(panel.element(), &ElementBuilder::new("p")?.text(&point.description).build())?;

    if !point.facts.is_empty() {
        let list = ElementBuilder::new("ul")?.build();
        for fact in &point.facts {
            append_child(&list, &ElementBuilder::new("li")?.text(fact).build())?;
        }
        let facts = ElementBuilder::new("div")?
            .class("city-facts")
            .child(ElementBuilder::new("h3")?.text("Quick Facts").build())?
            .child(list)?
            .build();
        append_child(panel.element(), &facts)?;
    }

    panel.adopt(
        ElementBuilder::new("button")?
            .class("explore-btn")
            .text("Explore Map")
            .on_click(|_e| crate::dispatch(MapEvent::DetailPanelClosed))
            .finish(),
    )?;

    Ok(panel)
}
