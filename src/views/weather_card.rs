// ============================================================================
// WEATHER CARD VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::WeatherReport;

pub fn render_weather_card(report: &WeatherReport) -> Result<Element, JsValue> {
    let condition = format!("{} {}", report.condition.icon(), report.condition.label());
    let details = ElementBuilder::new("div")?
        .class("weather-details")
        .child(ElementBuilder::new("span")?.text(&format!("💧 {}%", report.humidity_pct)).build())?
        .child(ElementBuilder::new("span")?.text(&format!("💨 {} km/h", report.wind_kph)).build())?
        .build();

    let card = ElementBuilder::new("div")?
        .class("weather-card")
        .child(ElementBuilder::new("h3")?.text("Current Weather").build())?
        .child(ElementBuilder::new("div")?.class("weather-condition").text(&condition).build())?
        .child(ElementBuilder::new("div")?.class("weather-temp").text(&format!("{}°C", report.temperature_c)).build())?
        .child(details)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("weather-info-container")
        .child(card)?
        .build())
}
