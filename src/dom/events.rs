// ============================================================================
// EVENT HANDLING
// ============================================================================
// Every helper returns the `EventListener`; dropping it unregisters the
// handler and frees the closure. Whoever owns the element keeps the
// listeners (see `View`).
// ============================================================================

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub fn on_click<F>(element: &Element, handler: F) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new(element, "click", handler)
}

/// Calls `handler` with the current value of an `<input>` or `<textarea>` on
/// every input event.
pub fn on_input_value<F>(element: &Element, mut handler: F) -> EventListener
where
    F: FnMut(String) + 'static,
{
    EventListener::new(element, "input", move |e: &Event| {
        if let Some(value) = e.target().as_ref().and_then(field_value) {
            handler(value);
        }
    })
}

/// Calls `handler` with the selected value of a `<select>`.
pub fn on_select_change<F>(element: &Element, mut handler: F) -> EventListener
where
    F: FnMut(String) + 'static,
{
    EventListener::new(element, "change", move |e: &Event| {
        if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
            handler(select.value());
        }
    })
}

fn field_value(target: &EventTarget) -> Option<String> {
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}
