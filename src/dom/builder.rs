// ============================================================================
// ELEMENT BUILDER - Chained element construction with owned listeners
// ============================================================================
// Handlers registered through the builder travel with the element inside a
// `View`. Dropping the `View` (or the listeners taken out of it) removes them.
// ============================================================================

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};
use crate::dom::{append_child, create_element, on_click, on_input_value, on_select_change, set_attribute, set_class_name, set_text_content};

/// A built element and the listeners that must live exactly as long as it.
pub struct View {
    element: Element,
    listeners: Vec<EventListener>,
}

impl View {
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Appends `child` and takes over its listeners.
    pub fn adopt(&mut self, child: View) -> Result<(), JsValue> {
        append_child(&self.element, &child.element)?;
        self.listeners.extend(child.listeners);
        Ok(())
    }

    pub fn into_parts(self) -> (Element, Vec<EventListener>) {
        (self.element, self.listeners)
    }
}

pub struct ElementBuilder {
    element: Element,
    listeners: Vec<EventListener>,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
            listeners: Vec::new(),
        })
    }

    /// Replaces every class
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    /// Adds `class` only when `on` is true
    pub fn class_if(self, class: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.class_list().add_1(class)?;
        }
        Ok(self)
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    /// Like `child`, keeping the child's listeners alive with this element.
    pub fn view(mut self, child: View) -> Result<Self, JsValue> {
        append_child(&self.element, &child.element)?;
        self.listeners.extend(child.listeners);
        Ok(self)
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners.push(on_click(&self.element, handler));
        self
    }

    pub fn on_input<F>(mut self, handler: F) -> Self
    where
        F: FnMut(String) + 'static,
    {
        self.listeners.push(on_input_value(&self.element, handler));
        self
    }

    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(String) + 'static,
    {
        self.listeners.push(on_select_change(&self.element, handler));
        self
    }

    /// Static element. Listeners need `finish`.
    pub fn build(self) -> Element {
        debug_assert!(self.listeners.is_empty(), "listeners dropped by build(); use finish()");
        self.element
    }

    pub fn finish(self) -> View {
        View {
            element: self.element,
            listeners: self.listeners,
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn counting_button(count: &Rc<Cell<u32>>) -> View {
        let count = count.clone();
        ElementBuilder::new("button")
            .unwrap()
            .on_click(move |_e| count.set(count.get() + 1))
            .finish()
    }

    fn click(element: &Element) {
        element.dyn_ref::<HtmlElement>().unwrap().click();
    }

    #[wasm_bindgen_test]
    fn test_dropping_view_removes_its_listener() {
        let count = Rc::new(Cell::new(0));
        let (button, listeners) = counting_button(&count).into_parts();

        click(&button);
        assert_eq!(count.get(), 1);

        drop(listeners);
        click(&button);
        assert_eq!(count.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_parent_keeps_child_listeners() {
        let count = Rc::new(Cell::new(0));
        let child = counting_button(&count);
        let button = child.element().clone();

        let mut parent = ElementBuilder::new("div").unwrap().finish();
        parent.adopt(child).unwrap();
        click(&button);
        assert_eq!(count.get(), 1);

        drop(parent);
        click(&button);
        assert_eq!(count.get(), 1);
    }
}
