//! `Dom` implementation over the live browser document.

use crate::error::{PagewrightError, js_message};
use pagewright_traits::{Dom, DomError, ScrollBehavior};
use pagewright_types::Rect;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollToOptions, Window};

/// The browser window and its document.
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self, PagewrightError> {
        let window =
            web_sys::window().ok_or_else(|| PagewrightError::host("no global `window` object"))?;
        let document = window
            .document()
            .ok_or_else(|| PagewrightError::host("window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn host_error(operation: &'static str) -> impl Fn(JsValue) -> DomError {
    move |e| DomError::host(operation, js_message(&e))
}

fn collect(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn html(node: &Element) -> Result<&HtmlElement, DomError> {
    node.dyn_ref::<HtmlElement>().ok_or_else(|| {
        DomError::UnknownNode(format!("<{}> is not an HTML element", node.tag_name()))
    })
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, DomError> {
        self.document
            .query_selector(selector)
            .map_err(|_| DomError::InvalidSelector(selector.to_string()))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        self.document
            .query_selector_all(selector)
            .map(collect)
            .map_err(|_| DomError::InvalidSelector(selector.to_string()))
    }

    fn query_selector_in(&self, root: &Element, selector: &str) -> Result<Option<Element>, DomError> {
        root.query_selector(selector)
            .map_err(|_| DomError::InvalidSelector(selector.to_string()))
    }

    fn query_selector_all_in(&self, root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
        root.query_selector_all(selector)
            .map(collect)
            .map_err(|_| DomError::InvalidSelector(selector.to_string()))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn next_element_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name()
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        (!id.is_empty()).then_some(id)
    }

    fn set_id(&mut self, node: &Element, id: &str) {
        node.set_id(id);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value).map_err(host_error("setAttribute"))
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(host_error("createElement"))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(host_error("appendChild"))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list().add_1(class).map_err(host_error("classList.add"))
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list()
            .remove_1(class)
            .map_err(host_error("classList.remove"))
    }

    fn toggle_class(&mut self, node: &Element, class: &str) -> Result<bool, DomError> {
        node.class_list()
            .toggle(class)
            .map_err(host_error("classList.toggle"))
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        let style = html(node)?.style();
        if value.is_empty() {
            style
                .remove_property(property)
                .map(|_| ())
                .map_err(host_error("style.removeProperty"))
        } else {
            style
                .set_property(property, value)
                .map_err(host_error("style.setProperty"))
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        match node.dyn_ref::<HtmlElement>() {
            Some(el) => f64::from(el.offset_top()),
            None => node.get_bounding_client_rect().top() + self.scroll_y(),
        }
    }

    fn offset_height(&self, node: &Element) -> f64 {
        match node.dyn_ref::<HtmlElement>() {
            Some(el) => f64::from(el.offset_height()),
            None => node.get_bounding_client_rect().height(),
        }
    }

    fn scroll_height(&self, node: &Element) -> f64 {
        f64::from(node.scroll_height())
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_size(&self) -> (f64, f64) {
        let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> Result<(), DomError> {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn push_fragment(&mut self, fragment: &str) -> Result<(), DomError> {
        self.window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(fragment)))
            .map_err(host_error("history.pushState"))
    }

    fn name(&self) -> &'static str {
        "WebDom"
    }
}
