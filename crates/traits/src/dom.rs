//! Dom trait for abstracting the host document and window.
//!
//! This trait allows the page behaviors to run without being tied to a
//! browser. The wasm crate implements it over `web-sys`; `InMemoryDom`
//! implements it over an arena of elements for tests and headless use.

use pagewright_types::Rect;
use std::fmt::Debug;
use thiserror::Error;

/// Error type for document operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Invalid selector: '{0}'")]
    InvalidSelector(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Host operation '{operation}' failed: {message}")]
    Host { operation: String, message: String },
}

impl DomError {
    pub fn host(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DomError::Host {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// How a programmatic scroll should move the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// A host document plus the window it is displayed in.
///
/// Node handles are cheap to clone and compare by identity.
///
/// # Implementations
///
/// - `WebDom` (wasm crate): the live browser document
/// - `InMemoryDom`: an arena-backed document with simulated layout
pub trait Dom: Debug {
    type Node: Clone + PartialEq + Debug;

    /// Looks up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>, DomError>;

    /// All elements in document order matching `selector`.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Node>, DomError>;

    /// First descendant of `root` matching `selector`.
    fn query_selector_in(
        &self,
        root: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, DomError>;

    /// All descendants of `root` matching `selector`, in document order.
    fn query_selector_all_in(
        &self,
        root: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, DomError>;

    fn body(&self) -> Option<Self::Node>;

    fn next_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Upper-case tag name, as browsers report it for HTML elements.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn text_content(&self, node: &Self::Node) -> String;

    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    /// The element's identifier, `None` when absent or empty.
    fn id(&self, node: &Self::Node) -> Option<String>;

    fn set_id(&mut self, node: &Self::Node, id: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str)
    -> Result<(), DomError>;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    /// Toggles `class` and returns whether it is now present.
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> Result<bool, DomError>;

    /// Sets an inline style property. An empty value removes the declaration.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str)
    -> Result<(), DomError>;

    /// Document-relative top of the element's layout box.
    fn offset_top(&self, node: &Self::Node) -> f64;

    /// Rendered height of the element, including borders.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Full height of the element's content, including overflow.
    fn scroll_height(&self, node: &Self::Node) -> f64;

    /// Viewport-relative bounding box.
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Current vertical scroll position of the window.
    fn scroll_y(&self) -> f64;

    /// `(width, height)` of the layout viewport.
    fn viewport_size(&self) -> (f64, f64);

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> Result<(), DomError>;

    /// Pushes a history entry for `fragment` (`"#id"`) without navigating.
    fn push_fragment(&mut self, fragment: &str) -> Result<(), DomError>;

    /// Returns a human-readable name for this host (for logging/debugging).
    fn name(&self) -> &'static str;
}
