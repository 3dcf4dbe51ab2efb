//! An in-memory document.
//!
//! Elements live in an arena and are addressed by `NodeId`. Layout is not
//! computed; callers assign document-relative boxes with `set_layout`, and
//! the window's scroll position and viewport are plain fields. Programmatic
//! scrolls and history pushes are recorded so they can be asserted on.

use crate::dom::{Dom, DomError, ScrollBehavior};
use crate::selector::{Compound, SelectorList};
use pagewright_types::Rect;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A recorded call to `Dom::scroll_to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    top: f64,
    height: f64,
    scroll_height: Option<f64>,
    left: f64,
    width: Option<f64>,
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: Layout,
}

#[derive(Debug, Clone)]
pub struct InMemoryDom {
    nodes: Vec<Element>,
    root: NodeId,
    body: NodeId,
    scroll_y: f64,
    viewport: (f64, f64),
    history: Vec<String>,
    scrolls: Vec<ScrollRequest>,
}

impl Default for InMemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDom {
    /// Creates a document holding `<html><body></body></html>` and a
    /// 1280x800 viewport scrolled to the top.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            scroll_y: 0.0,
            viewport: (1280.0, 800.0),
            history: Vec::new(),
            scrolls: Vec::new(),
        };
        dom.root = dom.alloc("html");
        dom.body = dom.alloc("body");
        dom.nodes[dom.body.0].parent = Some(dom.root);
        dom.nodes[dom.root.0].children.push(dom.body);
        dom
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.get_mut(parent)?;
        if let Some(old) = self.get_mut(child)?.parent.take() {
            self.get_mut(old)?.children.retain(|c| *c != child);
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        self.nodes
            .get_mut(node.0)
            .ok_or_else(|| DomError::UnknownNode(format!("{:?}", node)))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Appends a new element described by a compound selector such as
    /// `"div#toc-sidebar.sidebar"` under `parent`.
    pub fn append(&mut self, parent: NodeId, spec: &str) -> Result<NodeId, DomError> {
        self.get_mut(parent)?;
        let compound = Compound::parse(spec)?;
        let node = self.alloc(compound.tag.as_deref().unwrap_or("div"));
        let el = self.get_mut(node)?;
        if let Some(id) = compound.id {
            el.attributes.insert("id".to_string(), id);
        }
        el.classes = compound.classes;
        self.link(parent, node)?;
        Ok(node)
    }

    /// Like `append`, also setting the element's own text.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        spec: &str,
        text: &str,
    ) -> Result<NodeId, DomError> {
        let node = self.append(parent, spec)?;
        self.get_mut(node)?.text = text.to_string();
        Ok(node)
    }

    /// Places the element's box at a document-relative `top` with `height`.
    pub fn set_layout(&mut self, node: NodeId, top: f64, height: f64) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.layout.top = top;
            el.layout.height = height;
        }
    }

    /// Sets the horizontal extent; by default elements span the viewport.
    pub fn set_horizontal(&mut self, node: NodeId, left: f64, width: f64) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.layout.left = left;
            el.layout.width = Some(width);
        }
    }

    /// Overrides the content height reported by `scroll_height`.
    pub fn set_scroll_height(&mut self, node: NodeId, height: f64) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.layout.scroll_height = Some(height);
        }
    }

    /// Simulates the user scrolling the window.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|el| el.parent)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.get(node)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.get(node).and_then(|el| el.style.get(property).cloned())
    }

    /// Fragments pushed via `push_fragment`, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The current address fragment, if any history entry was pushed.
    pub fn location_hash(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Programmatic scrolls, oldest first.
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        if let Some(el) = self.get(root) {
            for child in &el.children {
                out.push(*child);
                self.descendants(*child, out);
            }
        }
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let Some(el) = self.get(node) else {
            return false;
        };
        if let Some(tag) = &compound.tag {
            if &el.tag != tag {
                return false;
            }
        }
        if let Some(id) = &compound.id {
            if el.attributes.get("id") != Some(id) {
                return false;
            }
        }
        compound
            .classes
            .iter()
            .all(|class| el.classes.iter().any(|c| c == class))
    }

    fn matches_chain(&self, node: NodeId, chain: &[Compound]) -> bool {
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        if !self.matches_compound(node, last) {
            return false;
        }
        let mut remaining = ancestors;
        let mut current = self.parent(node);
        while let Some((wanted, rest)) = remaining.split_last() {
            let Some(candidate) = current else {
                return false;
            };
            if self.matches_compound(candidate, wanted) {
                remaining = rest;
            }
            current = self.parent(candidate);
        }
        true
    }

    fn select(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let list = SelectorList::parse(selector)?;
        let mut candidates = Vec::new();
        self.descendants(root, &mut candidates);
        Ok(candidates
            .into_iter()
            .filter(|node| list.0.iter().any(|chain| self.matches_chain(*node, chain)))
            .collect())
    }
}

impl Dom for InMemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut all = Vec::new();
        self.descendants(self.root, &mut all);
        all.into_iter().find(|node| {
            self.get(*node)
                .and_then(|el| el.attributes.get("id"))
                .is_some_and(|v| v == id)
        })
    }

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.select(self.root, selector)?.into_iter().next())
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.select(self.root, selector)
    }

    fn query_selector_in(&self, root: &NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.select(*root, selector)?.into_iter().next())
    }

    fn query_selector_all_in(&self, root: &NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.select(*root, selector)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn next_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.parent(*node)?;
        let siblings = &self.get(parent)?.children;
        let pos = siblings.iter().position(|c| c == node)?;
        siblings.get(pos + 1).copied()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.get(*node)
            .map(|el| el.tag.to_ascii_uppercase())
            .unwrap_or_default()
    }

    fn text_content(&self, node: &NodeId) -> String {
        let Some(el) = self.get(*node) else {
            return String::new();
        };
        let mut text = el.text.clone();
        for child in &el.children {
            text.push_str(&self.text_content(child));
        }
        text
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        let children = match self.nodes.get_mut(node.0) {
            Some(el) => {
                el.text = text.to_string();
                std::mem::take(&mut el.children)
            }
            None => return,
        };
        for child in children {
            if let Some(el) = self.nodes.get_mut(child.0) {
                el.parent = None;
            }
        }
    }

    fn id(&self, node: &NodeId) -> Option<String> {
        self.get(*node)
            .and_then(|el| el.attributes.get("id"))
            .filter(|id| !id.is_empty())
            .cloned()
    }

    fn set_id(&mut self, node: &NodeId, id: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.attributes.insert("id".to_string(), id.to_string());
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let el = self.get(*node)?;
        if name == "class" {
            return Some(el.classes.join(" "));
        }
        el.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let el = self.get_mut(*node)?;
        if name == "class" {
            el.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            el.attributes.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let compound = Compound::parse(tag)?;
        match compound.tag {
            Some(tag) if compound.id.is_none() && compound.classes.is_empty() => {
                Ok(self.alloc(&tag))
            }
            _ => Err(DomError::host("create_element", format!("invalid tag name '{}'", tag))),
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.get_mut(*parent)?;
        self.get_mut(*child)?;
        let mut ancestor = Some(*parent);
        while let Some(a) = ancestor {
            if a == *child {
                return Err(DomError::host(
                    "append_child",
                    "the new child is an ancestor of the parent",
                ));
            }
            ancestor = self.parent(a);
        }
        self.link(*parent, *child)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.get(*node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        let el = self.get_mut(*node)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.get_mut(*node)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn toggle_class(&mut self, node: &NodeId, class: &str) -> Result<bool, DomError> {
        if self.has_class(node, class) {
            self.remove_class(node, class)?;
            Ok(false)
        } else {
            self.add_class(node, class)?;
            Ok(true)
        }
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let el = self.get_mut(*node)?;
        if value.is_empty() {
            el.style.remove(property);
        } else {
            el.style.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.get(*node).map(|el| el.layout.top).unwrap_or(0.0)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.get(*node).map(|el| el.layout.height).unwrap_or(0.0)
    }

    fn scroll_height(&self, node: &NodeId) -> f64 {
        self.get(*node)
            .map(|el| el.layout.scroll_height.unwrap_or(el.layout.height))
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let Some(el) = self.get(*node) else {
            return Rect::default();
        };
        Rect::new(
            el.layout.left,
            el.layout.top - self.scroll_y,
            el.layout.width.unwrap_or(self.viewport.0),
            el.layout.height,
        )
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_size(&self) -> (f64, f64) {
        self.viewport
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> Result<(), DomError> {
        self.scrolls.push(ScrollRequest { top, behavior });
        self.scroll_y = top.max(0.0);
        Ok(())
    }

    fn push_fragment(&mut self, fragment: &str) -> Result<(), DomError> {
        if !fragment.starts_with('#') {
            return Err(DomError::host(
                "push_fragment",
                format!("'{}' is not a fragment", fragment),
            ));
        }
        self.history.push(fragment.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryDom"
    }
}
