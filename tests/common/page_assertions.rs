use pagewright::{Dom, InMemoryDom, NodeId};

/// The generated TOC link for each list item, in list order.
pub fn toc_links(dom: &InMemoryDom, list: NodeId) -> Vec<NodeId> {
    dom.children(list)
        .into_iter()
        .filter_map(|item| dom.children(item).first().copied())
        .collect()
}

/// Indices of the TOC links currently marked active.
pub fn active_link_indices(dom: &InMemoryDom, list: NodeId) -> Vec<usize> {
    toc_links(dom, list)
        .iter()
        .enumerate()
        .filter(|(_, link)| dom.has_class(link, "active"))
        .map(|(i, _)| i)
        .collect()
}

/// Assert that an element carries a class
#[macro_export]
macro_rules! assert_has_class {
    ($dom:expr, $node:expr, $class:expr) => {
        assert!(
            pagewright::Dom::has_class(&$dom, &$node, $class),
            "Expected {:?} to have class '{}', classes were {:?}",
            $node,
            $class,
            $dom.classes($node)
        );
    };
}

/// Assert that an element does NOT carry a class
#[macro_export]
macro_rules! assert_lacks_class {
    ($dom:expr, $node:expr, $class:expr) => {
        assert!(
            !pagewright::Dom::has_class(&$dom, &$node, $class),
            "Expected {:?} NOT to have class '{}', classes were {:?}",
            $node,
            $class,
            $dom.classes($node)
        );
    };
}

/// Assert an inline style declaration (`None` for absent)
#[macro_export]
macro_rules! assert_style {
    ($dom:expr, $node:expr, $property:expr, $expected:expr) => {
        assert_eq!(
            $dom.style($node, $property).as_deref(),
            $expected,
            "Unexpected '{}' on {:?}",
            $property,
            $node
        );
    };
}
