//! The page context: handles to every collaborator element, resolved once.
//!
//! Behaviors receive this instead of querying the document themselves, which
//! keeps each installer a pure function of (context, config) and lets tests
//! build a context by hand.

use crate::behaviors::BehaviorKind;
use crate::config::Selectors;
use crate::error::EnhanceError;
use log::{debug, warn};
use pagewright_traits::Dom;

#[derive(Debug, Clone, PartialEq)]
pub struct PageContext<N> {
    pub body: Option<N>,
    pub header: Option<N>,
    pub content_wrapper: Option<N>,
    pub article: Option<N>,
    /// Headings inside the article, in document order.
    pub headings: Vec<N>,
    pub toc_list: Option<N>,
    pub toc_toggle: Option<N>,
    pub toc_toggle_icon: Option<N>,
    pub toc_sidebar: Option<N>,
    pub lightbox: Option<N>,
    pub lightbox_image: Option<N>,
    pub lightbox_close: Option<N>,
    pub gallery_images: Vec<N>,
    pub fade_in_sections: Vec<N>,
    pub glossary_headers: Vec<N>,
    pub back_to_top: Option<N>,
}

impl<N> Default for PageContext<N> {
    fn default() -> Self {
        Self {
            body: None,
            header: None,
            content_wrapper: None,
            article: None,
            headings: Vec::new(),
            toc_list: None,
            toc_toggle: None,
            toc_toggle_icon: None,
            toc_sidebar: None,
            lightbox: None,
            lightbox_image: None,
            lightbox_close: None,
            gallery_images: Vec::new(),
            fade_in_sections: Vec::new(),
            glossary_headers: Vec::new(),
            back_to_top: None,
        }
    }
}

impl<N: Clone> PageContext<N> {
    /// Looks up every collaborator. Missing elements are left empty; an
    /// invalid selector is logged and treated as matching nothing.
    pub fn resolve<D: Dom<Node = N>>(dom: &D, selectors: &Selectors) -> Self {
        let one = |selector: &str| match dom.query_selector(selector) {
            Ok(node) => node,
            Err(e) => {
                warn!("Ignoring selector '{}': {}", selector, e);
                None
            }
        };
        let all = |selector: &str| match dom.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!("Ignoring selector '{}': {}", selector, e);
                Vec::new()
            }
        };
        let one_in = |root: Option<&N>, selector: &str| {
            let root = root?;
            match dom.query_selector_in(root, selector) {
                Ok(node) => node,
                Err(e) => {
                    warn!("Ignoring selector '{}': {}", selector, e);
                    None
                }
            }
        };

        let article = one(&selectors.article);
        let headings = match &article {
            Some(article) => match dom.query_selector_all_in(article, &selectors.headings) {
                Ok(nodes) => nodes,
                Err(e) => {
                    warn!("Ignoring selector '{}': {}", selectors.headings, e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let toc_toggle = one(&selectors.toc_toggle);
        let lightbox = one(&selectors.lightbox);

        let ctx = PageContext {
            body: dom.body(),
            header: one(&selectors.header),
            content_wrapper: one(&selectors.content_wrapper),
            headings,
            toc_list: one(&selectors.toc_list),
            toc_toggle_icon: one_in(toc_toggle.as_ref(), &selectors.toc_toggle_icon),
            toc_toggle,
            toc_sidebar: one(&selectors.toc_sidebar),
            lightbox_image: one_in(lightbox.as_ref(), &selectors.lightbox_image),
            lightbox_close: one_in(lightbox.as_ref(), &selectors.lightbox_close),
            lightbox,
            gallery_images: all(&selectors.gallery_images),
            fade_in_sections: all(&selectors.fade_in),
            glossary_headers: all(&selectors.glossary_headers),
            back_to_top: one(&selectors.back_to_top),
            article,
        };
        debug!(
            "Resolved page context on {}: {} headings, {} gallery images, {} fade-in sections, {} glossary headers",
            dom.name(),
            ctx.headings.len(),
            ctx.gallery_images.len(),
            ctx.fade_in_sections.len(),
            ctx.glossary_headers.len()
        );
        ctx
    }
}

/// Borrows a resolved element or reports it missing for `behavior`.
pub fn require<'a, N>(
    slot: &'a Option<N>,
    behavior: BehaviorKind,
    element: &str,
) -> Result<&'a N, EnhanceError> {
    slot.as_ref()
        .ok_or_else(|| EnhanceError::missing(behavior.name(), element))
}
