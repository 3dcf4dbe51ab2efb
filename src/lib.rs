//! # pagewright
//!
//! Navigation and reading enhancements for long-form article pages.
//!
//! The behaviors live in `pagewright-core` and run against any [`Dom`]
//! implementation: the browser through `pagewright-wasm`, or
//! [`InMemoryDom`] for headless use and tests.
//!
//! ```
//! use pagewright::{Dom, InMemoryDom, PageEvent};
//!
//! let mut dom = InMemoryDom::new();
//! let body = dom.body().unwrap();
//! let list = dom.append(body, "ul#toc-list").unwrap();
//! let main = dom.append(body, "main").unwrap();
//! let article = dom.append(main, "article").unwrap();
//! dom.append_text(article, "h2", "Getting Started").unwrap();
//!
//! let mut enhancer = pagewright::enhance(&mut dom).unwrap();
//! assert_eq!(enhancer.toc_entries()[0].target_id.as_str(), "getting-started");
//!
//! let link = dom.children(dom.children(list)[0])[0];
//! let outcome = enhancer.dispatch(&mut dom, &PageEvent::click(&link));
//! assert!(outcome.prevent_default);
//! ```

// Re-export foundation crates
pub use pagewright_core as core;
pub use pagewright_traits as traits;
pub use pagewright_types as types;

pub use pagewright_core::{
    Behavior, BehaviorKind, EnhanceError, Enhancer, EnhancerConfig, EventOutcome, Intersection,
    Observation, ObservationSource, PageContext, PageEvent, Selectors, SlugRegistry, slugify,
};
pub use pagewright_traits::{Dom, DomError, InMemoryDom, NodeId, ScrollBehavior};
pub use pagewright_types::{AnchorId, HeadingLevel, RootMargin, TocEntry};

use log::debug;

/// Installs every behavior with the default configuration.
pub fn enhance<D>(dom: &mut D) -> Result<Enhancer<D>, EnhanceError>
where
    D: Dom + 'static,
    D::Node: 'static,
{
    let enhancer = Enhancer::install(dom, EnhancerConfig::default())?;
    for (kind, reason) in enhancer.failures() {
        debug!("'{}' not installed: {}", kind.name(), reason);
    }
    Ok(enhancer)
}
