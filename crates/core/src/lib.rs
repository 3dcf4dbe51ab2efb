//! # pagewright-core
//!
//! Platform-agnostic page behaviors for long-form article pages.
//!
//! This crate provides:
//! - **slug**: fragment-safe identifiers derived from heading text
//! - **behaviors**: table of contents, scroll spy and the peer behaviors
//!   (sticky header, TOC toggle, lightbox, fade-in, glossary, back to top)
//! - **enhancer**: installs the behaviors and routes page events to them
//! - **event**: the events a host feeds in and the outcomes it applies
//! - **config** / **error**: configuration and error types
//!
//! ## Design Principle
//!
//! Nothing here touches a browser. Every document and window operation goes
//! through the `Dom` trait, so the same behaviors run against `web_sys` in
//! the wasm crate and against `InMemoryDom` in tests.

// Re-export foundation crates
pub use pagewright_traits as traits;
pub use pagewright_types as types;

pub mod behaviors;
pub mod config;
pub mod context;
pub mod enhancer;
pub mod error;
pub mod event;
pub mod slug;

#[cfg(test)]
mod test_support;

pub use behaviors::{
    ACTIVE_CLASS, BackToTop, Behavior, BehaviorKind, FadeIn, Glossary, Lightbox, ScrollSpy,
    StickyHeader, TableOfContents, TocLink, TocToggle,
};
pub use config::{BehaviorToggles, EnhancerConfig, Selectors};
pub use context::PageContext;
pub use enhancer::Enhancer;
pub use error::EnhanceError;
pub use event::{
    EventOutcome, Intersection, IntersectionTracker, Observation, ObservationSource, PageEvent,
};
pub use slug::{SlugRegistry, slugify};

// Re-export commonly used types from foundation crates
pub use traits::{Dom, DomError, InMemoryDom, NodeId, ScrollBehavior};
pub use types::{AnchorId, Band, HeadingLevel, Length, Rect, RootMargin, TocEntry};
