//! Page behaviors.
//!
//! Each behavior is installed from the resolved `PageContext` and then only
//! reacts to the events routed to it by the `Enhancer`. Installers fail with
//! `EnhanceError::MissingElement` when the page lacks their markup; that
//! failure never affects the other behaviors.

mod back_to_top;
mod fade_in;
mod glossary;
mod lightbox;
mod scroll_spy;
mod sticky_header;
mod toc;
mod toc_toggle;

pub use back_to_top::BackToTop;
pub use fade_in::FadeIn;
pub use glossary::Glossary;
pub use lightbox::Lightbox;
pub use scroll_spy::ScrollSpy;
pub use sticky_header::StickyHeader;
pub use toc::{TableOfContents, TocLink};
pub use toc_toggle::TocToggle;

use crate::error::EnhanceError;
use crate::event::{EventOutcome, Intersection, Observation, ObservationSource};
use pagewright_traits::Dom;

/// Class toggled on open panels, the highlighted TOC link and the open lightbox.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    StickyHeader,
    TableOfContents,
    ScrollSpy,
    TocToggle,
    Lightbox,
    FadeIn,
    Glossary,
    BackToTop,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 8] = [
        BehaviorKind::StickyHeader,
        BehaviorKind::TableOfContents,
        BehaviorKind::ScrollSpy,
        BehaviorKind::TocToggle,
        BehaviorKind::Lightbox,
        BehaviorKind::FadeIn,
        BehaviorKind::Glossary,
        BehaviorKind::BackToTop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BehaviorKind::StickyHeader => "sticky-header",
            BehaviorKind::TableOfContents => "table-of-contents",
            BehaviorKind::ScrollSpy => "scroll-spy",
            BehaviorKind::TocToggle => "toc-toggle",
            BehaviorKind::Lightbox => "lightbox",
            BehaviorKind::FadeIn => "fade-in",
            BehaviorKind::Glossary => "glossary",
            BehaviorKind::BackToTop => "back-to-top",
        }
    }

    /// Parses the kebab-case name returned by [`BehaviorKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// An installed behavior, as seen by the `Enhancer`.
///
/// Every handler has a no-op default; a behavior overrides the ones for the
/// event sources it listens to.
pub trait Behavior<D: Dom> {
    fn kind(&self) -> BehaviorKind;

    /// Elements that need a click listener routed to this behavior.
    fn click_targets(&self) -> Vec<D::Node> {
        Vec::new()
    }

    /// The visibility observation this behavior wants, if any.
    fn observation(&self, _dom: &D) -> Option<Observation<D::Node>> {
        None
    }

    fn on_scroll(&mut self, _dom: &mut D) -> Result<(), EnhanceError> {
        Ok(())
    }

    fn on_resize(&mut self, _dom: &mut D) -> Result<EventOutcome<D::Node>, EnhanceError> {
        Ok(EventOutcome::none())
    }

    fn on_click(
        &mut self,
        _dom: &mut D,
        _current: &D::Node,
        _target: &D::Node,
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        Ok(EventOutcome::none())
    }

    fn on_intersections(
        &mut self,
        _dom: &mut D,
        _source: ObservationSource,
        _entries: &[Intersection<D::Node>],
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        Ok(EventOutcome::none())
    }
}
