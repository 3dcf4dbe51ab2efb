//! The orchestrator: installs every enabled behavior against a document and
//! routes page events to them.
//!
//! Installation is guarded per behavior. A behavior whose markup is missing
//! is logged and recorded in `failures()`; the others install normally.
//! Handlers never propagate errors out of `dispatch` either, so one broken
//! behavior cannot stop the rest from reacting.

use crate::behaviors::{
    BackToTop, Behavior, BehaviorKind, FadeIn, Glossary, Lightbox, ScrollSpy, StickyHeader,
    TableOfContents, TocToggle,
};
use crate::config::EnhancerConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::event::{EventOutcome, IntersectionTracker, Observation, PageEvent};
use log::{debug, error, info, warn};
use pagewright_traits::Dom;
use pagewright_types::TocEntry;
use std::fmt;

pub struct Enhancer<D: Dom> {
    config: EnhancerConfig,
    behaviors: Vec<Box<dyn Behavior<D>>>,
    failures: Vec<(BehaviorKind, EnhanceError)>,
    toc_entries: Vec<TocEntry>,
    polled: IntersectionTracker<D::Node>,
}

impl<D> Enhancer<D>
where
    D: Dom + 'static,
    D::Node: 'static,
{
    /// Validates `config`, resolves the page context and installs every
    /// enabled behavior.
    ///
    /// Only an invalid configuration fails; missing markup is recorded per
    /// behavior instead.
    pub fn install(dom: &mut D, config: EnhancerConfig) -> Result<Self, EnhanceError> {
        config.validate()?;
        let ctx = PageContext::resolve(dom, &config.selectors);
        Ok(Self::install_with_context(dom, &ctx, config))
    }

    pub fn install_with_context(
        dom: &mut D,
        ctx: &PageContext<D::Node>,
        config: EnhancerConfig,
    ) -> Self {
        let mut enhancer = Self {
            config,
            behaviors: Vec::new(),
            failures: Vec::new(),
            toc_entries: Vec::new(),
            polled: IntersectionTracker::new(),
        };
        let config = enhancer.config.clone();

        if enhancer.wants(BehaviorKind::StickyHeader) {
            let result = StickyHeader::install(dom, ctx, &config);
            enhancer.admit(BehaviorKind::StickyHeader, result);
        }

        let mut toc = None;
        if enhancer.wants(BehaviorKind::TableOfContents) {
            match TableOfContents::install(dom, ctx, &config) {
                Ok(built) => {
                    enhancer.toc_entries = built.entries();
                    toc = Some(built.clone());
                    enhancer.admit(BehaviorKind::TableOfContents, Ok(built));
                }
                Err(e) => enhancer.admit::<TableOfContents<D::Node>>(
                    BehaviorKind::TableOfContents,
                    Err(e),
                ),
            }
        }

        if enhancer.wants(BehaviorKind::ScrollSpy) {
            let result = match &toc {
                Some(toc) => ScrollSpy::install(dom, toc, &config),
                None => Err(EnhanceError::missing(
                    BehaviorKind::ScrollSpy.name(),
                    "table of contents",
                )),
            };
            enhancer.admit(BehaviorKind::ScrollSpy, result);
        }

        if enhancer.wants(BehaviorKind::TocToggle) {
            let result = TocToggle::install(dom, ctx, &config);
            enhancer.admit(BehaviorKind::TocToggle, result);
        }
        if enhancer.wants(BehaviorKind::Lightbox) {
            let result = Lightbox::install(dom, ctx, &config);
            enhancer.admit(BehaviorKind::Lightbox, result);
        }
        if enhancer.wants(BehaviorKind::FadeIn) {
            let result = FadeIn::install(dom, ctx, &config);
            enhancer.admit(BehaviorKind::FadeIn, result);
        }
        if enhancer.wants(BehaviorKind::Glossary) {
            let result = Glossary::install(dom, ctx, &config);
            enhancer.admit(BehaviorKind::Glossary, result);
        }
        if enhancer.wants(BehaviorKind::BackToTop) {
            let result = BackToTop::install(dom, ctx, &config);
            enhancer.admit(BehaviorKind::BackToTop, result);
        }

        info!(
            "Page enhancer installed {} of {} behaviors on {}",
            enhancer.behaviors.len(),
            BehaviorKind::ALL.len(),
            dom.name()
        );
        enhancer
    }

    fn wants(&self, kind: BehaviorKind) -> bool {
        let enabled = self.config.is_enabled(kind);
        if !enabled {
            debug!("Behavior '{}' disabled by configuration", kind.name());
        }
        enabled
    }

    fn admit<B>(&mut self, kind: BehaviorKind, result: Result<B, EnhanceError>)
    where
        B: Behavior<D> + 'static,
    {
        match result {
            Ok(behavior) => {
                debug!("Installed '{}'", kind.name());
                self.behaviors.push(Box::new(behavior));
            }
            Err(e) => {
                if e.is_missing_element() {
                    warn!("Skipping '{}': {}", kind.name(), e);
                } else {
                    error!("Failed to install '{}': {}", kind.name(), e);
                }
                self.failures.push((kind, e));
            }
        }
    }

    /// Routes `event` to every installed behavior and merges what they ask of
    /// the host. Handler errors are logged and do not reach the caller.
    pub fn dispatch(&mut self, dom: &mut D, event: &PageEvent<D::Node>) -> EventOutcome<D::Node> {
        let mut outcome = EventOutcome::none();
        for behavior in &mut self.behaviors {
            let result = match event {
                PageEvent::Scroll => behavior.on_scroll(dom).map(|()| EventOutcome::none()),
                PageEvent::Resize => behavior.on_resize(dom),
                PageEvent::Click { current, target } => behavior.on_click(dom, current, target),
                PageEvent::Intersections { source, entries } => {
                    behavior.on_intersections(dom, *source, entries)
                }
            };
            match result {
                Ok(o) => outcome.merge(o),
                Err(e) => error!(
                    "'{}' failed handling {}: {}",
                    behavior.kind().name(),
                    event.name(),
                    e
                ),
            }
        }
        for observation in &outcome.reobserve {
            self.polled.reset(observation.source);
        }
        outcome
    }

    /// Evaluates every current observation against the document geometry
    /// and dispatches the targets whose state changed since the last poll.
    ///
    /// Hosts without a native visibility observer call this after each
    /// scroll. The first poll of an observation reports every target.
    pub fn poll_observations(&mut self, dom: &mut D) -> EventOutcome<D::Node> {
        let mut outcome = EventOutcome::none();
        for observation in self.observations(dom) {
            let entries = self.polled.changes(&observation, &*dom);
            if entries.is_empty() {
                continue;
            }
            let event = PageEvent::Intersections {
                source: observation.source,
                entries,
            };
            outcome.merge(self.dispatch(dom, &event));
        }
        outcome
    }

    /// Every element that needs a click listener, without duplicates, in
    /// installation order.
    pub fn click_targets(&self) -> Vec<D::Node> {
        let mut targets: Vec<D::Node> = Vec::new();
        for node in self.behaviors.iter().flat_map(|b| b.click_targets()) {
            if !targets.contains(&node) {
                targets.push(node);
            }
        }
        targets
    }

    pub fn observations(&self, dom: &D) -> Vec<Observation<D::Node>> {
        self.behaviors
            .iter()
            .filter_map(|b| b.observation(dom))
            .collect()
    }
}

impl<D: Dom> Enhancer<D> {
    pub fn installed(&self) -> Vec<BehaviorKind> {
        self.behaviors.iter().map(|b| b.kind()).collect()
    }

    pub fn is_installed(&self, kind: BehaviorKind) -> bool {
        self.behaviors.iter().any(|b| b.kind() == kind)
    }

    /// Behaviors that could not be installed, with the reason.
    pub fn failures(&self) -> &[(BehaviorKind, EnhanceError)] {
        &self.failures
    }

    /// The table of contents as built at install; empty if it was not.
    pub fn toc_entries(&self) -> &[TocEntry] {
        &self.toc_entries
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }
}

impl<D: Dom> fmt::Debug for Enhancer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enhancer")
            .field("installed", &self.installed())
            .field("failures", &self.failures)
            .field("toc_entries", &self.toc_entries.len())
            .finish()
    }
}
