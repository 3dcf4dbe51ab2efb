use super::{ACTIVE_CLASS, Behavior, BehaviorKind, TableOfContents};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::event::{EventOutcome, Intersection, Observation, ObservationSource};
use log::{debug, trace};
use pagewright_traits::Dom;
use pagewright_types::{Length, RootMargin};

/// Highlights the TOC link of the heading currently inside the tracking band.
///
/// The band runs from just below the header down to the middle of the
/// viewport. In each notification batch every intersecting heading in turn
/// clears all links and marks its own, so the last one in batch order wins.
#[derive(Debug, Clone)]
pub struct ScrollSpy<N> {
    header: Option<N>,
    /// `(heading, link)` pairs in document order.
    targets: Vec<(N, N)>,
    scroll_gap: f64,
    bottom_margin_percent: f64,
    recompute_on_resize: bool,
    header_height: f64,
}

impl<N: Clone + PartialEq> ScrollSpy<N> {
    pub fn install<D: Dom<Node = N>>(
        dom: &D,
        toc: &TableOfContents<N>,
        config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        let header = toc.header().cloned();
        let header_height = header
            .as_ref()
            .map(|h| dom.offset_height(h))
            .unwrap_or(0.0);
        let targets = toc
            .links()
            .iter()
            .map(|l| (l.heading.clone(), l.link.clone()))
            .collect::<Vec<_>>();
        debug!(
            "Scroll spy tracking {} headings below a {}px header",
            targets.len(),
            header_height
        );
        Ok(Self {
            header,
            targets,
            scroll_gap: config.scroll_gap,
            bottom_margin_percent: config.spy_bottom_margin_percent,
            recompute_on_resize: config.recompute_spy_on_resize,
            header_height,
        })
    }

    pub fn root_margin(&self) -> RootMargin {
        RootMargin::vertical(
            Length::Px(-(self.header_height + self.scroll_gap)),
            Length::Percent(-self.bottom_margin_percent),
        )
    }

    fn current_observation(&self) -> Observation<N> {
        Observation {
            source: ObservationSource::ScrollSpy,
            root_margin: self.root_margin(),
            threshold: 0.0,
            targets: self.targets.iter().map(|(h, _)| h.clone()).collect(),
        }
    }

    /// The link currently marked active, if exactly one is.
    pub fn active_link<D: Dom<Node = N>>(&self, dom: &D) -> Option<N> {
        let mut active = self
            .targets
            .iter()
            .filter(|(_, link)| dom.has_class(link, ACTIVE_CLASS));
        match (active.next(), active.next()) {
            (Some((_, link)), None) => Some(link.clone()),
            _ => None,
        }
    }
}

impl<D: Dom> Behavior<D> for ScrollSpy<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::ScrollSpy
    }

    fn observation(&self, _dom: &D) -> Option<Observation<D::Node>> {
        Some(self.current_observation())
    }

    fn on_resize(&mut self, dom: &mut D) -> Result<EventOutcome<D::Node>, EnhanceError> {
        if !self.recompute_on_resize {
            return Ok(EventOutcome::none());
        }
        let height = self
            .header
            .as_ref()
            .map(|h| dom.offset_height(h))
            .unwrap_or(0.0);
        if height == self.header_height {
            return Ok(EventOutcome::none());
        }
        debug!(
            "Header height changed {} -> {}, re-registering scroll spy",
            self.header_height, height
        );
        self.header_height = height;
        Ok(EventOutcome {
            reobserve: vec![self.current_observation()],
            ..EventOutcome::default()
        })
    }

    fn on_intersections(
        &mut self,
        dom: &mut D,
        source: ObservationSource,
        entries: &[Intersection<D::Node>],
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        if source != ObservationSource::ScrollSpy {
            return Ok(EventOutcome::none());
        }
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some((_, link)) = self.targets.iter().find(|(h, _)| h == &entry.target) else {
                continue;
            };
            for (_, other) in &self.targets {
                dom.remove_class(other, ACTIVE_CLASS)?;
            }
            dom.add_class(link, ACTIVE_CLASS)?;
            trace!("Scroll spy activated {:?}", link);
        }
        Ok(EventOutcome::none())
    }
}
