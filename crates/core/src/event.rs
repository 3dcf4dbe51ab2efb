//! Events fed into the enhancer and the effects it asks the host to apply.
//!
//! The host (a browser binding or a test) owns the real event sources. It
//! turns each one into a `PageEvent`, hands it to `Enhancer::dispatch`, and
//! applies the returned `EventOutcome`.

use pagewright_traits::Dom;
use pagewright_types::RootMargin;

/// A named visibility-observation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationSource {
    ScrollSpy,
    FadeIn,
}

impl ObservationSource {
    pub fn name(self) -> &'static str {
        match self {
            ObservationSource::ScrollSpy => "scroll-spy",
            ObservationSource::FadeIn => "fade-in",
        }
    }
}

/// One target's state in a visibility notification batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
}

impl<N> Intersection<N> {
    pub fn new(target: N, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
        }
    }
}

/// A request to watch a set of targets against a margin-adjusted viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<N> {
    pub source: ObservationSource,
    pub root_margin: RootMargin,
    pub threshold: f64,
    pub targets: Vec<N>,
}

impl<N: Clone + PartialEq> Observation<N> {
    /// Computes a notification batch from current geometry.
    ///
    /// Used where the host has no native visibility observer, and in tests.
    /// Every target is reported, in target order.
    pub fn evaluate<D: Dom<Node = N>>(&self, dom: &D) -> Vec<Intersection<N>> {
        let (width, height) = dom.viewport_size();
        let band = self.root_margin.band(width, height);
        self.targets
            .iter()
            .map(|target| {
                let rect = dom.bounding_rect(target);
                Intersection::new(target.clone(), band.intersects(&rect, self.threshold))
            })
            .collect()
    }
}

/// Remembers the last reported state of every polled target.
///
/// A native visibility observer reports all targets once when an
/// observation starts and afterwards only the targets whose state changed.
/// Polling through `changes` keeps that contract, so batch order means the
/// same thing with or without a native observer.
#[derive(Debug, Clone)]
pub struct IntersectionTracker<N> {
    tracked: Vec<TrackedObservation<N>>,
}

#[derive(Debug, Clone)]
struct TrackedObservation<N> {
    source: ObservationSource,
    root_margin: RootMargin,
    threshold: f64,
    states: Vec<(N, bool)>,
}

impl<N> Default for IntersectionTracker<N> {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq> IntersectionTracker<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates `observation` and returns the entries to deliver.
    ///
    /// The first poll of a source, or of one re-issued with a different
    /// margin or threshold, reports every target. Later polls report only
    /// targets whose state flipped, plus targets not seen before.
    pub fn changes<D: Dom<Node = N>>(
        &mut self,
        observation: &Observation<N>,
        dom: &D,
    ) -> Vec<Intersection<N>> {
        let entries = observation.evaluate(dom);
        let position = self.tracked.iter().position(|t| {
            t.source == observation.source
                && t.root_margin == observation.root_margin
                && t.threshold == observation.threshold
        });
        let Some(position) = position else {
            self.reset(observation.source);
            self.tracked.push(TrackedObservation {
                source: observation.source,
                root_margin: observation.root_margin,
                threshold: observation.threshold,
                states: entries
                    .iter()
                    .map(|e| (e.target.clone(), e.is_intersecting))
                    .collect(),
            });
            return entries;
        };

        let states = &mut self.tracked[position].states;
        let mut changed = Vec::new();
        for entry in entries {
            match states.iter_mut().find(|(target, _)| *target == entry.target) {
                Some((_, last)) if *last == entry.is_intersecting => {}
                Some((_, last)) => {
                    *last = entry.is_intersecting;
                    changed.push(entry);
                }
                None => {
                    states.push((entry.target.clone(), entry.is_intersecting));
                    changed.push(entry);
                }
            }
        }
        changed
    }

    /// Forgets everything known about `source`; its next poll reports every target.
    pub fn reset(&mut self, source: ObservationSource) {
        self.tracked.retain(|t| t.source != source);
    }
}

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    Scroll,
    Resize,
    /// A click delivered to the listener on `current`; `target` is the
    /// innermost element that was clicked.
    Click { current: N, target: N },
    Intersections {
        source: ObservationSource,
        entries: Vec<Intersection<N>>,
    },
}

impl<N> PageEvent<N> {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Scroll => "scroll",
            PageEvent::Resize => "resize",
            PageEvent::Click { .. } => "click",
            PageEvent::Intersections { .. } => "intersections",
        }
    }
}

impl<N: Clone> PageEvent<N> {
    /// A click directly on `node`.
    pub fn click(node: &N) -> Self {
        PageEvent::Click {
            current: node.clone(),
            target: node.clone(),
        }
    }
}

/// What the host should do after a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome<N> {
    /// Cancel the browser's default action for the event.
    pub prevent_default: bool,
    /// Stop observing these targets.
    pub unobserve: Vec<(ObservationSource, N)>,
    /// Replace the observation for a source with this one.
    pub reobserve: Vec<Observation<N>>,
}

impl<N> Default for EventOutcome<N> {
    fn default() -> Self {
        Self {
            prevent_default: false,
            unobserve: Vec::new(),
            reobserve: Vec::new(),
        }
    }
}

impl<N> EventOutcome<N> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }

    pub fn merge(&mut self, other: EventOutcome<N>) {
        self.prevent_default |= other.prevent_default;
        self.unobserve.extend(other.unobserve);
        self.reobserve.extend(other.reobserve);
    }

    pub fn is_empty(&self) -> bool {
        !self.prevent_default && self.unobserve.is_empty() && self.reobserve.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_traits::InMemoryDom;
    use pagewright_types::Length;

    #[test]
    fn test_tracker_reports_only_changes_after_first_poll() {
        let mut dom = InMemoryDom::new();
        let body = dom.body().unwrap();
        let upper = dom.append(body, "h2").unwrap();
        let lower = dom.append(body, "h2").unwrap();
        dom.set_layout(upper, 1000.0, 30.0);
        dom.set_layout(lower, 1200.0, 30.0);
        let observation = Observation {
            source: ObservationSource::ScrollSpy,
            root_margin: RootMargin::vertical(Length::Px(-70.0), Length::Percent(-50.0)),
            threshold: 0.0,
            targets: vec![upper, lower],
        };
        let mut tracker = IntersectionTracker::new();

        let first = tracker.changes(&observation, &dom);
        assert_eq!(
            first,
            vec![Intersection::new(upper, false), Intersection::new(lower, false)]
        );
        assert!(tracker.changes(&observation, &dom).is_empty());

        // band 970..1300: both enter
        dom.set_scroll_y(900.0);
        assert_eq!(tracker.changes(&observation, &dom).len(), 2);

        // band 1070..1400: only the upper heading leaves
        dom.set_scroll_y(1000.0);
        assert_eq!(
            tracker.changes(&observation, &dom),
            vec![Intersection::new(upper, false)]
        );
    }

    #[test]
    fn test_tracker_starts_over_when_margins_change() {
        let mut dom = InMemoryDom::new();
        let body = dom.body().unwrap();
        let heading = dom.append(body, "h2").unwrap();
        dom.set_layout(heading, 100.0, 30.0);
        let mut observation = Observation {
            source: ObservationSource::ScrollSpy,
            root_margin: RootMargin::vertical(Length::Px(-70.0), Length::Percent(-50.0)),
            threshold: 0.0,
            targets: vec![heading],
        };
        let mut tracker = IntersectionTracker::new();
        assert_eq!(tracker.changes(&observation, &dom).len(), 1);
        assert!(tracker.changes(&observation, &dom).is_empty());

        observation.root_margin = RootMargin::vertical(Length::Px(-160.0), Length::Percent(-50.0));
        assert_eq!(tracker.changes(&observation, &dom).len(), 1);

        tracker.reset(ObservationSource::ScrollSpy);
        assert_eq!(tracker.changes(&observation, &dom).len(), 1);
    }

    #[test]
    fn test_evaluate_reports_every_target() {
        let mut dom = InMemoryDom::new();
        let body = dom.body().unwrap();
        let near = dom.append(body, "h2").unwrap();
        let far = dom.append(body, "h2").unwrap();
        dom.set_layout(near, 100.0, 30.0);
        dom.set_layout(far, 2000.0, 30.0);

        let observation = Observation {
            source: ObservationSource::ScrollSpy,
            root_margin: RootMargin::vertical(Length::Px(-70.0), Length::Percent(-50.0)),
            threshold: 0.0,
            targets: vec![near, far],
        };
        let batch = observation.evaluate(&dom);
        assert_eq!(
            batch,
            vec![Intersection::new(near, true), Intersection::new(far, false)]
        );

        dom.set_scroll_y(1900.0);
        let batch = observation.evaluate(&dom);
        assert!(!batch[0].is_intersecting);
        assert!(batch[1].is_intersecting);
    }

    #[test]
    fn test_outcome_merge() {
        let mut outcome: EventOutcome<u32> = EventOutcome::none();
        assert!(outcome.is_empty());
        outcome.merge(EventOutcome::prevent_default());
        outcome.merge(EventOutcome {
            unobserve: vec![(ObservationSource::FadeIn, 7)],
            ..EventOutcome::default()
        });
        assert!(outcome.prevent_default);
        assert_eq!(outcome.unobserve, vec![(ObservationSource::FadeIn, 7)]);
    }
}
