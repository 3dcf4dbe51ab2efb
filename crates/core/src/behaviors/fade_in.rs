use super::{Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::event::{EventOutcome, Intersection, Observation, ObservationSource};
use log::debug;
use pagewright_traits::Dom;
use pagewright_types::RootMargin;

const VISIBLE_CLASS: &str = "is-visible";

/// Reveals sections the first time enough of them scrolls into view.
#[derive(Debug, Clone)]
pub struct FadeIn<N> {
    /// Sections not revealed yet.
    pending: Vec<N>,
    threshold: f64,
}

impl<N: Clone + PartialEq> FadeIn<N> {
    pub fn install<D: Dom<Node = N>>(
        _dom: &mut D,
        ctx: &PageContext<N>,
        config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        debug!("Fade-in watching {} sections", ctx.fade_in_sections.len());
        Ok(Self {
            pending: ctx.fade_in_sections.clone(),
            threshold: config.fade_in_threshold,
        })
    }

    pub fn pending(&self) -> &[N] {
        &self.pending
    }
}

impl<D: Dom> Behavior<D> for FadeIn<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::FadeIn
    }

    fn observation(&self, _dom: &D) -> Option<Observation<D::Node>> {
        if self.pending.is_empty() {
            return None;
        }
        Some(Observation {
            source: ObservationSource::FadeIn,
            root_margin: RootMargin::zero(),
            threshold: self.threshold,
            targets: self.pending.clone(),
        })
    }

    fn on_intersections(
        &mut self,
        dom: &mut D,
        source: ObservationSource,
        entries: &[Intersection<D::Node>],
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        let mut outcome = EventOutcome::none();
        if source != ObservationSource::FadeIn {
            return Ok(outcome);
        }
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(pos) = self.pending.iter().position(|n| n == &entry.target) else {
                continue;
            };
            let section = self.pending.remove(pos);
            dom.add_class(&section, VISIBLE_CLASS)?;
            outcome.unobserve.push((ObservationSource::FadeIn, section));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::standard_page;
    use pagewright_traits::InMemoryDom;

    #[test]
    fn test_reveals_once_and_unobserves() {
        let mut page = standard_page();
        let ctx = PageContext::resolve(&page.dom, &Default::default());
        let mut fade = FadeIn::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap();

        // First section spans 2500..2900; viewport ends at scroll + 800.
        page.dom.set_scroll_y(1750.0);
        let observation = Behavior::<InMemoryDom>::observation(&fade, &page.dom).unwrap();
        assert_eq!(observation.threshold, 0.1);
        let batch = observation.evaluate(&page.dom);
        assert_eq!(batch.iter().filter(|e| e.is_intersecting).count(), 1);

        let outcome = fade
            .on_intersections(&mut page.dom, ObservationSource::FadeIn, &batch)
            .unwrap();
        assert!(page.dom.has_class(&page.fade_in[0], "is-visible"));
        assert!(!page.dom.has_class(&page.fade_in[1], "is-visible"));
        assert_eq!(
            outcome.unobserve,
            vec![(ObservationSource::FadeIn, page.fade_in[0])]
        );
        assert_eq!(fade.pending(), &[page.fade_in[1]]);

        // repeated notifications for a revealed section are no-ops
        let again = fade
            .on_intersections(
                &mut page.dom,
                ObservationSource::FadeIn,
                &[Intersection::new(page.fade_in[0], true)],
            )
            .unwrap();
        assert!(again.unobserve.is_empty());
    }

    #[test]
    fn test_below_threshold_stays_hidden() {
        let mut page = standard_page();
        let ctx = PageContext::resolve(&page.dom, &Default::default());
        let fade = FadeIn::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap();

        // 20 of 400 px visible
        page.dom.set_scroll_y(1720.0);
        let observation = Behavior::<InMemoryDom>::observation(&fade, &page.dom).unwrap();
        assert!(observation.evaluate(&page.dom).iter().all(|e| !e.is_intersecting));
    }

    #[test]
    fn test_no_observation_once_everything_is_revealed() {
        let mut page = standard_page();
        let ctx = PageContext::resolve(&page.dom, &Default::default());
        let mut fade = FadeIn::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap();
        let batch: Vec<_> = page
            .fade_in
            .iter()
            .map(|s| Intersection::new(*s, true))
            .collect();
        fade.on_intersections(&mut page.dom, ObservationSource::FadeIn, &batch)
            .unwrap();
        assert!(Behavior::<InMemoryDom>::observation(&fade, &page.dom).is_none());
    }
}
