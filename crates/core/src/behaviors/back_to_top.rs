use super::{Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::{PageContext, require};
use crate::error::EnhanceError;
use crate::event::EventOutcome;
use log::debug;
use pagewright_traits::{Dom, ScrollBehavior};

const SHOW_CLASS: &str = "show";

#[derive(Debug, Clone)]
pub struct BackToTop<N> {
    button: N,
    threshold: f64,
}

impl<N: Clone + PartialEq> BackToTop<N> {
    /// Applies the visibility rule immediately, so a page restored mid-scroll
    /// shows the button without waiting for the next scroll event.
    pub fn install<D: Dom<Node = N>>(
        dom: &mut D,
        ctx: &PageContext<N>,
        config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        let button = require(&ctx.back_to_top, BehaviorKind::BackToTop, "button")?.clone();
        let behavior = Self {
            button,
            threshold: config.back_to_top_threshold,
        };
        behavior.apply(dom)?;
        Ok(behavior)
    }

    fn apply<D: Dom<Node = N>>(&self, dom: &mut D) -> Result<(), EnhanceError> {
        if dom.scroll_y() > self.threshold {
            dom.add_class(&self.button, SHOW_CLASS)?;
        } else {
            dom.remove_class(&self.button, SHOW_CLASS)?;
        }
        Ok(())
    }
}

impl<D: Dom> Behavior<D> for BackToTop<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::BackToTop
    }

    fn click_targets(&self) -> Vec<D::Node> {
        vec![self.button.clone()]
    }

    fn on_scroll(&mut self, dom: &mut D) -> Result<(), EnhanceError> {
        self.apply(dom)
    }

    fn on_click(
        &mut self,
        dom: &mut D,
        current: &D::Node,
        _target: &D::Node,
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        if current == &self.button {
            debug!("Back to top");
            dom.scroll_to(0.0, ScrollBehavior::Smooth)?;
        }
        Ok(EventOutcome::none())
    }
}
