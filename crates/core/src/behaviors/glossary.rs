use super::{ACTIVE_CLASS, Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::event::EventOutcome;
use log::{debug, warn};
use pagewright_traits::Dom;

/// Accordion over the glossary: each header opens the panel that follows it.
#[derive(Debug, Clone)]
pub struct Glossary<N> {
    headers: Vec<N>,
}

impl<N: Clone + PartialEq> Glossary<N> {
    pub fn install<D: Dom<Node = N>>(
        dom: &mut D,
        ctx: &PageContext<N>,
        _config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        for (index, header) in ctx.glossary_headers.iter().enumerate() {
            if dom.next_element_sibling(header).is_none() {
                warn!("Glossary header {} has no content panel after it", index);
            }
        }
        debug!("Glossary with {} entries", ctx.glossary_headers.len());
        Ok(Self {
            headers: ctx.glossary_headers.clone(),
        })
    }
}

impl<D: Dom> Behavior<D> for Glossary<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Glossary
    }

    fn click_targets(&self) -> Vec<D::Node> {
        self.headers.clone()
    }

    fn on_click(
        &mut self,
        dom: &mut D,
        current: &D::Node,
        _target: &D::Node,
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        if !self.headers.contains(current) {
            return Ok(EventOutcome::none());
        }
        dom.toggle_class(current, ACTIVE_CLASS)?;

        // The panel is looked up per click; markup may have changed since install.
        let Some(panel) = dom.next_element_sibling(current) else {
            warn!("Glossary header clicked without a content panel");
            return Ok(EventOutcome::none());
        };
        if dom.toggle_class(&panel, ACTIVE_CLASS)? {
            let height = dom.scroll_height(&panel);
            dom.set_style(&panel, "max-height", &format!("{}px", height))?;
        } else {
            dom.set_style(&panel, "max-height", "0")?;
        }
        Ok(EventOutcome::none())
    }
}
