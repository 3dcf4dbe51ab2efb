use super::{Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::{PageContext, require};
use crate::error::EnhanceError;
use crate::event::EventOutcome;
use log::debug;
use pagewright_traits::Dom;

const STICKY_CLASS: &str = "sticky";

/// Fixes the header once the page scrolls past the top of the content
/// wrapper, padding the body so the content does not jump.
#[derive(Debug, Clone)]
pub struct StickyHeader<N> {
    header: N,
    content_wrapper: N,
    body: N,
    content_offset: f64,
}

impl<N: Clone + PartialEq> StickyHeader<N> {
    pub fn install<D: Dom<Node = N>>(
        dom: &mut D,
        ctx: &PageContext<N>,
        _config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        let kind = BehaviorKind::StickyHeader;
        let header = require(&ctx.header, kind, "header")?.clone();
        let content_wrapper = require(&ctx.content_wrapper, kind, "content wrapper")?.clone();
        let body = require(&ctx.body, kind, "body")?.clone();

        let content_offset = dom.offset_top(&content_wrapper);
        debug!("Sticky header trigger offset: {}", content_offset);

        let sticky = Self {
            header,
            content_wrapper,
            body,
            content_offset,
        };
        sticky.apply(dom)?;
        Ok(sticky)
    }

    pub fn content_offset(&self) -> f64 {
        self.content_offset
    }

    fn apply<D: Dom<Node = N>>(&self, dom: &mut D) -> Result<(), EnhanceError> {
        if dom.scroll_y() > self.content_offset {
            dom.add_class(&self.header, STICKY_CLASS)?;
            let height = dom.offset_height(&self.header);
            dom.set_style(&self.body, "padding-top", &format!("{}px", height))?;
        } else {
            dom.remove_class(&self.header, STICKY_CLASS)?;
            dom.set_style(&self.body, "padding-top", "0")?;
        }
        Ok(())
    }
}

impl<D: Dom> Behavior<D> for StickyHeader<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::StickyHeader
    }

    fn on_scroll(&mut self, dom: &mut D) -> Result<(), EnhanceError> {
        self.apply(dom)
    }

    fn on_resize(&mut self, dom: &mut D) -> Result<EventOutcome<D::Node>, EnhanceError> {
        self.content_offset = dom.offset_top(&self.content_wrapper);
        self.apply(dom)?;
        Ok(EventOutcome::none())
    }
}
