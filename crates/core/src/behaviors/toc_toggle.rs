use super::{ACTIVE_CLASS, Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::{PageContext, require};
use crate::error::EnhanceError;
use crate::event::EventOutcome;
use log::debug;
use pagewright_traits::Dom;

const CLOSED_ICON: &str = "fa-bars";
const OPEN_ICON: &str = "fa-times";

/// Mobile show/hide button for the TOC sidebar.
#[derive(Debug, Clone)]
pub struct TocToggle<N> {
    button: N,
    sidebar: N,
    toc_list: Option<N>,
    icon: Option<N>,
}

impl<N: Clone + PartialEq> TocToggle<N> {
    pub fn install<D: Dom<Node = N>>(
        _dom: &mut D,
        ctx: &PageContext<N>,
        _config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        let kind = BehaviorKind::TocToggle;
        let button = require(&ctx.toc_toggle, kind, "toggle button")?.clone();
        let sidebar = require(&ctx.toc_sidebar, kind, "sidebar")?.clone();
        if ctx.toc_toggle_icon.is_none() {
            debug!("Toggle button has no icon, only the sidebar will change");
        }
        Ok(Self {
            button,
            sidebar,
            toc_list: ctx.toc_list.clone(),
            icon: ctx.toc_toggle_icon.clone(),
        })
    }
}

impl<D: Dom> Behavior<D> for TocToggle<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::TocToggle
    }

    fn click_targets(&self) -> Vec<D::Node> {
        vec![self.button.clone()]
    }

    fn on_click(
        &mut self,
        dom: &mut D,
        current: &D::Node,
        _target: &D::Node,
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        if current != &self.button {
            return Ok(EventOutcome::none());
        }
        let open = dom.toggle_class(&self.sidebar, ACTIVE_CLASS)?;
        if let Some(list) = &self.toc_list {
            dom.toggle_class(list, ACTIVE_CLASS)?;
        }
        if let Some(icon) = &self.icon {
            let (from, to) = if open {
                (CLOSED_ICON, OPEN_ICON)
            } else {
                (OPEN_ICON, CLOSED_ICON)
            };
            dom.remove_class(icon, from)?;
            dom.add_class(icon, to)?;
        }
        Ok(EventOutcome::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::standard_page;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut page = standard_page();
        let ctx = PageContext::resolve(&page.dom, &Default::default());
        let mut toggle = TocToggle::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap();
        let button = page.toggle;

        toggle.on_click(&mut page.dom, &button, &button).unwrap();
        assert!(page.dom.has_class(&page.sidebar, "active"));
        assert!(page.dom.has_class(&page.toc_list, "active"));
        assert!(page.dom.has_class(&page.icon, "fa-times"));
        assert!(!page.dom.has_class(&page.icon, "fa-bars"));

        toggle.on_click(&mut page.dom, &button, &page.icon).unwrap();
        assert!(!page.dom.has_class(&page.sidebar, "active"));
        assert!(!page.dom.has_class(&page.toc_list, "active"));
        assert!(page.dom.has_class(&page.icon, "fa-bars"));
        assert!(!page.dom.has_class(&page.icon, "fa-times"));
        assert!(page.dom.has_class(&page.icon, "fa"));
    }

    #[test]
    fn test_works_without_icon() {
        let mut page = standard_page();
        let mut ctx = PageContext::resolve(&page.dom, &Default::default());
        ctx.toc_toggle_icon = None;
        let mut toggle = TocToggle::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap();
        let button = page.toggle;
        toggle.on_click(&mut page.dom, &button, &button).unwrap();
        assert!(page.dom.has_class(&page.sidebar, "active"));
        assert!(page.dom.has_class(&page.icon, "fa-bars"));
    }

    #[test]
    fn test_missing_sidebar_skips_behavior() {
        let mut page = standard_page();
        let mut ctx = PageContext::resolve(&page.dom, &Default::default());
        ctx.toc_sidebar = None;
        let err = TocToggle::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap_err();
        assert_eq!(err, EnhanceError::missing("toc-toggle", "sidebar"));
    }
}
