use super::{Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::{PageContext, require};
use crate::error::EnhanceError;
use crate::event::EventOutcome;
use crate::slug::{SlugRegistry, slugify};
use log::{debug, warn};
use pagewright_traits::{Dom, ScrollBehavior};
use pagewright_types::{AnchorId, HeadingLevel, TocEntry};

/// One generated navigation entry and the elements behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct TocLink<N> {
    pub entry: TocEntry,
    pub heading: N,
    pub item: N,
    pub link: N,
}

/// The generated table of contents.
///
/// Built once at install: every heading in the article gets an `<li><a>`
/// appended to the navigation list, in document order. Clicking a link
/// smooth-scrolls the heading to just below the header and records the
/// fragment in history.
#[derive(Debug, Clone)]
pub struct TableOfContents<N> {
    header: Option<N>,
    links: Vec<TocLink<N>>,
    scroll_gap: f64,
}

impl<N: Clone + PartialEq> TableOfContents<N> {
    pub fn install<D: Dom<Node = N>>(
        dom: &mut D,
        ctx: &PageContext<N>,
        config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        let kind = BehaviorKind::TableOfContents;
        require(&ctx.article, kind, "content region")?;
        let toc_list = require(&ctx.toc_list, kind, "navigation list")?.clone();
        if ctx.header.is_none() {
            debug!("No header found, heading scroll offsets ignore header height");
        }

        let mut registry = SlugRegistry::new();
        for heading in &ctx.headings {
            if let Some(id) = dom.id(heading) {
                registry.reserve(&id);
            }
        }

        let mut links = Vec::with_capacity(ctx.headings.len());
        for (index, heading) in ctx.headings.iter().enumerate() {
            let link = build_entry(dom, &toc_list, heading, index, &mut registry)?;
            links.push(link);
        }
        debug!("Built table of contents with {} entries", links.len());

        Ok(Self {
            header: ctx.header.clone(),
            links,
            scroll_gap: config.scroll_gap,
        })
    }

    pub fn links(&self) -> &[TocLink<N>] {
        &self.links
    }

    pub fn entries(&self) -> Vec<TocEntry> {
        self.links.iter().map(|l| l.entry.clone()).collect()
    }

    pub fn header(&self) -> Option<&N> {
        self.header.as_ref()
    }

    /// Window scroll position that puts `heading` just under the header.
    pub fn scroll_target<D: Dom<Node = N>>(&self, dom: &D, heading: &N) -> f64 {
        let header_height = self
            .header
            .as_ref()
            .map(|h| dom.offset_height(h))
            .unwrap_or(0.0);
        dom.bounding_rect(heading).top() + dom.scroll_y() - header_height - self.scroll_gap
    }
}

fn build_entry<D: Dom>(
    dom: &mut D,
    toc_list: &D::Node,
    heading: &D::Node,
    index: usize,
    registry: &mut SlugRegistry,
) -> Result<TocLink<D::Node>, EnhanceError> {
    let tag = dom.tag_name(heading);
    let level = HeadingLevel::from_tag(&tag).unwrap_or_else(|| {
        debug!("Heading {} is a <{}>, treating it as level 2", index, tag);
        HeadingLevel::H2
    });
    let text = dom.text_content(heading);

    let id = match dom.id(heading) {
        Some(id) => id,
        None => {
            let base = slugify(&text);
            if base.is_empty() {
                warn!(
                    "Heading {} ('{}') has no text usable as an identifier",
                    index,
                    text.trim()
                );
            }
            let id = registry.claim(&base, |candidate| dom.element_by_id(candidate).is_some());
            dom.set_id(heading, &id);
            id
        }
    };

    let entry = TocEntry {
        level,
        text,
        target_id: AnchorId::from(id),
    };

    let item = dom.create_element("li")?;
    let link = dom.create_element("a")?;
    dom.set_attribute(&link, "href", &entry.href())?;
    dom.set_text_content(&link, &entry.text);
    for (property, value) in level.presentation() {
        dom.set_style(&item, property, value)?;
    }
    dom.append_child(&item, &link)?;
    dom.append_child(toc_list, &item)?;

    Ok(TocLink {
        entry,
        heading: heading.clone(),
        item,
        link,
    })
}

impl<D: Dom> Behavior<D> for TableOfContents<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::TableOfContents
    }

    fn click_targets(&self) -> Vec<D::Node> {
        self.links.iter().map(|l| l.link.clone()).collect()
    }

    fn on_click(
        &mut self,
        dom: &mut D,
        current: &D::Node,
        _target: &D::Node,
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        let Some(link) = self.links.iter().find(|l| &l.link == current) else {
            return Ok(EventOutcome::none());
        };
        let top = self.scroll_target(dom, &link.heading);
        debug!("Scrolling to '{}' at {}", link.entry.target_id, top);
        dom.scroll_to(top, ScrollBehavior::Smooth)?;
        dom.push_fragment(&link.entry.href())?;
        Ok(EventOutcome::prevent_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::standard_page;
    use pagewright_traits::InMemoryDom;

    fn install(page: &mut crate::test_support::Page) -> TableOfContents<pagewright_traits::NodeId> {
        let ctx = PageContext::resolve(&page.dom, &Default::default());
        TableOfContents::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap()
    }

    #[test]
    fn test_builds_entries_in_document_order() {
        let mut page = standard_page();
        let toc = install(&mut page);

        let ids: Vec<_> = toc
            .entries()
            .iter()
            .map(|e| e.target_id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["introduction", "background", "key-terms"]);

        let items = page.dom.children(page.toc_list);
        assert_eq!(items.len(), 3);
        let link = page.dom.children(items[2])[0];
        assert_eq!(page.dom.attribute(&link, "href").as_deref(), Some("#key-terms"));
        assert_eq!(page.dom.text_content(&link), "Key Terms");
    }

    #[test]
    fn test_assigns_ids_back_onto_headings() {
        let mut page = standard_page();
        install(&mut page);
        assert_eq!(page.dom.id(&page.headings[1]).as_deref(), Some("background"));
        assert_eq!(page.dom.element_by_id("key-terms"), Some(page.headings[2]));
    }

    #[test]
    fn test_level_presentation_hints() {
        let mut page = standard_page();
        let toc = install(&mut page);
        let items: Vec<_> = toc.links().iter().map(|l| l.item).collect();

        assert_eq!(page.dom.style(items[0], "font-weight").as_deref(), Some("bold"));
        assert!(page.dom.style(items[1], "margin-left").is_none());
        assert!(page.dom.style(items[1], "font-weight").is_none());
        assert_eq!(page.dom.style(items[2], "margin-left").as_deref(), Some("20px"));
        assert_eq!(page.dom.style(items[2], "font-size").as_deref(), Some("0.9em"));
    }

    #[test]
    fn test_keeps_existing_ids() {
        let mut page = standard_page();
        page.dom.set_id(&page.headings[0], "start");
        let toc = install(&mut page);
        assert_eq!(toc.entries()[0].target_id.as_str(), "start");
        assert_eq!(page.dom.id(&page.headings[0]).as_deref(), Some("start"));
    }

    #[test]
    fn test_duplicate_titles_get_suffixes() {
        let mut page = standard_page();
        for _ in 0..2 {
            page.dom
                .append_text(page.article, "h2", "Background")
                .unwrap();
        }
        let ctx = PageContext::resolve(&page.dom, &Default::default());
        let toc = TableOfContents::install(&mut page.dom, &ctx, &EnhancerConfig::default()).unwrap();
        let ids: Vec<_> = toc
            .entries()
            .iter()
            .map(|e| e.target_id.to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["introduction", "background", "key-terms", "background-1", "background-2"]
        );
    }

    #[test]
    fn test_slug_avoids_ids_used_elsewhere() {
        let mut page = standard_page();
        // an unrelated element already owns "introduction"
        let body = page.dom.body().unwrap();
        page.dom.append(body, "div#introduction").unwrap();
        let toc = install(&mut page);
        assert_eq!(toc.entries()[0].target_id.as_str(), "introduction-1");
    }

    #[test]
    fn test_generated_slug_does_not_steal_existing_heading_id() {
        let mut page = standard_page();
        page.dom.set_id(&page.headings[2], "background");
        let toc = install(&mut page);
        let ids: Vec<_> = toc.entries().iter().map(|e| e.target_id.to_string()).collect();
        assert_eq!(ids, vec!["introduction", "background-1", "background"]);
    }

    #[test]
    fn test_empty_heading_yields_degenerate_id() {
        let mut page = standard_page();
        page.dom.append_text(page.article, "h2", "???").unwrap();
        let toc = install(&mut page);
        let last = toc.entries().pop().unwrap();
        assert!(last.target_id.is_degenerate());
        assert_eq!(last.href(), "#");
    }

    #[test]
    fn test_click_scrolls_below_header_and_pushes_fragment() {
        let mut page = standard_page();
        let mut toc = install(&mut page);
        let link = toc.links()[1].link;

        let outcome = toc
            .on_click(&mut page.dom, &link, &link)
            .unwrap();
        assert!(outcome.prevent_default);
        // 900 (heading top) - 60 (header) - 10 (gap)
        assert_eq!(page.dom.scroll_requests()[0].top, 830.0);
        assert_eq!(page.dom.scroll_requests()[0].behavior, ScrollBehavior::Smooth);
        assert_eq!(page.dom.location_hash(), Some("#background"));
    }

    #[test]
    fn test_click_target_is_independent_of_current_scroll() {
        let mut page = standard_page();
        let mut toc = install(&mut page);
        page.dom.set_scroll_y(1200.0);
        let link = toc.links()[2].link;
        toc.on_click(&mut page.dom, &link, &link).unwrap();
        assert_eq!(page.dom.scroll_requests()[0].top, 1430.0);
    }

    #[test]
    fn test_unrelated_click_is_ignored() {
        let mut page = standard_page();
        let mut toc = install(&mut page);
        let outcome = toc
            .on_click(&mut page.dom, &page.back_to_top, &page.back_to_top)
            .unwrap();
        assert!(outcome.is_empty());
        assert!(page.dom.history().is_empty());
    }

    #[test]
    fn test_missing_navigation_list() {
        let mut page = standard_page();
        let mut ctx = PageContext::resolve(&page.dom, &Default::default());
        ctx.toc_list = None;
        let err = TableOfContents::install(&mut page.dom, &ctx, &EnhancerConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            EnhanceError::missing("table-of-contents", "navigation list")
        );
        assert!(page.dom.id(&page.headings[0]).is_none());
    }

    #[test]
    fn test_click_targets_are_links() {
        let mut page = standard_page();
        let toc = install(&mut page);
        let targets = Behavior::<InMemoryDom>::click_targets(&toc);
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0], toc.links()[0].link);
    }
}
