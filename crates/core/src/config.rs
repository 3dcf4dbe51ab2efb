//! Configuration for the page enhancer.
//!
//! Every collaborator element is located through a CSS selector so the
//! behaviors can be pointed at pages that use different markup. The defaults
//! match the standard article template.

use crate::behaviors::BehaviorKind;
use crate::error::EnhanceError;
use serde::{Deserialize, Serialize};

/// Selectors for the elements the behaviors operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub header: String,
    pub content_wrapper: String,
    pub article: String,
    /// Evaluated inside the article.
    pub headings: String,
    pub toc_list: String,
    pub toc_toggle: String,
    pub toc_sidebar: String,
    /// Evaluated inside the toggle button.
    pub toc_toggle_icon: String,
    pub lightbox: String,
    /// Evaluated inside the lightbox.
    pub lightbox_image: String,
    /// Evaluated inside the lightbox.
    pub lightbox_close: String,
    pub gallery_images: String,
    pub fade_in: String,
    pub glossary_headers: String,
    pub back_to_top: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "#main-header".to_string(),
            content_wrapper: ".main-content-wrapper".to_string(),
            article: "main article".to_string(),
            headings: "h1, h2, h3".to_string(),
            toc_list: "#toc-list".to_string(),
            toc_toggle: "#toc-toggle-button".to_string(),
            toc_sidebar: "#toc-sidebar".to_string(),
            toc_toggle_icon: "i".to_string(),
            lightbox: "#article-lightbox".to_string(),
            lightbox_image: "img".to_string(),
            lightbox_close: ".lightbox-close".to_string(),
            gallery_images: ".gallery-item img".to_string(),
            fade_in: ".fade-in-section".to_string(),
            glossary_headers: ".glossary-header".to_string(),
            back_to_top: "#back-to-top".to_string(),
        }
    }
}

impl Selectors {
    fn entries(&self) -> [(&'static str, &str); 15] {
        [
            ("header", self.header.as_str()),
            ("contentWrapper", self.content_wrapper.as_str()),
            ("article", self.article.as_str()),
            ("headings", self.headings.as_str()),
            ("tocList", self.toc_list.as_str()),
            ("tocToggle", self.toc_toggle.as_str()),
            ("tocSidebar", self.toc_sidebar.as_str()),
            ("tocToggleIcon", self.toc_toggle_icon.as_str()),
            ("lightbox", self.lightbox.as_str()),
            ("lightboxImage", self.lightbox_image.as_str()),
            ("lightboxClose", self.lightbox_close.as_str()),
            ("galleryImages", self.gallery_images.as_str()),
            ("fadeIn", self.fade_in.as_str()),
            ("glossaryHeaders", self.glossary_headers.as_str()),
            ("backToTop", self.back_to_top.as_str()),
        ]
    }
}

/// Per-behavior switches. Everything is on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehaviorToggles {
    pub sticky_header: bool,
    pub table_of_contents: bool,
    pub scroll_spy: bool,
    pub toc_toggle: bool,
    pub lightbox: bool,
    pub fade_in: bool,
    pub glossary: bool,
    pub back_to_top: bool,
}

impl Default for BehaviorToggles {
    fn default() -> Self {
        Self {
            sticky_header: true,
            table_of_contents: true,
            scroll_spy: true,
            toc_toggle: true,
            lightbox: true,
            fade_in: true,
            glossary: true,
            back_to_top: true,
        }
    }
}

impl BehaviorToggles {
    fn slot(&mut self, kind: BehaviorKind) -> &mut bool {
        match kind {
            BehaviorKind::StickyHeader => &mut self.sticky_header,
            BehaviorKind::TableOfContents => &mut self.table_of_contents,
            BehaviorKind::ScrollSpy => &mut self.scroll_spy,
            BehaviorKind::TocToggle => &mut self.toc_toggle,
            BehaviorKind::Lightbox => &mut self.lightbox,
            BehaviorKind::FadeIn => &mut self.fade_in,
            BehaviorKind::Glossary => &mut self.glossary,
            BehaviorKind::BackToTop => &mut self.back_to_top,
        }
    }

    pub fn is_enabled(&self, kind: BehaviorKind) -> bool {
        match kind {
            BehaviorKind::StickyHeader => self.sticky_header,
            BehaviorKind::TableOfContents => self.table_of_contents,
            BehaviorKind::ScrollSpy => self.scroll_spy,
            BehaviorKind::TocToggle => self.toc_toggle,
            BehaviorKind::Lightbox => self.lightbox,
            BehaviorKind::FadeIn => self.fade_in,
            BehaviorKind::Glossary => self.glossary,
            BehaviorKind::BackToTop => self.back_to_top,
        }
    }
}

/// Top-level enhancer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhancerConfig {
    pub selectors: Selectors,
    pub behaviors: BehaviorToggles,
    /// Space left between the header and a heading scrolled into view, and
    /// added to the header height for the scroll-spy top margin.
    pub scroll_gap: f64,
    /// Scroll offset above which the back-to-top button is shown.
    pub back_to_top_threshold: f64,
    /// Share of the viewport, from the bottom, excluded from the scroll-spy band.
    pub spy_bottom_margin_percent: f64,
    /// Visible fraction at which a fade-in section is revealed.
    pub fade_in_threshold: f64,
    /// Re-issue the scroll-spy observation when a resize changes the header height.
    pub recompute_spy_on_resize: bool,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            behaviors: BehaviorToggles::default(),
            scroll_gap: 10.0,
            back_to_top_threshold: 300.0,
            spy_bottom_margin_percent: 50.0,
            fade_in_threshold: 0.1,
            recompute_spy_on_resize: true,
        }
    }
}

impl EnhancerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_scroll_gap(mut self, gap: f64) -> Self {
        self.scroll_gap = gap;
        self
    }

    pub fn with_back_to_top_threshold(mut self, threshold: f64) -> Self {
        self.back_to_top_threshold = threshold;
        self
    }

    pub fn with_fade_in_threshold(mut self, threshold: f64) -> Self {
        self.fade_in_threshold = threshold;
        self
    }

    pub fn with_spy_bottom_margin_percent(mut self, percent: f64) -> Self {
        self.spy_bottom_margin_percent = percent;
        self
    }

    pub fn with_recompute_spy_on_resize(mut self, enabled: bool) -> Self {
        self.recompute_spy_on_resize = enabled;
        self
    }

    pub fn without(mut self, kind: BehaviorKind) -> Self {
        *self.behaviors.slot(kind) = false;
        self
    }

    pub fn is_enabled(&self, kind: BehaviorKind) -> bool {
        self.behaviors.is_enabled(kind)
    }

    /// Checks numeric ranges and that no selector is blank.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if !self.scroll_gap.is_finite() || self.scroll_gap < 0.0 {
            return Err(EnhanceError::Config(format!(
                "scrollGap must be a non-negative number, got {}",
                self.scroll_gap
            )));
        }
        if !self.back_to_top_threshold.is_finite() || self.back_to_top_threshold < 0.0 {
            return Err(EnhanceError::Config(format!(
                "backToTopThreshold must be a non-negative number, got {}",
                self.back_to_top_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.spy_bottom_margin_percent) {
            return Err(EnhanceError::Config(format!(
                "spyBottomMarginPercent must be within 0..=100, got {}",
                self.spy_bottom_margin_percent
            )));
        }
        if !(0.0..=1.0).contains(&self.fade_in_threshold) {
            return Err(EnhanceError::Config(format!(
                "fadeInThreshold must be within 0..=1, got {}",
                self.fade_in_threshold
            )));
        }
        if let Some((name, _)) = self
            .selectors
            .entries()
            .into_iter()
            .find(|(_, selector)| selector.trim().is_empty())
        {
            return Err(EnhanceError::Config(format!(
                "selector '{}' must not be empty",
                name
            )));
        }
        Ok(())
    }
}
