use super::{ACTIVE_CLASS, Behavior, BehaviorKind};
use crate::config::EnhancerConfig;
use crate::context::{PageContext, require};
use crate::error::EnhanceError;
use crate::event::EventOutcome;
use log::{debug, warn};
use pagewright_traits::Dom;

/// Enlarged-image overlay for gallery images.
///
/// Opening copies the clicked image's `src` and `alt` into the overlay and
/// locks body scrolling. The close control, or a click on the overlay
/// backdrop itself, closes it again.
#[derive(Debug, Clone)]
pub struct Lightbox<N> {
    overlay: N,
    image: N,
    close: Option<N>,
    gallery: Vec<N>,
    body: Option<N>,
}

impl<N: Clone + PartialEq> Lightbox<N> {
    pub fn install<D: Dom<Node = N>>(
        _dom: &mut D,
        ctx: &PageContext<N>,
        _config: &EnhancerConfig,
    ) -> Result<Self, EnhanceError> {
        let kind = BehaviorKind::Lightbox;
        let overlay = require(&ctx.lightbox, kind, "overlay")?.clone();
        let image = require(&ctx.lightbox_image, kind, "overlay image")?.clone();
        if ctx.lightbox_close.is_none() {
            warn!("Lightbox close control not found, only backdrop clicks will close it");
        }
        debug!("Lightbox wired to {} gallery images", ctx.gallery_images.len());
        Ok(Self {
            overlay,
            image,
            close: ctx.lightbox_close.clone(),
            gallery: ctx.gallery_images.clone(),
            body: ctx.body.clone(),
        })
    }

    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        dom.has_class(&self.overlay, ACTIVE_CLASS)
    }

    fn open<D: Dom<Node = N>>(&self, dom: &mut D, source: &N) -> Result<(), EnhanceError> {
        dom.add_class(&self.overlay, ACTIVE_CLASS)?;
        let src = dom.attribute(source, "src").unwrap_or_default();
        let alt = dom.attribute(source, "alt").unwrap_or_default();
        dom.set_attribute(&self.image, "src", &src)?;
        dom.set_attribute(&self.image, "alt", &alt)?;
        if let Some(body) = &self.body {
            dom.set_style(body, "overflow", "hidden")?;
        }
        debug!("Lightbox opened for '{}'", src);
        Ok(())
    }

    fn close<D: Dom<Node = N>>(&self, dom: &mut D) -> Result<(), EnhanceError> {
        dom.remove_class(&self.overlay, ACTIVE_CLASS)?;
        if let Some(body) = &self.body {
            dom.set_style(body, "overflow", "")?;
        }
        debug!("Lightbox closed");
        Ok(())
    }
}

impl<D: Dom> Behavior<D> for Lightbox<D::Node> {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Lightbox
    }

    fn click_targets(&self) -> Vec<D::Node> {
        let mut targets = self.gallery.clone();
        targets.extend(self.close.iter().cloned());
        targets.push(self.overlay.clone());
        targets
    }

    fn on_click(
        &mut self,
        dom: &mut D,
        current: &D::Node,
        target: &D::Node,
    ) -> Result<EventOutcome<D::Node>, EnhanceError> {
        if self.gallery.contains(current) {
            self.open(dom, current)?;
        } else if self.close.as_ref() == Some(current) {
            self.close(dom)?;
        } else if current == &self.overlay && target == &self.overlay {
            self.close(dom)?;
        }
        Ok(EventOutcome::none())
    }
}
