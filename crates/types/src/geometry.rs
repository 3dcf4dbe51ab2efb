//! Viewport geometry used by visibility observations.
//!
//! All values are CSS pixels. Rectangles are viewport-relative unless the
//! caller says otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The overlapping region of two rectangles.
    ///
    /// Edge-adjacent rectangles produce a zero-area intersection rather than
    /// `None`, matching how browsers report touching targets.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        if left > right || top > bottom {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// A single root-margin component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            Length::Px(px) => px,
            Length::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{}px", px),
            Length::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// Margins that grow (positive) or shrink (negative) the observation root.
///
/// Displays in the `top right bottom left` form accepted by
/// `IntersectionObserver`'s `rootMargin` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn vertical(top: Length, bottom: Length) -> Self {
        Self {
            top,
            bottom,
            ..Self::default()
        }
    }

    /// Applies the margins to a viewport of the given size.
    pub fn band(&self, viewport_width: f64, viewport_height: f64) -> Band {
        let top = -self.top.resolve(viewport_height);
        let bottom = viewport_height + self.bottom.resolve(viewport_height);
        let left = -self.left.resolve(viewport_width);
        let right = viewport_width + self.right.resolve(viewport_width);
        Band {
            rect: Rect::new(left, top, right - left, bottom - top),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// The effective, margin-adjusted observation root in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub rect: Rect,
}

impl Band {
    /// Whether a target counts as intersecting for the given threshold.
    ///
    /// A threshold of zero accepts any contact, including zero-area targets.
    /// Otherwise the visible fraction of the target's area must reach it.
    pub fn intersects(&self, target: &Rect, threshold: f64) -> bool {
        if self.rect.height < 0.0 || self.rect.width < 0.0 {
            return false;
        }
        let Some(overlap) = self.rect.intersection(target) else {
            return false;
        };
        if threshold <= 0.0 {
            return true;
        }
        let area = target.area();
        if area <= 0.0 {
            return false;
        }
        overlap.area() / area >= threshold
    }
}
