pub mod document;
pub mod geometry;
pub mod ids;

pub use document::{HeadingLevel, TocEntry};
pub use geometry::{Band, Length, Rect, RootMargin};
pub use ids::AnchorId;
