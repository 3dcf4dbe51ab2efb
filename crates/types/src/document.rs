use crate::ids::AnchorId;
use serde::{Deserialize, Serialize};

/// Semantic level of a heading that takes part in the table of contents.
///
/// Serialized as the bare number (`1` to `3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Maps an element tag name (`"H2"`, `"h2"`) to a level.
    ///
    /// Returns `None` for anything other than `h1` to `h3`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    /// Inline style declarations applied to the list item of an entry at this level.
    pub fn presentation(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::H1 => &[("font-weight", "bold")],
            Self::H2 => &[],
            Self::H3 => &[("margin-left", "20px"), ("font-size", "0.9em")],
        }
    }

    pub fn is_indented(self) -> bool {
        self == Self::H3
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            other => Err(format!("heading level must be 1, 2 or 3, got {}", other)),
        }
    }
}

/// An entry in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    /// Heading level (1 = h1, 2 = h2, 3 = h3)
    pub level: HeadingLevel,
    /// The exact display text of the heading.
    pub text: String,
    /// The anchor ID to link to this heading.
    pub target_id: AnchorId,
}

impl TocEntry {
    pub fn href(&self) -> String {
        self.target_id.fragment()
    }
}
