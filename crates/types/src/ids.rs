//! Newtype wrapper for element identifiers used as URL fragments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The identifier of a heading, used as the target of a `#fragment` link.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(Arc<str>);

impl AnchorId {
    /// Creates a new AnchorId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this anchor ID
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `#id` form used in `href` attributes and the address bar.
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }

    /// An empty identifier, produced when a heading's text slugifies to nothing.
    pub fn is_degenerate(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AnchorId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for AnchorId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for AnchorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_id_creation() {
        let id1 = AnchorId::new("key-terms");
        let id2 = AnchorId::from("key-terms");
        let id3 = AnchorId::from(String::from("key-terms"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "key-terms");
    }

    #[test]
    fn test_fragment() {
        assert_eq!(AnchorId::new("background").fragment(), "#background");
        assert_eq!(AnchorId::new("").fragment(), "#");
    }

    #[test]
    fn test_degenerate() {
        assert!(AnchorId::new("").is_degenerate());
        assert!(!AnchorId::new("a").is_degenerate());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&AnchorId::new("intro")).unwrap();
        assert_eq!(json, "\"intro\"");
    }
}
