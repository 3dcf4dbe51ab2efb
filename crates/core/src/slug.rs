//! Heading slugs.
//!
//! `slugify` turns heading text into a fragment-safe identifier. It is a pure
//! function; uniqueness is the job of `SlugRegistry`, which the table of
//! contents builder threads through a single build.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Word characters are ASCII only, as in browser regular expressions.
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_\s-]").expect("Invalid strip regex")
});

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("Invalid separator regex"));

static EDGE_HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+|-+$").expect("Invalid edge regex"));

/// Derives a URL-fragment-safe identifier from heading text.
///
/// Lower-cases, drops everything but word characters, whitespace and
/// hyphens, collapses separator runs into one hyphen and trims hyphens from
/// both ends. Text with nothing usable yields an empty string.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lower, "");
    let joined = SEPARATOR_RE.replace_all(&stripped, "-");
    EDGE_HYPHEN_RE.replace_all(&joined, "").into_owned()
}

/// The identifiers handed out (or found) during one table of contents build.
#[derive(Debug, Default, Clone)]
pub struct SlugRegistry {
    taken: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an identifier that already exists, such as a heading's own id.
    ///
    /// Returns `false` if it was already recorded.
    pub fn reserve(&mut self, id: &str) -> bool {
        self.taken.insert(id.to_string())
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Claims `base`, or `base-1`, `base-2`, ... if it is taken here or
    /// `exists_elsewhere` reports it in use.
    ///
    /// An empty base is returned unchanged and not recorded.
    pub fn claim(&mut self, base: &str, mut exists_elsewhere: impl FnMut(&str) -> bool) -> String {
        if base.is_empty() {
            return String::new();
        }
        let mut candidate = base.to_string();
        let mut suffix = 1usize;
        while self.taken.contains(&candidate) || exists_elsewhere(&candidate) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
