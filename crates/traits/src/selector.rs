//! A small CSS selector subset for `InMemoryDom`.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, compounds of those
//! (`div.gallery-item`), the descendant combinator (whitespace) and
//! selector groups (`h1, h2, h3`). Anything else is rejected.

use crate::dom::DomError;

/// One compound selector such as `a.active` or `#toc-list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Lower-case tag name, `None` for `*` or when omitted.
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(input.to_string());
        if input.is_empty() {
            return Err(invalid());
        }

        let mut compound = Compound::default();
        let mut rest = input;

        let tag_len = rest
            .find(|c| c == '#' || c == '.')
            .unwrap_or(rest.len());
        let tag = &rest[..tag_len];
        if tag == "*" {
            // universal, no constraint
        } else if !tag.is_empty() {
            if !is_ident(tag) {
                return Err(invalid());
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body
                .find(|c| c == '#' || c == '.')
                .unwrap_or(body.len());
            let name = &body[..len];
            if !is_ident(name) {
                return Err(invalid());
            }
            match marker {
                '#' if compound.id.is_none() => compound.id = Some(name.to_string()),
                '.' => compound.classes.push(name.to_string()),
                _ => return Err(invalid()),
            }
            rest = &body[len..];
        }

        Ok(compound)
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// A comma-separated list of descendant-combinator chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Vec<Compound>>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let mut groups = Vec::new();
        for group in input.split(',') {
            let chain = group
                .split_whitespace()
                .map(Compound::parse)
                .collect::<Result<Vec<_>, _>>()?;
            if chain.is_empty() {
                return Err(DomError::InvalidSelector(input.to_string()));
            }
            groups.push(chain);
        }
        Ok(SelectorList(groups))
    }
}
