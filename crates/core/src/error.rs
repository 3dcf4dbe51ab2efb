// src/error.rs
//! Error types for installing and running page behaviors.

use pagewright_traits::DomError;
use thiserror::Error;

/// The main error enum for all behavior operations.
///
/// Installers return it when a collaborator element is missing; the
/// `Enhancer` logs it and carries on with the remaining behaviors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnhanceError {
    #[error("{behavior}: required element '{element}' not found")]
    MissingElement {
        behavior: &'static str,
        element: String,
    },
    #[error("Document error: {0}")]
    Dom(#[from] DomError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EnhanceError {
    pub fn missing(behavior: &'static str, element: impl Into<String>) -> Self {
        EnhanceError::MissingElement {
            behavior,
            element: element.into(),
        }
    }

    /// Whether this error only means the hosting page lacks the markup.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, EnhanceError::MissingElement { .. })
    }
}
