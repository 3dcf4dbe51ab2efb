//! Error handling for WASM bindings.
//!
//! Converts pagewright's error types into JavaScript-friendly errors.

use pagewright_core::EnhanceError;
use pagewright_traits::DomError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid configuration object or value
    Config,
    /// A behavior's required element is missing from the page
    MissingElement,
    /// A document operation failed
    Dom,
    /// The browser environment is unusable (no window, no document)
    Host,
}

impl ErrorCode {
    fn as_js_code(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::MissingElement => "MISSING_ELEMENT",
            ErrorCode::Dom => "DOM_ERROR",
            ErrorCode::Host => "HOST_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
///
/// Not a `#[wasm_bindgen]` struct: it converts into a real JS `Error` with
/// a `code` property instead.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct PagewrightError {
    code: ErrorCode,
    message: String,
}

impl PagewrightError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Host, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EnhanceError> for PagewrightError {
    fn from(err: EnhanceError) -> Self {
        let code = match &err {
            EnhanceError::MissingElement { .. } => ErrorCode::MissingElement,
            EnhanceError::Dom(_) => ErrorCode::Dom,
            EnhanceError::Config(_) => ErrorCode::Config,
        };
        Self::new(code, err.to_string())
    }
}

impl From<DomError> for PagewrightError {
    fn from(err: DomError) -> Self {
        Self::new(ErrorCode::Dom, err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for PagewrightError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<PagewrightError> for JsValue {
    fn from(err: PagewrightError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_js_code()),
        )
        .ok();
        js_error.into()
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
