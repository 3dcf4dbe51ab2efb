//! PageEnhancer builder for WASM.
//!
//! This module provides the JavaScript entry point for configuring and
//! installing the page behaviors.

use crate::dom::WebDom;
use crate::error::PagewrightError;
use crate::host::{self, SharedHost};
use log::{LevelFilter, error, warn};
use pagewright_core::{BehaviorKind, Enhancer, EnhancerConfig, PageEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Set on `<body>` once the behaviors are installed on the current page.
pub const INSTALLED_ATTRIBUTE: &str = "data-pagewright-installed";

thread_local! {
    static CURRENT: RefCell<Option<SharedHost>> = const { RefCell::new(None) };
}

/// Configures and installs the page behaviors.
///
/// A page is enhanced at most once. Installing again while `<body>` carries
/// [`INSTALLED_ATTRIBUTE`] leaves the page alone and hands back the first
/// installation.
///
/// # Example
///
/// ```javascript
/// new PageEnhancer()
///   .withConfig({ scrollGap: 16, selectors: { article: "#post" } })
///   .withoutBehavior("lightbox")
///   .install();
/// ```
#[wasm_bindgen]
pub struct PageEnhancer {
    config: EnhancerConfig,
    debug: bool,
}

#[wasm_bindgen]
impl PageEnhancer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Panic hook is set in lib.rs init()
        Self {
            config: EnhancerConfig::default(),
            debug: false,
        }
    }

    /// Replaces the configuration with a JavaScript object.
    ///
    /// Keys are camelCase; anything omitted keeps its default.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(mut self, config: JsValue) -> Result<PageEnhancer, JsValue> {
        let config: EnhancerConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| PagewrightError::config(format!("Invalid config object: {}", e)))?;
        config.validate().map_err(PagewrightError::from)?;
        self.config = config;
        Ok(self)
    }

    /// Disables one behavior by name, e.g. `"back-to-top"`.
    #[wasm_bindgen(js_name = withoutBehavior)]
    pub fn without_behavior(mut self, name: &str) -> Result<PageEnhancer, JsValue> {
        let kind = BehaviorKind::from_name(name)
            .ok_or_else(|| PagewrightError::config(format!("Unknown behavior '{}'", name)))?;
        self.config = self.config.without(kind);
        Ok(self)
    }

    /// Enable debug-level logging.
    #[wasm_bindgen(js_name = withDebug)]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Installs once the document has been parsed: immediately if it
    /// already has, otherwise on `DOMContentLoaded`.
    pub fn install(self) -> Result<(), JsValue> {
        let dom = WebDom::new()?;
        let document = dom.document().clone();
        let config = self.config;
        apply_log_level(self.debug);
        host::when_ready(&document, move || {
            if let Err(e) = install_on(dom, config) {
                error!("Page enhancement failed: {}", e);
            }
        })?;
        Ok(())
    }

    /// Installs immediately against the current document.
    #[wasm_bindgen(js_name = installNow)]
    pub fn install_now(self) -> Result<EnhancedPage, JsValue> {
        apply_log_level(self.debug);
        let page = install_on(WebDom::new()?, self.config)?;
        Ok(page)
    }
}

impl Default for PageEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_log_level(debug: bool) {
    if debug {
        log::set_max_level(LevelFilter::Debug);
    }
}

fn install_on(mut dom: WebDom, config: EnhancerConfig) -> Result<EnhancedPage, PagewrightError> {
    let body = dom.document().body();
    let marked = body
        .as_ref()
        .is_some_and(|body| body.has_attribute(INSTALLED_ATTRIBUTE));
    if marked {
        if let Some(host) = CURRENT.with(|current| current.borrow().clone()) {
            warn!("Page is already enhanced; ignoring the second install");
            return Ok(EnhancedPage { host });
        }
    }

    let enhancer = Enhancer::install(&mut dom, config)?;
    let host = host::attach(dom, enhancer)?;
    if let Some(body) = body {
        if let Err(e) = body.set_attribute(INSTALLED_ATTRIBUTE, "") {
            warn!("Could not mark the page as enhanced: {:?}", e);
        }
    }
    CURRENT.with(|current| *current.borrow_mut() = Some(Rc::clone(&host)));
    Ok(EnhancedPage { host })
}

/// Handle to an installed page.
///
/// Dropping it does not uninstall anything; the listeners keep the
/// behaviors alive for the lifetime of the page.
#[wasm_bindgen]
pub struct EnhancedPage {
    host: SharedHost,
}

#[wasm_bindgen]
impl EnhancedPage {
    /// Names of the behaviors that were installed.
    pub fn installed(&self) -> Vec<String> {
        self.host
            .borrow()
            .enhancer
            .installed()
            .into_iter()
            .map(|kind| kind.name().to_string())
            .collect()
    }

    /// `"behavior: reason"` for every behavior that could not be installed.
    pub fn failures(&self) -> Vec<String> {
        self.host
            .borrow()
            .enhancer
            .failures()
            .iter()
            .map(|(kind, e)| format!("{}: {}", kind.name(), e))
            .collect()
    }

    /// The generated table of contents as an array of
    /// `{ level, text, targetId }` objects.
    #[wasm_bindgen(js_name = tocEntries)]
    pub fn toc_entries(&self) -> Result<JsValue, JsValue> {
        let state = self.host.borrow();
        let value = serde_wasm_bindgen::to_value(state.enhancer.toc_entries())
            .map_err(PagewrightError::from)?;
        Ok(value)
    }

    /// Re-runs the resize and scroll handlers, for pages that change layout
    /// without the window resizing.
    pub fn refresh(&self) {
        host::handle(&self.host, PageEvent::Resize, None);
        host::handle(&self.host, PageEvent::Scroll, None);
    }
}
