//! WebAssembly bindings for the pagewright page behaviors.
//!
//! This crate runs the platform-agnostic behaviors from `pagewright-core`
//! against the live browser document.
//!
//! ## Module Structure
//!
//! - [`dom`] - `WebDom`, the `web-sys` implementation of the `Dom` trait
//! - [`builder`] - `PageEnhancer` builder and the `EnhancedPage` handle
//! - `host` - listener and `IntersectionObserver` wiring
//! - [`error`] - Error types with JavaScript interop
//!
//! # Example
//!
//! Install explicitly once the module is initialised. With the `autostart`
//! feature the module instead installs itself with the default
//! configuration, and later installs are ignored.
//!
//! ```javascript
//! import init, { PageEnhancer } from '@pagewright/wasm';
//!
//! await init();
//! new PageEnhancer().withConfig({ backToTopThreshold: 600 }).install();
//! ```

pub mod builder;
pub mod dom;
pub mod error;
mod host;

pub use builder::{EnhancedPage, INSTALLED_ATTRIBUTE, PageEnhancer};
pub use dom::WebDom;
pub use error::{ErrorCode, PagewrightError};

use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up the panic hook and, with `console-logging`, the console logger.
/// With `autostart`, also installs the behaviors with the default
/// configuration once the document is ready.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
        log::set_max_level(log::LevelFilter::Info);
    }

    #[cfg(feature = "autostart")]
    {
        if let Err(e) = PageEnhancer::new().install() {
            log::error!("Autostart failed: {:?}", e);
        }
    }
}

/// Get the version of the pagewright-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
