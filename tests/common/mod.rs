pub mod fixtures;
pub mod page_assertions;

pub use fixtures::{ArticlePage, PageBuilder};

use pagewright::{EnhanceError, Enhancer, EnhancerConfig, InMemoryDom, PageEvent};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Installs the enhancer on `page` with the default configuration
pub fn enhance(page: &mut ArticlePage) -> Result<Enhancer<InMemoryDom>, EnhanceError> {
    enhance_with(page, EnhancerConfig::default())
}

/// Installs the enhancer on `page` with a custom configuration
pub fn enhance_with(
    page: &mut ArticlePage,
    config: EnhancerConfig,
) -> Result<Enhancer<InMemoryDom>, EnhanceError> {
    init_logging();
    Enhancer::install(&mut page.dom, config)
}

/// Scrolls the window and runs what a browser would: scroll listeners, then
/// visibility observations.
pub fn scroll_to(enhancer: &mut Enhancer<InMemoryDom>, page: &mut ArticlePage, y: f64) {
    page.dom.set_scroll_y(y);
    enhancer.dispatch(&mut page.dom, &PageEvent::Scroll);
    enhancer.poll_observations(&mut page.dom);
}
