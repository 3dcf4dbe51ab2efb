//! Shared fixtures for the behavior unit tests.

use pagewright_traits::{Dom, InMemoryDom, NodeId};

/// The standard article page with simulated layout.
///
/// Header: 0..60. Content wrapper starts at 200. Headings at 300, 900 and
/// 1500. Fade-in sections at 2500 and 4000. Viewport is 1280x800.
pub struct Page {
    pub dom: InMemoryDom,
    pub header: NodeId,
    pub wrapper: NodeId,
    pub article: NodeId,
    pub headings: Vec<NodeId>,
    pub toc_list: NodeId,
    pub toggle: NodeId,
    pub icon: NodeId,
    pub sidebar: NodeId,
    pub gallery: Vec<NodeId>,
    pub lightbox: NodeId,
    pub lightbox_image: NodeId,
    pub lightbox_close: NodeId,
    pub fade_in: Vec<NodeId>,
    pub glossary_header: NodeId,
    pub glossary_content: NodeId,
    pub back_to_top: NodeId,
}

pub fn standard_page() -> Page {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut dom = InMemoryDom::new();
    let body = dom.body().unwrap();

    let header = dom.append(body, "header#main-header").unwrap();
    dom.set_layout(header, 0.0, 60.0);

    let wrapper = dom.append(body, "div.main-content-wrapper").unwrap();
    dom.set_layout(wrapper, 200.0, 5000.0);

    let toggle = dom.append(wrapper, "button#toc-toggle-button").unwrap();
    let icon = dom.append(toggle, "i.fa.fa-bars").unwrap();
    let sidebar = dom.append(wrapper, "aside#toc-sidebar").unwrap();
    let toc_list = dom.append(sidebar, "ul#toc-list").unwrap();

    let main = dom.append(wrapper, "main").unwrap();
    let article = dom.append(main, "article").unwrap();

    let mut headings = Vec::new();
    for (spec, text, top, height) in [
        ("h1", "Introduction", 300.0, 40.0),
        ("h2", "Background", 900.0, 30.0),
        ("h3", "Key Terms", 1500.0, 25.0),
    ] {
        let h = dom.append_text(article, spec, text).unwrap();
        dom.set_layout(h, top, height);
        dom.append_text(article, "p", "Body text.").unwrap();
        headings.push(h);
    }

    let mut gallery = Vec::new();
    for (src, alt) in [("images/a.jpg", "First"), ("images/b.jpg", "Second")] {
        let item = dom.append(article, "figure.gallery-item").unwrap();
        let img = dom.append(item, "img").unwrap();
        dom.set_attribute(&img, "src", src).unwrap();
        dom.set_attribute(&img, "alt", alt).unwrap();
        gallery.push(img);
    }

    let mut fade_in = Vec::new();
    for top in [2500.0, 4000.0] {
        let section = dom.append(article, "section.fade-in-section").unwrap();
        dom.set_layout(section, top, 400.0);
        fade_in.push(section);
    }

    let glossary_header = dom.append_text(article, "div.glossary-header", "Slug").unwrap();
    let glossary_content = dom
        .append_text(article, "div.glossary-content", "A fragment-safe identifier.")
        .unwrap();
    dom.set_scroll_height(glossary_content, 120.0);

    let lightbox = dom.append(body, "div#article-lightbox").unwrap();
    let lightbox_close = dom.append_text(lightbox, "span.lightbox-close", "x").unwrap();
    let lightbox_image = dom.append(lightbox, "img").unwrap();

    let back_to_top = dom.append(body, "button#back-to-top").unwrap();

    Page {
        dom,
        header,
        wrapper,
        article,
        headings,
        toc_list,
        toggle,
        icon,
        sidebar,
        gallery,
        lightbox,
        lightbox_image,
        lightbox_close,
        fade_in,
        glossary_header,
        glossary_content,
        back_to_top,
    }
}
