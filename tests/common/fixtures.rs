use pagewright::{Dom, InMemoryDom, NodeId};

/// Top of the first heading; later headings follow every `HEADING_SPACING` px.
pub const FIRST_HEADING_TOP: f64 = 300.0;
pub const HEADING_SPACING: f64 = 600.0;
pub const HEADER_HEIGHT: f64 = 60.0;
pub const WRAPPER_TOP: f64 = 200.0;

/// An article page built from a `PageBuilder`, with handles to the parts
/// tests poke at.
pub struct ArticlePage {
    pub dom: InMemoryDom,
    pub header: Option<NodeId>,
    pub article: NodeId,
    pub headings: Vec<NodeId>,
    pub toc_list: Option<NodeId>,
    pub toggle: Option<NodeId>,
    pub icon: Option<NodeId>,
    pub sidebar: Option<NodeId>,
    pub gallery: Vec<NodeId>,
    pub lightbox: Option<NodeId>,
    pub lightbox_image: Option<NodeId>,
    pub lightbox_close: Option<NodeId>,
    pub fade_in: Vec<NodeId>,
    /// `(header, panel)` pairs.
    pub glossary: Vec<(NodeId, NodeId)>,
    pub back_to_top: Option<NodeId>,
}

pub struct PageBuilder {
    headings: Vec<(&'static str, String, Option<String>)>,
    header: bool,
    toc_list: bool,
    toggle: bool,
    lightbox: bool,
    lightbox_close: bool,
    gallery: Vec<(String, String)>,
    fade_in: usize,
    glossary: Vec<String>,
    back_to_top: bool,
}

impl PageBuilder {
    /// A page with every collaborator present and no content.
    pub fn new() -> Self {
        Self {
            headings: Vec::new(),
            header: true,
            toc_list: true,
            toggle: true,
            lightbox: true,
            lightbox_close: true,
            gallery: Vec::new(),
            fade_in: 0,
            glossary: Vec::new(),
            back_to_top: true,
        }
    }

    /// The three-heading article used throughout the tests, plus a gallery,
    /// two fade-in sections and a glossary entry.
    pub fn standard() -> Self {
        Self::new()
            .heading("h1", "Introduction")
            .heading("h2", "Background")
            .heading("h3", "Key Terms")
            .gallery_image("images/diagram.png", "Architecture diagram")
            .gallery_image("images/photo.jpg", "Team photo")
            .fade_in_sections(2)
            .glossary_entry("Slug")
    }

    pub fn heading(mut self, tag: &'static str, text: &str) -> Self {
        self.headings.push((tag, text.to_string(), None));
        self
    }

    pub fn heading_with_id(mut self, tag: &'static str, text: &str, id: &str) -> Self {
        self.headings
            .push((tag, text.to_string(), Some(id.to_string())));
        self
    }

    pub fn gallery_image(mut self, src: &str, alt: &str) -> Self {
        self.gallery.push((src.to_string(), alt.to_string()));
        self
    }

    pub fn fade_in_sections(mut self, count: usize) -> Self {
        self.fade_in = count;
        self
    }

    pub fn glossary_entry(mut self, term: &str) -> Self {
        self.glossary.push(term.to_string());
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    pub fn without_toc_list(mut self) -> Self {
        self.toc_list = false;
        self
    }

    pub fn without_toggle(mut self) -> Self {
        self.toggle = false;
        self
    }

    pub fn without_lightbox(mut self) -> Self {
        self.lightbox = false;
        self
    }

    pub fn without_lightbox_close(mut self) -> Self {
        self.lightbox_close = false;
        self
    }

    pub fn without_back_to_top(mut self) -> Self {
        self.back_to_top = false;
        self
    }

    pub fn build(self) -> ArticlePage {
        let mut dom = InMemoryDom::new();
        let body = dom.body().unwrap();

        let header = self.header.then(|| {
            let header = dom.append(body, "header#main-header").unwrap();
            dom.set_layout(header, 0.0, HEADER_HEIGHT);
            header
        });

        let wrapper = dom.append(body, "div.main-content-wrapper").unwrap();
        dom.set_layout(wrapper, WRAPPER_TOP, 10_000.0);

        let (toggle, icon) = if self.toggle {
            let toggle = dom.append(wrapper, "button#toc-toggle-button").unwrap();
            let icon = dom.append(toggle, "i.fa.fa-bars").unwrap();
            (Some(toggle), Some(icon))
        } else {
            (None, None)
        };
        let sidebar = dom.append(wrapper, "aside#toc-sidebar").unwrap();
        let toc_list = self
            .toc_list
            .then(|| dom.append(sidebar, "ul#toc-list").unwrap());

        let main = dom.append(wrapper, "main").unwrap();
        let article = dom.append(main, "article").unwrap();

        let mut headings = Vec::new();
        for (i, (tag, text, id)) in self.headings.iter().enumerate() {
            let heading = dom.append_text(article, tag, text).unwrap();
            if let Some(id) = id {
                dom.set_id(&heading, id);
            }
            dom.set_layout(heading, FIRST_HEADING_TOP + HEADING_SPACING * i as f64, 30.0);
            dom.append_text(article, "p", "Body text.").unwrap();
            headings.push(heading);
        }

        let mut gallery = Vec::new();
        for (src, alt) in &self.gallery {
            let figure = dom.append(article, "figure.gallery-item").unwrap();
            let img = dom.append(figure, "img").unwrap();
            dom.set_attribute(&img, "src", src).unwrap();
            dom.set_attribute(&img, "alt", alt).unwrap();
            gallery.push(img);
        }

        let mut fade_in = Vec::new();
        for i in 0..self.fade_in {
            let section = dom.append(article, "section.fade-in-section").unwrap();
            dom.set_layout(section, 3000.0 + 1200.0 * i as f64, 400.0);
            fade_in.push(section);
        }

        let mut glossary = Vec::new();
        for (i, term) in self.glossary.iter().enumerate() {
            let header = dom.append_text(article, "div.glossary-header", term).unwrap();
            let panel = dom
                .append_text(article, "div.glossary-content", "Definition.")
                .unwrap();
            dom.set_scroll_height(panel, 80.0 + 40.0 * i as f64);
            glossary.push((header, panel));
        }

        let (lightbox, lightbox_image, lightbox_close) = if self.lightbox {
            let overlay = dom.append(body, "div#article-lightbox").unwrap();
            let close = self
                .lightbox_close
                .then(|| dom.append_text(overlay, "span.lightbox-close", "x").unwrap());
            let image = dom.append(overlay, "img").unwrap();
            (Some(overlay), Some(image), close)
        } else {
            (None, None, None)
        };

        let back_to_top = self
            .back_to_top
            .then(|| dom.append(body, "button#back-to-top").unwrap());

        ArticlePage {
            dom,
            header,
            article,
            headings,
            toc_list,
            toggle,
            icon,
            sidebar: Some(sidebar),
            gallery,
            lightbox,
            lightbox_image,
            lightbox_close,
            fade_in,
            glossary,
            back_to_top,
        }
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
