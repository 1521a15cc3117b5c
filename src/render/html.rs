//! HTML sheet markup for a paginated book.

use crate::model::{Book, ContentNode, Element, Page};
use crate::nav::PageIndicator;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How a page's shrink factor is expressed in CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleStyle {
    /// `zoom: s`, which also shrinks layout width
    #[default]
    Zoom,
    /// `transform: scale(s)` for engines without `zoom`
    Transform,
}

/// Options for HTML output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// CSS property used to apply page scales
    pub scale_style: ScaleStyle,

    /// Class of the outer page strip
    pub book_class: String,

    /// Class of each page container
    pub sheet_class: String,

    /// Class of the scaled wrapper inside each page
    pub inner_class: String,

    /// Append the page indicator after the book
    pub include_indicator: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            scale_style: ScaleStyle::Zoom,
            book_class: "book".to_string(),
            sheet_class: "sheet".to_string(),
            inner_class: "page-inner".to_string(),
            include_indicator: true,
        }
    }
}

impl HtmlOptions {
    /// Create new HTML options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how scales are applied.
    pub fn with_scale_style(mut self, style: ScaleStyle) -> Self {
        self.scale_style = style;
        self
    }

    /// Include or omit the page indicator.
    pub fn with_indicator(mut self, include: bool) -> Self {
        self.include_indicator = include;
        self
    }
}

/// Render a book as a strip of page containers.
pub fn to_html(book: &Book, options: &HtmlOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div class=\"{}\" data-pages=\"{}\">",
        escape_attr(&options.book_class),
        book.page_count()
    );
    for page in &book.pages {
        write_page(&mut out, page, options);
    }
    out.push_str("</div>\n");

    if options.include_indicator && !book.is_empty() {
        let indicator = PageIndicator {
            index: 0,
            total: book.page_count(),
            label: format!("1 / {}", book.page_count()),
        };
        out.push_str(&indicator_html(&indicator));
    }
    out
}

/// Render the floating page indicator.
pub fn indicator_html(indicator: &PageIndicator) -> String {
    format!(
        "<div class=\"page-num page-num-global\" aria-live=\"polite\">{}</div>\n",
        escape_text(&indicator.label)
    )
}

/// Serialize one content node.
pub fn node_html(node: &ContentNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_page(out: &mut String, page: &Page, options: &HtmlOptions) {
    let mut sheet_class = escape_attr(&options.sheet_class);
    if page.oversized {
        sheet_class.push_str(" oversized");
    }
    let _ = writeln!(
        out,
        "  <section class=\"{}\" data-page=\"{}\">",
        sheet_class,
        page.index + 1
    );

    let _ = write!(
        out,
        "    <div class=\"{}\" data-scale=\"{:.3}\"",
        escape_attr(&options.inner_class),
        page.scale
    );
    if page.is_scaled() {
        let _ = match options.scale_style {
            ScaleStyle::Zoom => write!(out, " style=\"zoom: {:.4}\"", page.scale),
            ScaleStyle::Transform => write!(
                out,
                " style=\"transform: scale({:.4}); transform-origin: top left\"",
                page.scale
            ),
        };
    }
    out.push('>');
    for block in &page.blocks {
        write_node(out, &block.node);
    }
    out.push_str("</div>\n  </section>\n");
}

fn write_node(out: &mut String, node: &ContentNode) {
    match node {
        ContentNode::Text(text) => out.push_str(&escape_text(text)),
        ContentNode::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    out.push('>');
    if is_void(&el.tag) {
        return;
    }
    for child in &el.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", el.tag);
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "track" | "wbr"
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
