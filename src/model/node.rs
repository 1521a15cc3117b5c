//! Content node tree supplied by the host document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute holding a heading's canonical, final text.
pub const TITLE_ATTR: &str = "data-title";

/// One piece of markup: a bare text run or an element.
///
/// Serialized untagged, so a JSON string is a text node and a JSON object
/// with a `tag` is an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    /// A bare text run
    Text(String),

    /// An element with attributes and children
    Element(Element),
}

impl ContentNode {
    /// Create a bare text node.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    /// Create an empty element node.
    pub fn element(tag: impl Into<String>) -> Self {
        ContentNode::Element(Element::new(tag))
    }

    /// Create a `p` element holding plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentNode::Element(Element::new("p").with_text(text))
    }

    /// Create an `h1`..`h6` element holding plain text.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let level = level.clamp(1, 6);
        ContentNode::Element(Element::new(format!("h{}", level)).with_text(text))
    }

    /// Create a `pre` code block.
    pub fn code(source: impl Into<String>) -> Self {
        ContentNode::Element(Element::new("pre").with_text(source))
    }

    /// Create a `blockquote` holding plain text.
    pub fn quote(text: impl Into<String>) -> Self {
        ContentNode::Element(Element::new("blockquote").with_text(text))
    }

    /// Create an unordered list with one `li` per item.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ul = Element::new("ul");
        for item in items {
            ul.children
                .push(ContentNode::Element(Element::new("li").with_text(item)));
        }
        ContentNode::Element(ul)
    }

    /// Create an `img` element with intrinsic dimensions.
    pub fn image(src: impl Into<String>, width: u32, height: u32) -> Self {
        ContentNode::Element(
            Element::new("img")
                .with_attr("src", src)
                .with_attr("width", width.to_string())
                .with_attr("height", height.to_string()),
        )
    }

    /// Create the `hr` hard-break marker.
    pub fn hard_break() -> Self {
        ContentNode::element("hr")
    }

    /// Get the element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ContentNode::Element(el) => Some(el),
            ContentNode::Text(_) => None,
        }
    }

    /// Get the element mutably, if this is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            ContentNode::Element(el) => Some(el),
            ContentNode::Text(_) => None,
        }
    }

    /// Check if this is a bare text run.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentNode::Text(_))
    }

    /// Check if this node is the section hard-break marker.
    pub fn is_hard_break(&self) -> bool {
        self.as_element().is_some_and(|el| el.tag_is("hr"))
    }

    /// Heading level (1-6) if this is a heading element.
    pub fn heading_level(&self) -> Option<u8> {
        self.as_element().and_then(Element::heading_level)
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for ContentNode {
    fn from(el: Element) -> Self {
        ContentNode::Element(el)
    }
}

/// A markup element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (compared case-insensitively)
    pub tag: String,

    /// Attributes in stable order
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl Element {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: impl Into<ContentNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ContentNode::Text(text.into()));
        self
    }

    /// Case-insensitive tag comparison.
    pub fn tag_is(&self, name: &str) -> bool {
        self.tag.eq_ignore_ascii_case(name)
    }

    /// Heading level (1-6) for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let bytes = self.tag.as_bytes();
        match bytes {
            [h, d] if h.eq_ignore_ascii_case(&b'h') && (b'1'..=b'6').contains(d) => {
                Some(d - b'0')
            }
            _ => None,
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Parse a numeric attribute such as `width="640"` or `height="480px"`.
    pub fn numeric_attr(&self, name: &str) -> Option<f32> {
        let raw = self.attr(name)?.trim();
        let raw = raw.strip_suffix("px").unwrap_or(raw);
        raw.parse::<f32>().ok().filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Replace all children with a single text run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(ContentNode::Text(text.into()));
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        self.children.iter().map(ContentNode::text_content).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(ContentNode::heading(2, "Intro").heading_level(), Some(2));
        assert_eq!(ContentNode::heading(9, "Deep").heading_level(), Some(6));
        assert_eq!(ContentNode::paragraph("x").heading_level(), None);
        assert_eq!(Element::new("H3").heading_level(), Some(3));
        assert_eq!(Element::new("hr").heading_level(), None);
        assert_eq!(Element::new("h7").heading_level(), None);
    }

    #[test]
    fn test_text_content_nested() {
        let node: ContentNode = Element::new("p")
            .with_text("Hello ")
            .with_child(Element::new("em").with_text("world"))
            .with_text("!")
            .into();
        assert_eq!(node.text_content(), "Hello world!");
    }

    #[test]
    fn test_hard_break() {
        assert!(ContentNode::hard_break().is_hard_break());
        assert!(ContentNode::element("HR").is_hard_break());
        assert!(!ContentNode::text("hr").is_hard_break());
    }

    #[test]
    fn test_numeric_attr() {
        let img = Element::new("img")
            .with_attr("width", "640px")
            .with_attr("height", "abc");
        assert_eq!(img.numeric_attr("width"), Some(640.0));
        assert_eq!(img.numeric_attr("height"), None);
        assert_eq!(img.numeric_attr("alt"), None);
    }

    #[test]
    fn test_untagged_json() {
        let json = r#"["bare text", {"tag": "p", "children": ["para"]}]"#;
        let nodes: Vec<ContentNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0], ContentNode::text("bare text"));
        assert_eq!(nodes[1], ContentNode::paragraph("para"));
    }
}
