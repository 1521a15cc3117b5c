//! Block-level display units.

use super::ContentNode;
use serde::{Deserialize, Serialize};

/// Kind of an indivisible display block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A paragraph (also used for generic `div` blocks and wrapped inline content)
    Paragraph,
    /// A heading with level 1-6
    Heading(u8),
    /// An ordered or unordered list
    List,
    /// A preformatted code block
    Code,
    /// A block quotation
    Quote,
    /// A figure (image plus caption)
    Figure,
    /// A standalone image
    Image,
    /// A table
    Table,
}

impl BlockKind {
    /// Map a block-capable tag to its kind.
    ///
    /// Returns `None` for inline or unknown tags, which the grouper wraps in
    /// a synthetic paragraph.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        let kind = match tag.as_str() {
            "p" | "div" => BlockKind::Paragraph,
            "h1" => BlockKind::Heading(1),
            "h2" => BlockKind::Heading(2),
            "h3" => BlockKind::Heading(3),
            "h4" => BlockKind::Heading(4),
            "h5" => BlockKind::Heading(5),
            "h6" => BlockKind::Heading(6),
            "ul" | "ol" | "li" => BlockKind::List,
            "pre" => BlockKind::Code,
            "blockquote" => BlockKind::Quote,
            "figure" => BlockKind::Figure,
            "img" => BlockKind::Image,
            "table" => BlockKind::Table,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this is a heading kind.
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading(_))
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading(_) => "heading",
            BlockKind::List => "list",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::Figure => "figure",
            BlockKind::Image => "image",
            BlockKind::Table => "table",
        }
    }
}

/// The atomic display unit: exactly one content node plus its kind.
///
/// A block is never split across two pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind
    pub kind: BlockKind,

    /// The content node rendered for this block
    pub node: ContentNode,
}

impl Block {
    /// Create a block.
    pub fn new(kind: BlockKind, node: ContentNode) -> Self {
        Self { kind, node }
    }

    /// Create a paragraph block with plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, ContentNode::paragraph(text))
    }

    /// Create a heading block with plain text.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let level = level.clamp(1, 6);
        Self::new(BlockKind::Heading(level), ContentNode::heading(level, text))
    }

    /// Create a code block.
    pub fn code(source: impl Into<String>) -> Self {
        Self::new(BlockKind::Code, ContentNode::code(source))
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        self.kind.is_heading()
    }

    /// Heading level (1-6) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    /// Plain text of the block's node.
    pub fn plain_text(&self) -> String {
        self.node.text_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(BlockKind::from_tag("p"), Some(BlockKind::Paragraph));
        assert_eq!(BlockKind::from_tag("DIV"), Some(BlockKind::Paragraph));
        assert_eq!(BlockKind::from_tag("h4"), Some(BlockKind::Heading(4)));
        assert_eq!(BlockKind::from_tag("ol"), Some(BlockKind::List));
        assert_eq!(BlockKind::from_tag("pre"), Some(BlockKind::Code));
        assert_eq!(BlockKind::from_tag("span"), None);
        assert_eq!(BlockKind::from_tag("hr"), None);
    }

    #[test]
    fn test_block_heading() {
        let h = Block::heading(2, "Setup");
        assert!(h.is_heading());
        assert_eq!(h.heading_level(), Some(2));
        assert_eq!(h.plain_text(), "Setup");

        let p = Block::paragraph("body");
        assert!(!p.is_heading());
        assert_eq!(p.kind.label(), "paragraph");
    }
}
