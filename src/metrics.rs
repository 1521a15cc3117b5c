//! Deterministic text-metrics measurement oracle.
//!
//! For hosts without a layout engine (the CLI, tests, benchmarks) this
//! oracle lays blocks out with a fixed-advance font: greedy word wrap at the
//! column width, per-heading-level font scale, non-wrapping code lines, and
//! images scaled down to the column. It is a real layout, so its heights
//! respond to width the way a browser column does, including under zoom.

use crate::layout::MeasurementOracle;
use crate::model::{Block, BlockKind, ContentNode, Element};
use serde::{Deserialize, Serialize};

/// Font and spacing metrics for the built-in layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Advance of one body-text character in px
    pub char_width: f32,

    /// Body line height in px
    pub line_height: f32,

    /// Vertical gap between adjacent blocks in px
    pub block_gap: f32,

    /// Advance of one code character in px
    pub code_char_width: f32,

    /// Code line height in px
    pub code_line_height: f32,

    /// Vertical padding around a code block in px
    pub code_padding: f32,

    /// Horizontal indent of list items and quotes in px
    pub indent: f32,

    /// Height of one table row in px
    pub table_row_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.5,
            line_height: 26.0,
            block_gap: 16.0,
            code_char_width: 7.8,
            code_line_height: 20.0,
            code_padding: 24.0,
            indent: 24.0,
            table_row_height: 34.0,
        }
    }
}

impl TextMetrics {
    /// Create metrics with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set body character advance and line height.
    pub fn with_body(mut self, char_width: f32, line_height: f32) -> Self {
        self.char_width = char_width;
        self.line_height = line_height;
        self
    }

    /// Set the gap between blocks.
    pub fn with_block_gap(mut self, gap: f32) -> Self {
        self.block_gap = gap;
        self
    }

    /// Height of a single block laid out `width` px wide.
    pub fn block_height(&self, block: &Block, width: f32) -> f32 {
        let el = match block.node.as_element() {
            Some(el) => el,
            None => return self.text_height(&block.node.text_content(), width, 1.0),
        };

        match block.kind {
            BlockKind::Heading(level) => {
                self.text_height(&el.text_content(), width, heading_scale(level))
            }
            BlockKind::Code => self.code_height(&el.text_content(), width),
            BlockKind::Quote => self.text_height(&el.text_content(), width - self.indent, 1.0),
            BlockKind::List => self.list_height(el, width),
            BlockKind::Image => self.image_height(el, width),
            BlockKind::Figure => {
                let images: f32 = images_in(el).map(|img| self.image_height(img, width)).sum();
                let caption = caption_text(el);
                images + self.text_height(&caption, width, 0.9)
            }
            BlockKind::Table => {
                let rows = count_tags(el, "tr").max(1);
                rows as f32 * self.table_row_height
            }
            BlockKind::Paragraph => {
                let images: f32 = images_in(el).map(|img| self.image_height(img, width)).sum();
                images + self.text_height(&el.text_content(), width, 1.0)
            }
        }
    }

    fn text_height(&self, text: &str, width: f32, scale: f32) -> f32 {
        let advance = (self.char_width * scale).max(f32::EPSILON);
        let columns = (width.max(1.0) / advance).floor().max(1.0) as usize;
        wrapped_lines(text, columns) as f32 * self.line_height * scale
    }

    fn code_height(&self, source: &str, width: f32) -> f32 {
        // Code does not wrap; overflow scrolls horizontally.
        let _ = width;
        let lines = source.lines().count().max(1);
        lines as f32 * self.code_line_height + self.code_padding
    }

    fn list_height(&self, el: &Element, width: f32) -> f32 {
        let item_width = width - self.indent;
        let items: Vec<&Element> = el
            .children
            .iter()
            .filter_map(ContentNode::as_element)
            .filter(|child| child.tag_is("li"))
            .collect();
        if items.is_empty() {
            return self.text_height(&el.text_content(), item_width, 1.0);
        }
        items
            .iter()
            .map(|li| self.text_height(&li.text_content(), item_width, 1.0))
            .sum()
    }

    fn image_height(&self, el: &Element, width: f32) -> f32 {
        let width = width.max(1.0);
        match (el.numeric_attr("width"), el.numeric_attr("height")) {
            (Some(w), Some(h)) if w > width => h * width / w,
            (_, Some(h)) => h,
            _ => width * 9.0 / 16.0,
        }
    }
}

impl MeasurementOracle for TextMetrics {
    fn measure(&mut self, blocks: &[&Block], width: f32) -> f32 {
        if blocks.is_empty() {
            return 0.0;
        }
        let content: f32 = blocks.iter().map(|b| self.block_height(b, width)).sum();
        content + self.block_gap * (blocks.len() - 1) as f32
    }
}

fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.5,
        3 => 1.25,
        4 => 1.1,
        5 => 1.0,
        _ => 0.9,
    }
}

/// Number of lines greedy word wrap produces at `columns` characters.
fn wrapped_lines(text: &str, columns: usize) -> usize {
    let mut lines = 0;
    let mut used = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used == 0 {
            lines += 1;
        } else if used + 1 + len <= columns {
            used += 1 + len;
            continue;
        } else {
            lines += 1;
        }
        // Words longer than a line break across several.
        let extra = (len.saturating_sub(1)) / columns;
        lines += extra;
        used = len - extra * columns;
    }
    lines
}

fn images_in(el: &Element) -> impl Iterator<Item = &Element> {
    let mut found = Vec::new();
    collect_tags(el, "img", &mut found);
    found.into_iter()
}

fn collect_tags<'a>(el: &'a Element, tag: &str, out: &mut Vec<&'a Element>) {
    if el.tag_is(tag) {
        out.push(el);
    }
    for child in &el.children {
        if let ContentNode::Element(child) = child {
            collect_tags(child, tag, out);
        }
    }
}

fn count_tags(el: &Element, tag: &str) -> usize {
    let mut found = Vec::new();
    collect_tags(el, tag, &mut found);
    found.len()
}

fn caption_text(el: &Element) -> String {
    let mut captions = Vec::new();
    collect_tags(el, "figcaption", &mut captions);
    captions
        .iter()
        .map(|c| c.text_content())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_lines() {
        assert_eq!(wrapped_lines("", 10), 0);
        assert_eq!(wrapped_lines("one", 10), 1);
        assert_eq!(wrapped_lines("one two", 7), 1);
        assert_eq!(wrapped_lines("one two", 6), 2);
        assert_eq!(wrapped_lines("aaaaaaaaaaaa", 5), 3);
        assert_eq!(wrapped_lines("aaaaaaaaaaaa b", 5), 3);
        assert_eq!(wrapped_lines("a b c d", 1), 4);
    }

    #[test]
    fn test_paragraph_height_depends_on_width() {
        let metrics = TextMetrics::default().with_body(10.0, 20.0);
        let block = Block::paragraph("word ".repeat(40));
        let narrow = metrics.block_height(&block, 100.0);
        let wide = metrics.block_height(&block, 400.0);
        assert!(narrow > wide);
        assert_eq!(wide % 20.0, 0.0);
    }

    #[test]
    fn test_code_height_ignores_width() {
        let metrics = TextMetrics::default();
        let block = Block::code("a\nb\nc");
        assert_eq!(metrics.block_height(&block, 100.0), 3.0 * 20.0 + 24.0);
        assert_eq!(metrics.block_height(&block, 900.0), 3.0 * 20.0 + 24.0);
    }

    #[test]
    fn test_image_scales_to_column() {
        let metrics = TextMetrics::default();
        let block = Block::new(BlockKind::Image, ContentNode::image("a.png", 800, 400));
        assert_eq!(metrics.block_height(&block, 400.0), 200.0);
        assert_eq!(metrics.block_height(&block, 1000.0), 400.0);
    }

    #[test]
    fn test_list_items() {
        let metrics = TextMetrics::default().with_body(10.0, 20.0);
        let block = Block::new(BlockKind::List, ContentNode::list(["a", "b", "c"]));
        assert_eq!(metrics.block_height(&block, 300.0), 60.0);
    }

    #[test]
    fn test_measure_adds_gaps() {
        let mut metrics = TextMetrics::default().with_body(10.0, 20.0).with_block_gap(5.0);
        let a = Block::paragraph("a");
        let b = Block::paragraph("b");
        assert_eq!(metrics.measure(&[], 300.0), 0.0);
        assert_eq!(metrics.measure(&[&a], 300.0), 20.0);
        assert_eq!(metrics.measure(&[&a, &b], 300.0), 45.0);
    }

    #[test]
    fn test_zoom_is_nonlinear() {
        let mut metrics = TextMetrics::default().with_body(10.0, 20.0);
        let block = Block::paragraph("word ".repeat(30));
        let full = metrics.measure(&[&block], 200.0);
        let half = metrics.measure_at_scale(&[&block], 200.0, 0.5);
        // Wider virtual column wraps into fewer lines, so shrink is more
        // than proportional.
        assert!(half < full * 0.5);
    }
}
