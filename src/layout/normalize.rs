//! Content normalization run before every pass.
//!
//! Bare top-level text becomes a paragraph, and every heading (at any depth)
//! gets its canonical final text written back into itself. The canonical
//! string is remembered in the `data-title` attribute, so a heading caught
//! mid-animation on a later pass is restored rather than re-captured.

use crate::model::{ContentNode, Element, TITLE_ATTR};
use unicode_normalization::UnicodeNormalization;

/// Counts of what a normalization run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Bare text runs wrapped in a paragraph
    pub wrapped_text: usize,

    /// Whitespace-only bare text runs removed
    pub dropped_whitespace: usize,

    /// Headings whose displayed text was rewritten
    pub headings_rewritten: usize,
}

impl NormalizeStats {
    /// Check if the run changed nothing.
    pub fn is_clean(&self) -> bool {
        self.wrapped_text == 0 && self.dropped_whitespace == 0 && self.headings_rewritten == 0
    }
}

/// Normalize a top-level node list in place.
///
/// Idempotent: a second run over the output changes nothing.
pub fn normalize(nodes: &mut Vec<ContentNode>) -> NormalizeStats {
    let mut stats = NormalizeStats::default();

    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        match node {
            ContentNode::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    stats.dropped_whitespace += 1;
                } else {
                    stats.wrapped_text += 1;
                    out.push(ContentNode::paragraph(trimmed));
                }
            }
            ContentNode::Element(mut el) => {
                normalize_headings(&mut el, &mut stats);
                out.push(ContentNode::Element(el));
            }
        }
    }
    *nodes = out;

    if !stats.is_clean() {
        log::debug!(
            "Normalized content: {} text runs wrapped, {} blank runs dropped, {} headings rewritten",
            stats.wrapped_text,
            stats.dropped_whitespace,
            stats.headings_rewritten
        );
    }
    stats
}

fn normalize_headings(el: &mut Element, stats: &mut NormalizeStats) {
    if el.heading_level().is_some() {
        let canonical = match el.attr(TITLE_ATTR) {
            Some(title) => canonical_text(title),
            None => canonical_text(&el.text_content()),
        };
        if el.attr(TITLE_ATTR) != Some(canonical.as_str()) {
            el.set_attr(TITLE_ATTR, canonical.clone());
        }
        if canonical_text(&el.text_content()) != canonical || has_loose_text(el) {
            el.set_text(canonical);
            stats.headings_rewritten += 1;
        }
        return;
    }

    for child in &mut el.children {
        if let ContentNode::Element(child) = child {
            normalize_headings(child, stats);
        }
    }
}

/// Trimmed, whitespace-collapsed, NFC-normalized text.
pub fn canonical_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .nfc()
        .collect()
}

/// Single text child carrying whitespace the canonical form drops.
fn has_loose_text(el: &Element) -> bool {
    match el.children.as_slice() {
        [ContentNode::Text(text)] => text.trim() != text || text.contains("  "),
        _ => false,
    }
}
