//! Block classification and keep-with-next grouping.

use crate::model::{Block, BlockKind, ContentNode, Element, Section, Unit};

/// Classify every node of one section into blocks, then build its units.
pub fn group_section(index: usize, nodes: &[ContentNode]) -> Section {
    let blocks: Vec<Block> = nodes.iter().filter_map(classify).collect();
    let units = build_units(&blocks);
    Section {
        index,
        blocks,
        units,
    }
}

/// Map one node to its display block.
///
/// Block-capable elements map by tag. Text runs and inline or unknown
/// elements are wrapped in a synthetic paragraph. Blank text and stray hard
/// breaks produce no block.
pub fn classify(node: &ContentNode) -> Option<Block> {
    match node {
        ContentNode::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(Block::paragraph(text))
            }
        }
        ContentNode::Element(el) if el.tag_is("hr") => None,
        ContentNode::Element(el) => match BlockKind::from_tag(&el.tag) {
            Some(kind) => Some(Block::new(kind, node.clone())),
            None => {
                let wrapper = Element::new("p").with_child(node.clone());
                Some(Block::new(BlockKind::Paragraph, wrapper.into()))
            }
        },
    }
}

/// Pair each heading with the block that follows it.
///
/// A heading that ends the list has no partner and becomes a lone unit.
pub fn build_units(blocks: &[Block]) -> Vec<Unit> {
    let mut units = Vec::with_capacity(blocks.len());
    let mut i = 0;
    while i < blocks.len() {
        if blocks[i].is_heading() && i + 1 < blocks.len() {
            units.push(Unit::keep_with_next(i));
            i += 2;
        } else {
            units.push(Unit::single(i));
            i += 1;
        }
    }
    units
}
