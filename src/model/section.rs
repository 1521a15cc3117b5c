//! Sections and keep-with-next units.

use super::Block;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// An ordered run of 1-2 blocks that is placed on a single page.
///
/// A two-block unit is a heading followed by the block it introduces. Units
/// index into their section's block list rather than owning blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    start: usize,
    len: usize,
}

impl Unit {
    /// A unit holding one block.
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            len: 1,
        }
    }

    /// A heading at `index` kept together with the block after it.
    pub fn keep_with_next(index: usize) -> Self {
        Self {
            start: index,
            len: 2,
        }
    }

    /// Block index range within the owning section.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Number of blocks in the unit (1 or 2).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Units are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if this unit pairs a heading with its next block.
    pub fn is_keep_with_next(&self) -> bool {
        self.len == 2
    }
}

/// Blocks between two hard breaks (or document start/end).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// 0-indexed position in the document
    pub index: usize,

    /// Blocks in document order
    pub blocks: Vec<Block>,

    /// Keep-with-next units covering `blocks` exactly, in order
    pub units: Vec<Unit>,
}

impl Section {
    /// Blocks belonging to a unit of this section.
    pub fn unit_blocks(&self, unit: Unit) -> &[Block] {
        &self.blocks[unit.range()]
    }

    /// Number of blocks in the section.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the section holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count of headings in the section.
    pub fn heading_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_heading()).count()
    }
}
