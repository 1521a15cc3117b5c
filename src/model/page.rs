//! Page-level types produced by a pagination pass.

use super::{Block, ViewportBudget};
use serde::{Deserialize, Serialize};

/// One screen-height-bounded sheet of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-indexed)
    pub index: usize,

    /// Blocks on the page, in document order
    pub blocks: Vec<Block>,

    /// Measured height at scale 1.0 when the page was packed
    pub height: f32,

    /// Uniform shrink factor applied to the page content (1.0 = none)
    pub scale: f32,

    /// Painted height at `scale`, as last measured by the fitter
    pub painted_height: f32,

    /// Set when the page holds a single unit taller than the budget
    pub oversized: bool,
}

impl Page {
    /// Create a packed page at scale 1.0.
    pub fn new(index: usize, blocks: Vec<Block>, height: f32) -> Self {
        Self {
            index,
            blocks,
            height,
            scale: 1.0,
            painted_height: height,
            oversized: false,
        }
    }

    /// Mark this page as produced by the oversized-unit escape hatch.
    pub fn into_oversized(mut self) -> Self {
        self.oversized = true;
        self
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if a shrink is applied.
    pub fn is_scaled(&self) -> bool {
        self.scale < 1.0
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The ordered page list of one pass, with the geometry it was built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Pages in reading order
    pub pages: Vec<Page>,

    /// Height budget the pages were packed against
    pub budget: ViewportBudget,

    /// Column width used for every measurement
    pub column_width: f32,
}

impl Book {
    /// Create an empty book for the given geometry.
    pub fn new(budget: ViewportBudget, column_width: f32) -> Self {
        Self {
            pages: Vec::new(),
            budget,
            column_width,
        }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the book has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page by index (0-indexed).
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All blocks of all pages, concatenated in order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|page| page.blocks.iter())
    }

    /// Per-page scale factors.
    pub fn scales(&self) -> Vec<f32> {
        self.pages.iter().map(|page| page.scale).collect()
    }

    /// Pages produced by the oversized-unit escape hatch.
    pub fn oversized_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|page| page.oversized)
    }
}

/// What the host should display after a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Presentation {
    /// Phone layout: discrete pages
    Paged(Book),

    /// Wide layout: the scrolling column, unmodified
    Continuous,
}

impl Presentation {
    /// Get the book when paginated.
    pub fn book(&self) -> Option<&Book> {
        match self {
            Presentation::Paged(book) => Some(book),
            Presentation::Continuous => None,
        }
    }

    /// Check if pagination is engaged.
    pub fn is_paged(&self) -> bool {
        matches!(self, Presentation::Paged(_))
    }
}
