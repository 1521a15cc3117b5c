//! Content model types for pagination.
//!
//! Content nodes come from the host document and are treated as borrowed
//! input. Blocks, units, sections, and pages are rebuilt from scratch on
//! every pagination pass; nothing here is patched incrementally.

mod block;
mod document;
mod node;
mod page;
mod section;
mod viewport;

pub use block::{Block, BlockKind};
pub use document::Document;
pub use node::{ContentNode, Element, TITLE_ATTR};
pub use page::{Book, Page, Presentation};
pub use section::{Section, Unit};
pub use viewport::{Viewport, ViewportBudget};
