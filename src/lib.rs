//! # unscroll
//!
//! Screen-height pagination and adaptive page scaling for long-form content.
//!
//! On phone-width viewports, a post body is packed into discrete pages no
//! taller than the space below the fixed header, each page shrunk just enough
//! to fit when its content runs over. Heights always come from a
//! [`MeasurementOracle`] that lays content out at the real column width.
//!
//! ## Quick Start
//!
//! ```
//! use unscroll::{ContentNode, Paginator, TextMetrics, Viewport};
//!
//! fn main() -> unscroll::Result<()> {
//!     let mut nodes = vec![
//!         ContentNode::heading(2, "Intro"),
//!         ContentNode::paragraph("The first paragraph."),
//!         ContentNode::hard_break(),
//!         ContentNode::paragraph("A new section."),
//!     ];
//!
//!     let viewport = Viewport::new(390.0, 844.0, 56.0);
//!     let mut metrics = TextMetrics::default();
//!     let presentation = Paginator::new().run(&mut nodes, &mut metrics, &viewport, 358.0)?;
//!
//!     let book = presentation.book().expect("phone viewports are paged");
//!     println!("{} pages", book.page_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block-granular packing**: blocks are never split; headings stay with
//!   the block they introduce
//! - **Adaptive scaling**: per-page binary search for the largest scale that
//!   fits, measured rather than computed
//! - **Reflow controller**: debounced triggers over a request channel and a
//!   bounded per-frame fit chase
//! - **Rendering adapter**: HTML sheet markup and JSON export

pub mod error;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod nav;
pub mod reflow;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    FitOptions, MeasurementOracle, NoopObserver, PaginationOptions, PassObserver, ScratchSheet,
};
pub use metrics::TextMetrics;
pub use model::{
    Block, BlockKind, Book, ContentNode, Document, Element, Page, Presentation, Section, Unit,
    Viewport, ViewportBudget,
};
pub use nav::{NavDirection, PageIndicator, PageNavigator, ScrollTarget};
pub use reflow::{ReflowController, ReflowHandle, ReflowOptions, ReflowTrigger, Surface};
pub use render::{HtmlOptions, JsonFormat, ScaleStyle};

use std::path::Path;

/// Load a JSON document and paginate it with the built-in text metrics.
///
/// # Example
///
/// ```no_run
/// use unscroll::{paginate_file, Viewport};
///
/// let presentation = paginate_file("post.json", &Viewport::new(390.0, 844.0, 56.0), 358.0)?;
/// println!("paged: {}", presentation.is_paged());
/// # Ok::<(), unscroll::Error>(())
/// ```
pub fn paginate_file<P: AsRef<Path>>(
    path: P,
    viewport: &Viewport,
    column_width: f32,
) -> Result<Presentation> {
    let mut document = Document::from_path(path)?;
    let mut metrics = TextMetrics::default();
    Paginator::new().run(&mut document.nodes, &mut metrics, viewport, column_width)
}

/// Builder for one-shot pagination passes.
///
/// # Example
///
/// ```
/// use unscroll::{ContentNode, Paginator, TextMetrics, Viewport};
///
/// let mut nodes = vec![ContentNode::paragraph("Hello")];
/// let presentation = Paginator::new()
///     .with_min_scale(0.75)
///     .with_phone_max_width(600.0)
///     .run(&mut nodes, &mut TextMetrics::default(), &Viewport::new(400.0, 700.0, 0.0), 368.0)?;
/// assert!(presentation.is_paged());
/// # Ok::<(), unscroll::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    options: PaginationOptions,
}

impl Paginator {
    /// Create a paginator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: PaginationOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the minimum scale floor.
    pub fn with_min_scale(mut self, min_scale: f32) -> Self {
        self.options = self.options.with_min_scale(min_scale);
        self
    }

    /// Set the phone width threshold.
    pub fn with_phone_max_width(mut self, width: f32) -> Self {
        self.options = self.options.with_phone_max_width(width);
        self
    }

    /// Set the padding reserved below content.
    pub fn with_chrome_padding(mut self, padding: f32) -> Self {
        self.options = self.options.with_chrome_padding(padding);
        self
    }

    /// Get the options.
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Height budget for a viewport under these options.
    pub fn budget(&self, viewport: &Viewport) -> ViewportBudget {
        ViewportBudget::from_viewport(viewport, self.options.chrome_padding, self.options.min_budget)
    }

    /// Normalize `nodes` in place and paginate them for `viewport`.
    ///
    /// Wide viewports get [`Presentation::Continuous`] and no pass runs.
    pub fn run<O: MeasurementOracle + ?Sized>(
        &self,
        nodes: &mut Vec<ContentNode>,
        oracle: &mut O,
        viewport: &Viewport,
        column_width: f32,
    ) -> Result<Presentation> {
        self.run_with_observer(nodes, oracle, viewport, column_width, &mut NoopObserver)
    }

    /// Like [`run`](Self::run), reporting packing and fitting events.
    pub fn run_with_observer<O: MeasurementOracle + ?Sized>(
        &self,
        nodes: &mut Vec<ContentNode>,
        oracle: &mut O,
        viewport: &Viewport,
        column_width: f32,
        observer: &mut dyn PassObserver,
    ) -> Result<Presentation> {
        self.options.validate()?;
        layout::normalize(nodes);

        if !viewport.is_phone(self.options.phone_max_width) {
            return Ok(Presentation::Continuous);
        }
        let budget = self.budget(viewport);
        Ok(Presentation::Paged(self.paginate(
            nodes,
            oracle,
            column_width,
            budget,
            observer,
        )))
    }

    /// Paginate already-normalized nodes against an explicit budget.
    pub fn paginate<O: MeasurementOracle + ?Sized>(
        &self,
        nodes: &[ContentNode],
        oracle: &mut O,
        column_width: f32,
        budget: ViewportBudget,
        observer: &mut dyn PassObserver,
    ) -> Book {
        layout::paginate(nodes, oracle, column_width, budget, &self.options.fit, observer)
    }
}
