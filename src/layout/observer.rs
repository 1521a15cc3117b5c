//! Observer hooks for pagination passes.
//!
//! Observers let a host react to packing and fitting decisions without
//! changing them, most notably the oversized-unit escape hatch, which the
//! engine otherwise only logs.
//!
//! # Example
//!
//! ```
//! use unscroll::layout::{OversizedUnit, PassObserver};
//!
//! struct Warn;
//!
//! impl PassObserver for Warn {
//!     fn on_oversized_unit(&mut self, report: &OversizedUnit) {
//!         eprintln!("page {} overflows by {}px", report.page_index, report.overflow());
//!     }
//! }
//! ```

use super::FitOutcome;
use crate::model::Page;

/// A unit that did not fit an empty page and was placed alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OversizedUnit {
    /// Section the unit belongs to
    pub section_index: usize,

    /// Position of the unit within its section
    pub unit_index: usize,

    /// Index of the page the unit was placed on
    pub page_index: usize,

    /// Measured unit height
    pub height: f32,

    /// Height budget it was packed against
    pub budget: f32,
}

impl OversizedUnit {
    /// Pixels by which the unit exceeds the budget.
    pub fn overflow(&self) -> f32 {
        (self.height - self.budget).max(0.0)
    }
}

/// Callbacks fired during a pagination pass. All methods default to no-ops.
pub trait PassObserver {
    /// Called when a unit is placed alone on a page that exceeds the budget.
    fn on_oversized_unit(&mut self, report: &OversizedUnit) {
        let _ = report;
    }

    /// Called after each page is closed by the packer.
    fn on_page_packed(&mut self, page: &Page) {
        let _ = page;
    }

    /// Called after the fitter settles a page's scale.
    fn on_page_fitted(&mut self, page_index: usize, outcome: &FitOutcome) {
        let _ = (page_index, outcome);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PassObserver for NoopObserver {}

/// Observer that records escape-hatch pages and pages left overflowing.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    /// Oversized units reported, in order
    pub oversized: Vec<OversizedUnit>,

    /// Pages that still overflow at the minimum scale
    pub unfitted: Vec<usize>,

    /// Pages closed by the packer
    pub packed: usize,
}

impl CollectingObserver {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassObserver for CollectingObserver {
    fn on_oversized_unit(&mut self, report: &OversizedUnit) {
        self.oversized.push(*report);
    }

    fn on_page_packed(&mut self, _page: &Page) {
        self.packed += 1;
    }

    fn on_page_fitted(&mut self, page_index: usize, outcome: &FitOutcome) {
        if !outcome.fits {
            self.unfitted.push(page_index);
        }
    }
}

/// Observer that forwards every event to several observers in order.
pub struct CompositeObserver<'a> {
    observers: Vec<&'a mut dyn PassObserver>,
}

impl<'a> CompositeObserver<'a> {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer to the chain.
    pub fn with_observer(mut self, observer: &'a mut dyn PassObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl Default for CompositeObserver<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PassObserver for CompositeObserver<'_> {
    fn on_oversized_unit(&mut self, report: &OversizedUnit) {
        for observer in &mut self.observers {
            observer.on_oversized_unit(report);
        }
    }

    fn on_page_packed(&mut self, page: &Page) {
        for observer in &mut self.observers {
            observer.on_page_packed(page);
        }
    }

    fn on_page_fitted(&mut self, page_index: usize, outcome: &FitOutcome) {
        for observer in &mut self.observers {
            observer.on_page_fitted(page_index, outcome);
        }
    }
}
