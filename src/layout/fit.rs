//! Adaptive per-page scale fitting.
//!
//! A page taller than the available height is shrunk uniformly by the
//! largest scale in `[min_scale, 1]` whose measured painted height fits.
//! Heights are re-measured at every probe because content reflows under
//! shrink. Scales never exceed 1.0.

use super::measure::{MeasurementOracle, ScratchSheet};
use super::FitOptions;
use crate::model::{Block, Page};
use serde::{Deserialize, Serialize};

/// Result of fitting one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    /// Chosen scale factor in `[min_scale, 1]`
    pub scale: f32,

    /// Painted height measured at `scale`
    pub painted_height: f32,

    /// Whether the painted height is within the available height minus margin
    pub fits: bool,
}

/// Binary-search scale fitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleFitter {
    options: FitOptions,
}

impl ScaleFitter {
    /// Create a fitter.
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Fitter options.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Find the largest scale at which `blocks` fit within `available`.
    ///
    /// The returned scale is the last one measured, so a host applying
    /// scales as it measures ends with the chosen scale in place.
    pub fn fit<O: MeasurementOracle + ?Sized>(
        &self,
        sheet: &mut ScratchSheet<'_, O>,
        blocks: &[&Block],
        available: f32,
    ) -> FitOutcome {
        let limit = self.options.limit(available);

        let full = sheet.measure_at_scale(blocks, 1.0);
        if full <= limit {
            return FitOutcome {
                scale: 1.0,
                painted_height: full,
                fits: true,
            };
        }

        let min_scale = self.options.min_scale.clamp(f32::EPSILON, 1.0);
        let mut lo = min_scale;
        let mut hi = 1.0_f32;
        let mut best = lo;
        for _ in 0..self.options.iterations {
            let mid = (lo + hi) / 2.0;
            if sheet.measure_at_scale(blocks, mid) <= limit {
                best = mid;
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let nudged = (best + self.options.nudge).min(1.0);
        let nudged_height = sheet.measure_at_scale(blocks, nudged);
        if nudged_height <= limit {
            return FitOutcome {
                scale: nudged,
                painted_height: nudged_height,
                fits: true,
            };
        }

        let height = sheet.measure_at_scale(blocks, best);
        FitOutcome {
            scale: best,
            painted_height: height,
            fits: height <= limit,
        }
    }

    /// Fit a page in place, updating its scale and painted height.
    pub fn fit_page<O: MeasurementOracle + ?Sized>(
        &self,
        sheet: &mut ScratchSheet<'_, O>,
        page: &mut Page,
        available: f32,
    ) -> FitOutcome {
        let blocks: Vec<&Block> = page.blocks.iter().collect();
        let outcome = self.fit(sheet, &blocks, available);
        page.scale = outcome.scale;
        page.painted_height = outcome.painted_height;

        if !outcome.fits {
            log::warn!(
                "Page {} still paints {}px at scale {:.3}, over {}px available",
                page.index + 1,
                outcome.painted_height,
                outcome.scale,
                available
            );
        }
        outcome
    }
}
