//! Measurement oracle and the per-pass scratch sheet.
//!
//! Rendered height is the only trusted size. The packer and fitter never
//! estimate or cache heights; every decision asks the oracle to lay out the
//! candidate blocks at the real column width and read back the result.

use crate::model::Block;

/// Source of truth for rendered block heights.
///
/// Implementations render the given blocks off-screen in a container exactly
/// `width` wide and report the resulting height. Calls must not affect the
/// live page and must leave the scratch surface cleared afterwards.
pub trait MeasurementOracle {
    /// Rendered height of `blocks` stacked in a `width`-wide column.
    fn measure(&mut self, blocks: &[&Block], width: f32) -> f32;

    /// Painted height of `blocks` with a uniform `scale` applied.
    ///
    /// Each call resets any previous scale, applies `scale`, and measures, so
    /// repeated calls with the same arguments return the same value. The
    /// default models a zoom: content lays out at `width / scale` virtual
    /// pixels and is painted at `scale`, which is why height does not shrink
    /// linearly.
    fn measure_at_scale(&mut self, blocks: &[&Block], width: f32, scale: f32) -> f32 {
        if scale >= 1.0 {
            return self.measure(blocks, width);
        }
        let scale = scale.max(f32::EPSILON);
        self.measure(blocks, width / scale) * scale
    }
}

impl<T: MeasurementOracle + ?Sized> MeasurementOracle for &mut T {
    fn measure(&mut self, blocks: &[&Block], width: f32) -> f32 {
        (**self).measure(blocks, width)
    }

    fn measure_at_scale(&mut self, blocks: &[&Block], width: f32, scale: f32) -> f32 {
        (**self).measure_at_scale(blocks, width, scale)
    }
}

impl<T: MeasurementOracle + ?Sized> MeasurementOracle for Box<T> {
    fn measure(&mut self, blocks: &[&Block], width: f32) -> f32 {
        (**self).measure(blocks, width)
    }

    fn measure_at_scale(&mut self, blocks: &[&Block], width: f32, scale: f32) -> f32 {
        (**self).measure_at_scale(blocks, width, scale)
    }
}

/// Width-pinned measurement surface owned by one pagination pass.
///
/// Created when a pass starts and dropped when it ends; nothing measured
/// survives into the next pass.
pub struct ScratchSheet<'o, O: MeasurementOracle + ?Sized> {
    oracle: &'o mut O,
    width: f32,
    measurements: usize,
}

impl<'o, O: MeasurementOracle + ?Sized> ScratchSheet<'o, O> {
    /// Create a scratch sheet at the live column width (at least 1 px).
    pub fn new(oracle: &'o mut O, column_width: f32) -> Self {
        let width = if column_width.is_finite() {
            column_width.max(1.0)
        } else {
            1.0
        };
        Self {
            oracle,
            width,
            measurements: 0,
        }
    }

    /// Column width every measurement uses.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Number of oracle queries made so far.
    pub fn measurements(&self) -> usize {
        self.measurements
    }

    /// Height of `blocks` at scale 1.0. Empty input is zero.
    pub fn measure(&mut self, blocks: &[&Block]) -> f32 {
        if blocks.is_empty() {
            return 0.0;
        }
        self.measurements += 1;
        sanitize(self.oracle.measure(blocks, self.width))
    }

    /// Painted height of `blocks` at `scale`. Empty input is zero.
    pub fn measure_at_scale(&mut self, blocks: &[&Block], scale: f32) -> f32 {
        if blocks.is_empty() {
            return 0.0;
        }
        self.measurements += 1;
        sanitize(self.oracle.measure_at_scale(blocks, self.width, scale))
    }
}

impl<O: MeasurementOracle + ?Sized> Drop for ScratchSheet<'_, O> {
    fn drop(&mut self) {
        log::debug!(
            "Scratch sheet ({}px) released after {} measurements",
            self.width,
            self.measurements
        );
    }
}

fn sanitize(height: f32) -> f32 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}
