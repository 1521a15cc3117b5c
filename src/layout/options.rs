//! Pagination and fitting options.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Options for one pagination pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// Widest viewport (CSS px) that still uses the paged phone layout
    pub phone_max_width: f32,

    /// Room reserved below the content for the page indicator
    pub chrome_padding: f32,

    /// Smallest height budget ever handed to the packer
    pub min_budget: f32,

    /// Scale fitting options
    pub fit: FitOptions,
}

impl PaginationOptions {
    /// Create new pagination options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the phone width threshold.
    pub fn with_phone_max_width(mut self, width: f32) -> Self {
        self.phone_max_width = width;
        self
    }

    /// Set the padding reserved below the content.
    pub fn with_chrome_padding(mut self, padding: f32) -> Self {
        self.chrome_padding = padding;
        self
    }

    /// Set the minimum height budget.
    pub fn with_min_budget(mut self, height: f32) -> Self {
        self.min_budget = height;
        self
    }

    /// Set the scale fitting options.
    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    /// Set the minimum scale floor.
    pub fn with_min_scale(mut self, min_scale: f32) -> Self {
        self.fit.min_scale = min_scale;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.phone_max_width.is_finite() && self.phone_max_width >= 0.0) {
            return Err(Error::InvalidOptions(format!(
                "phone_max_width must be a non-negative number, got {}",
                self.phone_max_width
            )));
        }
        if !(self.chrome_padding.is_finite() && self.chrome_padding >= 0.0) {
            return Err(Error::InvalidOptions(format!(
                "chrome_padding must be a non-negative number, got {}",
                self.chrome_padding
            )));
        }
        if !(self.min_budget.is_finite() && self.min_budget >= 0.0) {
            return Err(Error::InvalidOptions(format!(
                "min_budget must be a non-negative number, got {}",
                self.min_budget
            )));
        }
        self.fit.validate()
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            phone_max_width: 560.0,
            chrome_padding: 12.0,
            min_budget: 120.0,
            fit: FitOptions::default(),
        }
    }
}

/// Options for the adaptive scale fitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Lowest scale the fitter will apply; below it content overflows instead
    pub min_scale: f32,

    /// Binary search iterations
    pub iterations: u32,

    /// Optimistic upward step tried after the search
    pub nudge: f32,

    /// Safety margin as a fraction of the available height
    pub margin_pct: f32,

    /// Safety margin in CSS px
    pub margin_px: f32,
}

impl FitOptions {
    /// Create new fit options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum scale floor.
    pub fn with_min_scale(mut self, min_scale: f32) -> Self {
        self.min_scale = min_scale;
        self
    }

    /// Set the number of binary search iterations.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the optimistic nudge.
    pub fn with_nudge(mut self, nudge: f32) -> Self {
        self.nudge = nudge;
        self
    }

    /// Set the safety margins.
    pub fn with_margin(mut self, pct: f32, px: f32) -> Self {
        self.margin_pct = pct;
        self.margin_px = px;
        self
    }

    /// Height a page may paint at, given the available height.
    pub fn limit(&self, available: f32) -> f32 {
        available - self.margin_px - available * self.margin_pct
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0) {
            return Err(Error::InvalidOptions(format!(
                "min_scale must be in (0, 1], got {}",
                self.min_scale
            )));
        }
        if !(self.nudge.is_finite() && self.nudge >= 0.0) {
            return Err(Error::InvalidOptions(format!(
                "nudge must be a non-negative number, got {}",
                self.nudge
            )));
        }
        if !(self.margin_pct >= 0.0 && self.margin_pct < 1.0) {
            return Err(Error::InvalidOptions(format!(
                "margin_pct must be in [0, 1), got {}",
                self.margin_pct
            )));
        }
        if !(self.margin_px.is_finite() && self.margin_px >= 0.0) {
            return Err(Error::InvalidOptions(format!(
                "margin_px must be a non-negative number, got {}",
                self.margin_px
            )));
        }
        Ok(())
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_scale: 0.70,
            iterations: 14,
            nudge: 0.004,
            margin_pct: 0.0,
            margin_px: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_options_builder() {
        let options = PaginationOptions::new()
            .with_phone_max_width(480.0)
            .with_chrome_padding(8.0)
            .with_min_scale(0.75);

        assert_eq!(options.phone_max_width, 480.0);
        assert_eq!(options.chrome_padding, 8.0);
        assert_eq!(options.fit.min_scale, 0.75);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_default_options() {
        let options = PaginationOptions::default();
        assert_eq!(options.phone_max_width, 560.0);
        assert_eq!(options.min_budget, 120.0);
        assert_eq!(options.fit.iterations, 14);
        assert_eq!(options.fit.min_scale, 0.70);
        assert_eq!(options.fit.limit(776.0), 776.0);
    }

    #[test]
    fn test_validate_rejects_bad_min_scale() {
        for bad in [0.0, -0.5, 1.5, f32::NAN] {
            let options = PaginationOptions::new().with_min_scale(bad);
            assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
        }
    }

    #[test]
    fn test_fit_limit() {
        let fit = FitOptions::new().with_margin(0.01, 2.0);
        assert!((fit.limit(1000.0) - 988.0).abs() < 1e-3);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: PaginationOptions =
            serde_json::from_str(r#"{"phone_max_width": 600, "fit": {"min_scale": 0.8}}"#)
                .unwrap();
        assert_eq!(options.phone_max_width, 600.0);
        assert_eq!(options.fit.min_scale, 0.8);
        assert_eq!(options.fit.iterations, 14);
        assert_eq!(options.chrome_padding, 12.0);
    }
}
