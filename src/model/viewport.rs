//! Viewport geometry and the derived content height budget.

use serde::{Deserialize, Serialize};

/// Live viewport geometry reported by the host.
///
/// `chrome_bottom` is the bottom edge of the fixed header chrome. It is a
/// required value: a host without chrome reports `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Visible viewport width in CSS px
    pub width: f32,

    /// Visible viewport height in CSS px (visual viewport when available)
    pub height: f32,

    /// Bottom offset of the fixed chrome element in CSS px
    pub chrome_bottom: f32,
}

impl Viewport {
    /// Create a viewport description.
    pub fn new(width: f32, height: f32, chrome_bottom: f32) -> Self {
        debug_assert!(
            width.is_finite() && height.is_finite() && chrome_bottom.is_finite(),
            "viewport geometry must be finite"
        );
        Self {
            width,
            height,
            chrome_bottom,
        }
    }

    /// Check if this viewport uses the paged phone layout.
    pub fn is_phone(&self, phone_max_width: f32) -> bool {
        self.width <= phone_max_width
    }
}

/// Maximum content height available below fixed chrome.
///
/// Recomputed on every pass, never cached across reflows.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportBudget(f32);

impl ViewportBudget {
    /// Wrap a raw height. Non-finite or negative values become zero.
    pub fn new(height: f32) -> Self {
        if height.is_finite() {
            Self(height.max(0.0))
        } else {
            Self(0.0)
        }
    }

    /// Derive the budget: viewport height minus chrome bottom minus padding,
    /// rounded, and never below `min_height`.
    pub fn from_viewport(viewport: &Viewport, padding: f32, min_height: f32) -> Self {
        let raw = (viewport.height - viewport.chrome_bottom - padding).round();
        let raw = if raw.is_finite() { raw } else { 0.0 };
        Self::new(raw.max(min_height))
    }

    /// Budget in CSS px.
    pub fn height(&self) -> f32 {
        self.0
    }

    /// Check whether a measured height fits.
    pub fn fits(&self, height: f32) -> bool {
        height <= self.0
    }
}
