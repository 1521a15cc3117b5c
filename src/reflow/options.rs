//! Reflow controller timing options.

use super::ReflowTrigger;
use crate::error::Result;
use crate::layout::PaginationOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Debounce delays and fit-chase budgets, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowOptions {
    /// Options for each pagination pass
    pub pagination: PaginationOptions,

    /// Debounce for readiness and load triggers
    pub repack_debounce_ms: u64,

    /// Debounce for resize and orientation triggers
    pub resize_debounce_ms: u64,

    /// Debounce for viewport scroll, page show and mutation triggers
    pub settle_debounce_ms: u64,

    /// Default chase budget after a pass
    pub chase_ms: u64,

    /// Chase budget after an orientation change
    pub orientation_chase_ms: u64,

    /// Chase budget after fonts or images become ready
    pub readiness_chase_ms: u64,
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            pagination: PaginationOptions::default(),
            repack_debounce_ms: 150,
            resize_debounce_ms: 200,
            settle_debounce_ms: 50,
            chase_ms: 900,
            orientation_chase_ms: 1200,
            readiness_chase_ms: 600,
        }
    }
}

impl ReflowOptions {
    /// Create new reflow options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pagination options.
    pub fn with_pagination(mut self, pagination: PaginationOptions) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set every debounce delay to `ms`.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.repack_debounce_ms = ms;
        self.resize_debounce_ms = ms;
        self.settle_debounce_ms = ms;
        self
    }

    /// Set every chase budget to `ms`.
    pub fn with_chase_ms(mut self, ms: u64) -> Self {
        self.chase_ms = ms;
        self.orientation_chase_ms = ms;
        self.readiness_chase_ms = ms;
        self
    }

    /// Debounce delay applied to `trigger`.
    pub fn debounce_for(&self, trigger: ReflowTrigger) -> Duration {
        let ms = match trigger {
            ReflowTrigger::Resize | ReflowTrigger::OrientationChange => self.resize_debounce_ms,
            ReflowTrigger::ViewportScroll
            | ReflowTrigger::PageShow
            | ReflowTrigger::ContentMutated => self.settle_debounce_ms,
            _ => self.repack_debounce_ms,
        };
        Duration::from_millis(ms)
    }

    /// Fit-chase budget started by `trigger`.
    pub fn chase_for(&self, trigger: ReflowTrigger) -> Duration {
        let ms = match trigger {
            ReflowTrigger::OrientationChange => self.orientation_chase_ms,
            ReflowTrigger::FontsReady | ReflowTrigger::ImageLoaded => self.readiness_chase_ms,
            _ => self.chase_ms,
        };
        Duration::from_millis(ms)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        self.pagination.validate()
    }
}
