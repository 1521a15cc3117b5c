//! Page navigation state for the paged layout.
//!
//! The navigator derives the current page from the horizontal scroll offset
//! and turns taps and keyboard steps into scroll targets. All requests clamp
//! into range; nothing here fails.

use serde::{Deserialize, Serialize};

/// Direction requested by a tap in one of the edge zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Prev,
    Next,
}

/// Where the host should smooth-scroll the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTarget {
    /// Page index being scrolled to
    pub index: usize,

    /// Horizontal scroll offset in CSS px (`index * page_width`)
    pub left: f32,
}

/// Tracks the current page of a horizontally scrolled page strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PageNavigator {
    total: usize,
    page_width: f32,
    scroll_left: f32,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}

impl PageNavigator {
    /// Fraction of the viewport width, on each side, that acts as a
    /// prev/next tap zone.
    pub const EDGE_ZONE: f32 = 0.2;

    /// Create a navigator positioned on the first page.
    pub fn new(total: usize, page_width: f32) -> Self {
        Self {
            total,
            page_width: sanitize(page_width),
            scroll_left: 0.0,
        }
    }

    /// Number of pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Width of one page in CSS px.
    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    /// Last reported horizontal scroll offset.
    pub fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    /// Replace the page count after a pass, keeping the reader on the same
    /// page when it still exists and on the last page otherwise.
    pub fn set_total(&mut self, total: usize) {
        let index = self.current_index();
        self.total = total;
        let clamped = self.clamp(index);
        if clamped != index {
            self.scroll_left = clamped as f32 * self.page_width;
        }
    }

    /// Update the page width, preserving the current page.
    pub fn set_page_width(&mut self, page_width: f32) {
        let index = self.current_index();
        self.page_width = sanitize(page_width);
        self.scroll_left = index as f32 * self.page_width;
    }

    /// Record a scroll offset reported by the host.
    pub fn on_scroll(&mut self, scroll_left: f32) {
        self.scroll_left = sanitize(scroll_left);
    }

    /// Current page (0-indexed), clamped to `[0, total - 1]`.
    pub fn current_index(&self) -> usize {
        let raw = (self.scroll_left / self.page_width.max(1.0)).round();
        self.clamp(raw as usize)
    }

    /// Indicator text, `"{page} / {total}"`, or `"0 / 0"` with no pages.
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.current_index() + 1, self.total)
    }

    /// Map a tap at `x` to a navigation direction.
    ///
    /// Taps in the left fifth go back, taps in the right fifth go forward,
    /// and taps in between are left to the content.
    pub fn click(&self, x: f32, viewport_width: f32) -> Option<NavDirection> {
        let width = viewport_width.max(1.0);
        if x < width * Self::EDGE_ZONE {
            Some(NavDirection::Prev)
        } else if x > width * (1.0 - Self::EDGE_ZONE) {
            Some(NavDirection::Next)
        } else {
            None
        }
    }

    /// Scroll one page in `direction`.
    pub fn step(&mut self, direction: NavDirection) -> ScrollTarget {
        match direction {
            NavDirection::Prev => self.snap(-1),
            NavDirection::Next => self.snap(1),
        }
    }

    /// Scroll `delta` pages relative to the current one.
    pub fn snap(&mut self, delta: isize) -> ScrollTarget {
        let target = (self.current_index() as isize).saturating_add(delta);
        self.go_to(target.max(0) as usize)
    }

    /// Scroll to page `index`, clamped into range.
    pub fn go_to(&mut self, index: usize) -> ScrollTarget {
        let index = self.clamp(index);
        let left = index as f32 * self.page_width;
        self.scroll_left = left;
        ScrollTarget { index, left }
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.total.saturating_sub(1))
    }
}

/// The floating "page / total" badge.
///
/// One indicator is built per pagination pass and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndicator {
    /// Current page (0-indexed)
    pub index: usize,

    /// Page count
    pub total: usize,

    /// Rendered text
    pub label: String,
}

impl PageIndicator {
    /// Build an indicator for the navigator's current state.
    pub fn new(navigator: &PageNavigator) -> Self {
        Self {
            index: navigator.current_index(),
            total: navigator.total(),
            label: navigator.label(),
        }
    }

    /// Re-read the navigator after a scroll. Returns true if the text changed.
    pub fn refresh(&mut self, navigator: &PageNavigator) -> bool {
        let next = Self::new(navigator);
        let changed = next.label != self.label;
        *self = next;
        changed
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_from_scroll() {
        let mut nav = PageNavigator::new(5, 390.0);
        assert_eq!(nav.current_index(), 0);
        nav.on_scroll(390.0 * 2.0);
        assert_eq!(nav.current_index(), 2);
        nav.on_scroll(390.0 * 2.6);
        assert_eq!(nav.current_index(), 3);
        nav.on_scroll(99_999.0);
        assert_eq!(nav.current_index(), 4);
        nav.on_scroll(-50.0);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_snap_extreme_delta_clamps() {
        let mut nav = PageNavigator::new(3, 400.0);
        nav.go_to(1);
        assert_eq!(nav.snap(isize::MAX).index, 2);
        assert_eq!(nav.label(), "3 / 3");

        nav.go_to(1);
        assert_eq!(nav.snap(isize::MIN).index, 0);
        assert_eq!(nav.scroll_left(), 0.0);
    }

    #[test]
    fn test_label() {
        let mut nav = PageNavigator::new(3, 400.0);
        assert_eq!(nav.label(), "1 / 3");
        nav.go_to(2);
        assert_eq!(nav.label(), "3 / 3");
        assert_eq!(PageNavigator::default().label(), "0 / 0");
    }

    #[test]
    fn test_click_zones() {
        let nav = PageNavigator::new(3, 400.0);
        assert_eq!(nav.click(10.0, 400.0), Some(NavDirection::Prev));
        assert_eq!(nav.click(79.0, 400.0), Some(NavDirection::Prev));
        assert_eq!(nav.click(200.0, 400.0), None);
        assert_eq!(nav.click(321.0, 400.0), Some(NavDirection::Next));
    }

    #[test]
    fn test_navigation_clamps() {
        let mut nav = PageNavigator::new(3, 400.0);
        let target = nav.step(NavDirection::Prev);
        assert_eq!(target, ScrollTarget { index: 0, left: 0.0 });

        assert_eq!(nav.snap(10).index, 2);
        assert_eq!(nav.scroll_left(), 800.0);
        assert_eq!(nav.step(NavDirection::Next).index, 2);
        assert_eq!(nav.go_to(1).left, 400.0);
    }

    #[test]
    fn test_set_total_clamps() {
        let mut nav = PageNavigator::new(6, 400.0);
        nav.go_to(5);
        nav.set_total(3);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.scroll_left(), 800.0);

        nav.set_total(10);
        assert_eq!(nav.current_index(), 2);

        nav.set_total(0);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.label(), "0 / 0");
    }

    #[test]
    fn test_set_page_width_keeps_page() {
        let mut nav = PageNavigator::new(4, 400.0);
        nav.go_to(2);
        nav.set_page_width(360.0);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.scroll_left(), 720.0);
    }

    #[test]
    fn test_indicator_refresh() {
        let mut nav = PageNavigator::new(3, 400.0);
        let mut indicator = PageIndicator::new(&nav);
        assert_eq!(indicator.label, "1 / 3");

        nav.on_scroll(400.0);
        assert!(indicator.refresh(&nav));
        assert_eq!(indicator.label, "2 / 3");
        assert!(!indicator.refresh(&nav));
    }
}
