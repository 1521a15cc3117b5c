//! The reflow controller state machine.
//!
//! The controller is the single consumer of the reflow channel. It is driven
//! cooperatively by the host: [`ReflowController::poll`] whenever events may
//! be pending, and [`ReflowController::on_frame`] once per animation frame
//! while a fit chase is running. Time is always passed in, never read.

use super::trigger::{reflow_channel, Debouncer, PassKind, ReflowHandle, ReflowRequest};
use super::ReflowOptions;
use crate::error::Result;
use crate::layout::{self, normalize, MeasurementOracle, NoopObserver, PassObserver};
use crate::model::{Book, ContentNode, Presentation, Viewport, ViewportBudget};
use crate::nav::{PageIndicator, PageNavigator};
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};

/// Host environment the controller lays out into.
pub trait Surface {
    /// Oracle measuring blocks the way this surface renders them.
    type Oracle: MeasurementOracle + ?Sized;

    /// Current viewport geometry.
    fn viewport(&self) -> Viewport;

    /// Width of the content column in CSS px.
    fn column_width(&self) -> f32;

    /// Measurement oracle for this surface.
    fn oracle(&mut self) -> &mut Self::Oracle;

    /// Replace the displayed content with a new presentation.
    fn present(&mut self, presentation: &Presentation);

    /// Apply refitted per-page scales to the displayed pages.
    fn apply_scales(&mut self, scales: &[f32]);
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowState {
    /// Waiting for a trigger
    Idle,
    /// Packing pages
    Packing,
    /// Fitting page scales
    Fitting,
    /// Re-fitting every frame until the deadline
    Chasing { until: Instant },
}

/// Owns the document and re-paginates it as the viewport changes.
pub struct ReflowController {
    options: ReflowOptions,
    nodes: Vec<ContentNode>,
    handle: ReflowHandle,
    receiver: Receiver<ReflowRequest>,
    debouncer: Debouncer,
    state: ReflowState,
    presentation: Presentation,
    navigator: PageNavigator,
    indicator: Option<PageIndicator>,
    observer: Box<dyn PassObserver>,
    passes: usize,
    refits: usize,
}

impl ReflowController {
    /// Create a controller for a document. No pass runs until the first
    /// trigger or an explicit [`reflow_now`](Self::reflow_now).
    pub fn new(nodes: Vec<ContentNode>, options: ReflowOptions) -> Result<Self> {
        options.validate()?;
        let (handle, receiver) = reflow_channel();
        Ok(Self {
            options,
            nodes,
            handle,
            receiver,
            debouncer: Debouncer::new(),
            state: ReflowState::Idle,
            presentation: Presentation::Continuous,
            navigator: PageNavigator::default(),
            indicator: None,
            observer: Box::new(NoopObserver),
            passes: 0,
            refits: 0,
        })
    }

    /// Install an observer for every subsequent pass.
    pub fn with_observer(mut self, observer: Box<dyn PassObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// A producer handle for event sources.
    pub fn handle(&self) -> ReflowHandle {
        self.handle.clone()
    }

    pub fn options(&self) -> &ReflowOptions {
        &self.options
    }

    pub fn state(&self) -> ReflowState {
        self.state
    }

    /// The document, normalized after the first pass.
    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Result of the latest pass.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Current pages, when paged.
    pub fn book(&self) -> Option<&Book> {
        self.presentation.book()
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut PageNavigator {
        &mut self.navigator
    }

    /// Indicator of the latest pass. Absent in the continuous layout.
    pub fn indicator(&self) -> Option<&PageIndicator> {
        self.indicator.as_ref()
    }

    /// Record a scroll of the page strip and refresh the indicator.
    pub fn on_scroll(&mut self, scroll_left: f32) {
        self.navigator.on_scroll(scroll_left);
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.refresh(&self.navigator);
        }
    }

    /// Number of full passes run so far.
    pub fn pass_count(&self) -> usize {
        self.passes
    }

    /// Number of fit-only refits run so far.
    pub fn refit_count(&self) -> usize {
        self.refits
    }

    /// Earliest instant at which `poll` or `on_frame` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let chase = match self.state {
            ReflowState::Chasing { until } => Some(until),
            _ => None,
        };
        match (self.debouncer.next_due(), chase) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drain the reflow channel and run whatever has come due.
    ///
    /// All triggers due at `now` are served by one pass: a full pass if any
    /// of them needs repacking, otherwise a refit that (re)starts the chase.
    pub fn poll<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> Option<PassKind> {
        for request in self.receiver.try_iter() {
            let delay = self.options.debounce_for(request.trigger);
            self.debouncer.schedule(request.trigger, request.at, delay);
        }

        let due = self.debouncer.take_due(now);
        let kind = due.iter().map(|t| t.pass_kind()).max()?;
        let chase = due
            .iter()
            .map(|t| self.options.chase_for(*t))
            .max()
            .unwrap_or_default();
        let labels: Vec<&str> = due.iter().map(|t| t.label()).collect();

        match kind {
            PassKind::Full => {
                log::info!("Reflow: full pass for [{}]", labels.join(", "));
                self.run_pass(now, surface, chase);
            }
            PassKind::FitOnly => {
                log::debug!("Reflow: refit for [{}]", labels.join(", "));
                self.extend_chase(now, chase);
                self.refit(surface);
            }
        }
        Some(kind)
    }

    /// Run a full pass immediately, bypassing the debouncer.
    pub fn reflow_now<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) {
        let chase = Duration::from_millis(self.options.chase_ms);
        self.run_pass(now, surface, chase);
    }

    /// Advance the fit chase by one frame.
    ///
    /// Returns `true` while the chase wants more frames. The chase ends at
    /// its deadline whether or not scales have settled.
    pub fn on_frame<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> bool {
        let until = match self.state {
            ReflowState::Chasing { until } => until,
            _ => return false,
        };
        if now >= until {
            log::debug!("Fit chase finished after {} refits", self.refits);
            self.state = ReflowState::Idle;
            return false;
        }
        self.refit(surface);
        true
    }

    fn run_pass<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S, chase: Duration) {
        let pagination = &self.options.pagination;
        let viewport = surface.viewport();
        self.passes += 1;

        self.state = ReflowState::Packing;
        let stats = normalize(&mut self.nodes);
        if !stats.is_clean() {
            log::debug!(
                "Normalized: {} text runs wrapped, {} headings rewritten",
                stats.wrapped_text,
                stats.headings_rewritten
            );
        }

        if !viewport.is_phone(pagination.phone_max_width) {
            log::debug!("Viewport {}px is wide; using continuous layout", viewport.width);
            self.presentation = Presentation::Continuous;
            self.indicator = None;
            self.navigator.set_total(0);
            surface.present(&self.presentation);
            self.state = ReflowState::Idle;
            return;
        }

        let budget = ViewportBudget::from_viewport(
            &viewport,
            pagination.chrome_padding,
            pagination.min_budget,
        );
        let column_width = surface.column_width();
        let mut book = layout::pack(
            &self.nodes,
            surface.oracle(),
            column_width,
            budget,
            self.observer.as_mut(),
        );

        self.state = ReflowState::Fitting;
        layout::refit(
            &mut book,
            surface.oracle(),
            budget,
            &pagination.fit,
            self.observer.as_mut(),
        );

        self.navigator.set_page_width(viewport.width);
        self.navigator.set_total(book.page_count());
        self.indicator = Some(PageIndicator::new(&self.navigator));
        log::info!(
            "Paginated into {} pages (budget {}px, column {}px)",
            book.page_count(),
            budget.height(),
            book.column_width
        );

        self.presentation = Presentation::Paged(book);
        surface.present(&self.presentation);
        self.state = ReflowState::Chasing { until: now + chase };
    }

    fn extend_chase(&mut self, now: Instant, chase: Duration) {
        if !self.presentation.is_paged() {
            return;
        }
        let until = now + chase;
        self.state = match self.state {
            ReflowState::Chasing { until: current } => ReflowState::Chasing {
                until: current.max(until),
            },
            _ => ReflowState::Chasing { until },
        };
    }

    fn refit<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let book = match &mut self.presentation {
            Presentation::Paged(book) => book,
            Presentation::Continuous => return,
        };
        let pagination = &self.options.pagination;
        let budget = ViewportBudget::from_viewport(
            &surface.viewport(),
            pagination.chrome_padding,
            pagination.min_budget,
        );
        layout::refit(
            book,
            surface.oracle(),
            budget,
            &pagination.fit,
            self.observer.as_mut(),
        );
        surface.apply_scales(&book.scales());
        self.refits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::reflow::ReflowTrigger;

    struct PerBlock(f32);

    impl MeasurementOracle for PerBlock {
        fn measure(&mut self, blocks: &[&Block], _width: f32) -> f32 {
            blocks.len() as f32 * self.0
        }
    }

    struct TestSurface {
        viewport: Viewport,
        oracle: PerBlock,
        presented: usize,
        scale_updates: usize,
    }

    impl TestSurface {
        fn phone(height: f32) -> Self {
            Self {
                viewport: Viewport::new(390.0, height, 0.0),
                oracle: PerBlock(100.0),
                presented: 0,
                scale_updates: 0,
            }
        }
    }

    impl Surface for TestSurface {
        type Oracle = PerBlock;

        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn column_width(&self) -> f32 {
            self.viewport.width - 32.0
        }

        fn oracle(&mut self) -> &mut PerBlock {
            &mut self.oracle
        }

        fn present(&mut self, _presentation: &Presentation) {
            self.presented += 1;
        }

        fn apply_scales(&mut self, _scales: &[f32]) {
            self.scale_updates += 1;
        }
    }

    fn paragraphs(n: usize) -> Vec<ContentNode> {
        (0..n)
            .map(|i| ContentNode::paragraph(format!("p{}", i)))
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_rejects_bad_options() {
        let options = ReflowOptions::new()
            .with_pagination(crate::layout::PaginationOptions::new().with_min_scale(0.0));
        assert!(ReflowController::new(Vec::new(), options).is_err());
    }

    #[test]
    fn test_reflow_now_paginates() {
        let mut surface = TestSurface::phone(512.0);
        let mut controller = ReflowController::new(paragraphs(10), ReflowOptions::default()).unwrap();
        let t0 = Instant::now();
        controller.reflow_now(t0, &mut surface);

        // 512 - 12 padding = 500px budget, 5 blocks per page
        let book = controller.book().unwrap();
        assert_eq!(book.page_count(), 2);
        assert_eq!(surface.presented, 1);
        assert_eq!(controller.indicator().unwrap().label, "1 / 2");
        assert_eq!(controller.state(), ReflowState::Chasing { until: t0 + ms(900) });
    }

    #[test]
    fn test_wide_viewport_is_continuous() {
        let mut surface = TestSurface::phone(800.0);
        surface.viewport = Viewport::new(1280.0, 800.0, 64.0);
        let mut controller = ReflowController::new(paragraphs(3), ReflowOptions::default()).unwrap();
        controller.reflow_now(Instant::now(), &mut surface);

        assert_eq!(controller.presentation(), &Presentation::Continuous);
        assert!(controller.indicator().is_none());
        assert_eq!(controller.state(), ReflowState::Idle);
        assert!(!controller.on_frame(Instant::now(), &mut surface));
    }

    #[test]
    fn test_poll_debounces_and_coalesces() {
        let mut surface = TestSurface::phone(512.0);
        let mut controller = ReflowController::new(paragraphs(4), ReflowOptions::default()).unwrap();
        let handle = controller.handle();
        let t0 = Instant::now();

        for i in 0..5 {
            handle.request(ReflowTrigger::Resize, t0 + ms(i * 20));
        }
        handle.request(ReflowTrigger::FontsReady, t0 + ms(100));

        assert_eq!(controller.poll(t0 + ms(120), &mut surface), None);
        assert_eq!(controller.poll(t0 + ms(300), &mut surface), Some(PassKind::Full));
        assert_eq!(controller.pass_count(), 1);
        assert_eq!(controller.poll(t0 + ms(1000), &mut surface), None);
        assert_eq!(controller.pass_count(), 1);
    }

    #[test]
    fn test_chase_terminates() {
        let mut surface = TestSurface::phone(512.0);
        let options = ReflowOptions::default().with_chase_ms(100);
        let mut controller = ReflowController::new(paragraphs(4), options).unwrap();
        let t0 = Instant::now();
        controller.reflow_now(t0, &mut surface);

        let mut frames = 0;
        let mut now = t0;
        while controller.on_frame(now, &mut surface) {
            frames += 1;
            now += ms(16);
            assert!(frames < 100);
        }
        assert_eq!(frames, 7);
        assert_eq!(controller.refit_count(), 7);
        assert_eq!(surface.scale_updates, 7);
        assert_eq!(controller.state(), ReflowState::Idle);
    }

    #[test]
    fn test_scroll_trigger_only_refits() {
        let mut surface = TestSurface::phone(512.0);
        let mut controller = ReflowController::new(paragraphs(4), ReflowOptions::default()).unwrap();
        let t0 = Instant::now();
        controller.reflow_now(t0, &mut surface);
        assert_eq!(controller.pass_count(), 1);

        controller
            .handle()
            .request(ReflowTrigger::ViewportScroll, t0 + ms(2000));
        let kind = controller.poll(t0 + ms(2050), &mut surface);

        assert_eq!(kind, Some(PassKind::FitOnly));
        assert_eq!(controller.pass_count(), 1);
        assert_eq!(controller.refit_count(), 1);
        assert_eq!(surface.presented, 1);
        assert_eq!(
            controller.state(),
            ReflowState::Chasing {
                until: t0 + ms(2050) + ms(900)
            }
        );
    }

    #[test]
    fn test_switch_to_continuous_clears_navigation() {
        let mut surface = TestSurface::phone(512.0);
        let mut controller = ReflowController::new(paragraphs(10), ReflowOptions::default()).unwrap();
        let t0 = Instant::now();
        controller.reflow_now(t0, &mut surface);
        controller.on_scroll(390.0);
        assert_eq!(controller.indicator().unwrap().label, "2 / 2");

        surface.viewport = Viewport::new(900.0, 512.0, 0.0);
        controller.handle().request(ReflowTrigger::Resize, t0);
        controller.poll(t0 + ms(500), &mut surface);

        assert!(!controller.presentation().is_paged());
        assert_eq!(controller.navigator().label(), "0 / 0");
    }

    #[test]
    fn test_next_deadline() {
        let mut surface = TestSurface::phone(512.0);
        let mut controller = ReflowController::new(paragraphs(2), ReflowOptions::default()).unwrap();
        let t0 = Instant::now();
        assert_eq!(controller.next_deadline(), None);

        controller.reflow_now(t0, &mut surface);
        assert_eq!(controller.next_deadline(), Some(t0 + ms(900)));

        controller.handle().request(ReflowTrigger::ImageLoaded, t0);
        controller.poll(t0, &mut surface);
        assert_eq!(controller.next_deadline(), Some(t0 + ms(150)));
    }
}
