//! One full pagination pass: split, group, pack, fit.

use super::fit::ScaleFitter;
use super::group::group_section;
use super::measure::{MeasurementOracle, ScratchSheet};
use super::observer::PassObserver;
use super::pack::pack_sections;
use super::split::split_sections;
use super::FitOptions;
use crate::model::{Book, ContentNode, Page, Section, ViewportBudget};

/// Split normalized nodes into sections and group each into blocks and units.
pub fn build_sections(nodes: &[ContentNode]) -> Vec<Section> {
    split_sections(nodes)
        .into_iter()
        .enumerate()
        .map(|(index, nodes)| group_section(index, nodes))
        .collect()
}

/// Pack already-normalized nodes into pages at scale 1.0, without fitting.
pub fn pack<O: MeasurementOracle + ?Sized>(
    nodes: &[ContentNode],
    oracle: &mut O,
    column_width: f32,
    budget: ViewportBudget,
    observer: &mut dyn PassObserver,
) -> Book {
    let sections = build_sections(nodes);
    let mut sheet = ScratchSheet::new(oracle, column_width);
    let pages = pack_sections(&sections, &mut sheet, budget, observer);
    Book {
        pages,
        budget,
        column_width: sheet.width(),
    }
}

/// Paginate already-normalized nodes and fit every page.
///
/// Packing and fitting each get a fresh scratch sheet, released as soon as
/// the phase ends.
pub fn paginate<O: MeasurementOracle + ?Sized>(
    nodes: &[ContentNode],
    oracle: &mut O,
    column_width: f32,
    budget: ViewportBudget,
    fit: &FitOptions,
    observer: &mut dyn PassObserver,
) -> Book {
    let mut book = pack(nodes, oracle, column_width, budget, observer);
    refit(&mut book, oracle, budget, fit, observer);

    log::debug!(
        "Pass complete: {} pages, {} scaled, {} oversized (budget {}px)",
        book.page_count(),
        book.pages.iter().filter(|p| p.is_scaled()).count(),
        book.oversized_pages().count(),
        budget.height()
    );
    book
}

/// Re-fit an existing book's pages against a new budget without repacking.
pub fn refit<O: MeasurementOracle + ?Sized>(
    book: &mut Book,
    oracle: &mut O,
    budget: ViewportBudget,
    fit: &FitOptions,
    observer: &mut dyn PassObserver,
) {
    let mut sheet = ScratchSheet::new(oracle, book.column_width);
    fit_pages(&mut book.pages, &mut sheet, budget, fit, observer);
    book.budget = budget;
}

fn fit_pages<O: MeasurementOracle + ?Sized>(
    pages: &mut [Page],
    sheet: &mut ScratchSheet<'_, O>,
    budget: ViewportBudget,
    fit: &FitOptions,
    observer: &mut dyn PassObserver,
) {
    let fitter = ScaleFitter::new(*fit);
    for page in pages.iter_mut() {
        let outcome = fitter.fit_page(sheet, page, budget.height());
        observer.on_page_fitted(page.index, &outcome);
    }
}
