//! Greedy forward page packing.
//!
//! Sections are packed in document order under a hard height budget. A
//! whole section is first tried as one append to the current page. When
//! that overflows, the current page is closed and the section is packed
//! unit by unit. A unit that does not fit even an empty page gets a page to
//! itself and is never split.

use super::measure::{MeasurementOracle, ScratchSheet};
use super::observer::{OversizedUnit, PassObserver};
use crate::model::{Block, Page, Section, ViewportBudget};

/// Pack sections into pages.
pub fn pack_sections<O: MeasurementOracle + ?Sized>(
    sections: &[Section],
    sheet: &mut ScratchSheet<'_, O>,
    budget: ViewportBudget,
    observer: &mut dyn PassObserver,
) -> Vec<Page> {
    let mut packer = Packer {
        budget,
        current: Vec::new(),
        current_height: 0.0,
        pages: Vec::new(),
    };

    for section in sections {
        if !section.is_empty() && packer.try_append(sheet, &section.blocks).fits() {
            continue;
        }

        packer.close_page(observer);
        for (unit_index, unit) in section.units.iter().enumerate() {
            let blocks = section.unit_blocks(*unit);
            if packer.try_append(sheet, blocks).fits() {
                continue;
            }

            packer.close_page(observer);
            if let Attempt::Overflows(height) = packer.try_append(sheet, blocks) {
                packer.place_oversized(blocks, height, section.index, unit_index, observer);
            }
        }
    }
    packer.close_page(observer);

    log::debug!(
        "Packed {} sections into {} pages (budget {}px)",
        sections.len(),
        packer.pages.len(),
        budget.height()
    );
    packer.pages
}

#[derive(Debug, Clone, Copy)]
enum Attempt {
    Fits,
    Overflows(f32),
}

impl Attempt {
    fn fits(self) -> bool {
        matches!(self, Attempt::Fits)
    }
}

struct Packer<'a> {
    budget: ViewportBudget,
    current: Vec<&'a Block>,
    current_height: f32,
    pages: Vec<Page>,
}

impl<'a> Packer<'a> {
    /// Tentatively append `blocks` and remeasure the whole page.
    fn try_append<O: MeasurementOracle + ?Sized>(
        &mut self,
        sheet: &mut ScratchSheet<'_, O>,
        blocks: &'a [Block],
    ) -> Attempt {
        let mut tentative = Vec::with_capacity(self.current.len() + blocks.len());
        tentative.extend_from_slice(&self.current);
        tentative.extend(blocks.iter());

        let height = sheet.measure(&tentative);
        if self.budget.fits(height) {
            self.current = tentative;
            self.current_height = height;
            Attempt::Fits
        } else {
            Attempt::Overflows(height)
        }
    }

    /// Close the current page if it holds anything.
    fn close_page(&mut self, observer: &mut dyn PassObserver) {
        if self.current.is_empty() {
            return;
        }
        let blocks = self.current.drain(..).cloned().collect();
        let page = Page::new(self.pages.len(), blocks, self.current_height);
        self.current_height = 0.0;
        observer.on_page_packed(&page);
        self.pages.push(page);
    }

    fn place_oversized(
        &mut self,
        blocks: &[Block],
        height: f32,
        section_index: usize,
        unit_index: usize,
        observer: &mut dyn PassObserver,
    ) {
        let report = OversizedUnit {
            section_index,
            unit_index,
            page_index: self.pages.len(),
            height,
            budget: self.budget.height(),
        };
        log::warn!(
            "Unit {} of section {} is {}px tall, over the {}px budget; placing it alone on page {}",
            unit_index,
            section_index,
            height,
            report.budget,
            report.page_index + 1
        );
        observer.on_oversized_unit(&report);

        let page = Page::new(self.pages.len(), blocks.to_vec(), height).into_oversized();
        observer.on_page_packed(&page);
        self.pages.push(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::group::group_section;
    use crate::layout::observer::{CollectingObserver, NoopObserver};
    use crate::model::ContentNode;

    /// Sums a fixed height per block, parsed from a trailing `:<px>` in its text.
    struct Fixed;

    impl MeasurementOracle for Fixed {
        fn measure(&mut self, blocks: &[&Block], _width: f32) -> f32 {
            blocks
                .iter()
                .map(|b| {
                    let text = b.plain_text();
                    text.rsplit(':')
                        .next()
                        .and_then(|h| h.parse::<f32>().ok())
                        .unwrap_or(0.0)
                })
                .sum()
        }
    }

    fn section(index: usize, nodes: Vec<ContentNode>) -> Section {
        group_section(index, &nodes)
    }

    fn texts(page: &Page) -> Vec<String> {
        page.blocks.iter().map(Block::plain_text).collect()
    }

    #[test]
    fn test_whole_section_fast_path() {
        let sections = vec![section(
            0,
            vec![
                ContentNode::paragraph("a:100"),
                ContentNode::paragraph("b:100"),
                ContentNode::paragraph("c:100"),
            ],
        )];
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let pages = pack_sections(
            &sections,
            &mut sheet,
            ViewportBudget::new(2000.0),
            &mut NoopObserver,
        );

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].height, 300.0);
        assert_eq!(sheet.measurements(), 1);
    }

    #[test]
    fn test_sections_share_a_page_when_they_fit() {
        let sections = vec![
            section(0, vec![ContentNode::paragraph("a:100")]),
            section(1, vec![ContentNode::paragraph("b:100")]),
        ];
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let pages = pack_sections(
            &sections,
            &mut sheet,
            ViewportBudget::new(500.0),
            &mut NoopObserver,
        );
        assert_eq!(pages.len(), 1);
        assert_eq!(texts(&pages[0]), vec!["a:100", "b:100"]);
    }

    #[test]
    fn test_overflowing_section_starts_fresh_page() {
        let sections = vec![
            section(0, vec![ContentNode::paragraph("a:300")]),
            section(
                1,
                vec![
                    ContentNode::paragraph("b:150"),
                    ContentNode::paragraph("c:300"),
                ],
            ),
        ];
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let pages = pack_sections(
            &sections,
            &mut sheet,
            ViewportBudget::new(500.0),
            &mut NoopObserver,
        );

        // Section 1 does not fit after section 0, so page 0 closes even
        // though "b" alone would have fit beside "a".
        assert_eq!(pages.len(), 2);
        assert_eq!(texts(&pages[0]), vec!["a:300"]);
        assert_eq!(texts(&pages[1]), vec!["b:150", "c:300"]);
    }

    #[test]
    fn test_heading_stays_with_next() {
        let sections = vec![section(
            0,
            vec![
                ContentNode::paragraph("a:350"),
                ContentNode::paragraph("b:100"),
                ContentNode::heading(2, "h:30"),
                ContentNode::paragraph("c:100"),
            ],
        )];
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let pages = pack_sections(
            &sections,
            &mut sheet,
            ViewportBudget::new(500.0),
            &mut NoopObserver,
        );

        assert_eq!(pages.len(), 2);
        assert_eq!(texts(&pages[0]), vec!["a:350", "b:100"]);
        assert_eq!(texts(&pages[1]), vec!["h:30", "c:100"]);
    }

    #[test]
    fn test_oversized_unit_placed_alone() {
        let sections = vec![section(
            0,
            vec![
                ContentNode::paragraph("a:100"),
                ContentNode::code("huge:900"),
                ContentNode::paragraph("b:100"),
            ],
        )];
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let mut observer = CollectingObserver::new();
        let pages = pack_sections(
            &sections,
            &mut sheet,
            ViewportBudget::new(500.0),
            &mut observer,
        );

        assert_eq!(pages.len(), 3);
        assert_eq!(texts(&pages[0]), vec!["a:100"]);
        assert_eq!(texts(&pages[1]), vec!["huge:900"]);
        assert!(pages[1].oversized);
        assert_eq!(pages[1].height, 900.0);
        assert_eq!(texts(&pages[2]), vec!["b:100"]);
        assert!(!pages[2].oversized);

        assert_eq!(observer.oversized.len(), 1);
        assert_eq!(observer.oversized[0].page_index, 1);
        assert_eq!(observer.oversized[0].unit_index, 1);
        assert_eq!(observer.packed, 3);
    }

    #[test]
    fn test_page_indices_sequential() {
        let nodes: Vec<_> = (0..10)
            .map(|i| ContentNode::paragraph(format!("p{}:200", i)))
            .collect();
        let sections = vec![section(0, nodes)];
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let pages = pack_sections(
            &sections,
            &mut sheet,
            ViewportBudget::new(500.0),
            &mut NoopObserver,
        );

        assert_eq!(pages.len(), 5);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
            assert_eq!(page.block_count(), 2);
        }
    }

    #[test]
    fn test_empty_input() {
        let mut oracle = Fixed;
        let mut sheet = ScratchSheet::new(&mut oracle, 360.0);
        let pages = pack_sections(
            &[],
            &mut sheet,
            ViewportBudget::new(500.0),
            &mut NoopObserver,
        );
        assert!(pages.is_empty());
    }
}
