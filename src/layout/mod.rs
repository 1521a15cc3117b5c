//! Pagination pipeline.
//!
//! normalize → split → group → pack → fit. Every stage is total: empty
//! input, content without headings, or one giant block all produce a
//! defined result without errors.

mod fit;
mod group;
mod measure;
mod normalize;
mod observer;
mod options;
mod pack;
mod pass;
mod split;

pub use fit::{FitOutcome, ScaleFitter};
pub use group::{build_units, classify, group_section};
pub use measure::{MeasurementOracle, ScratchSheet};
pub use normalize::{canonical_text, normalize, NormalizeStats};
pub use observer::{CollectingObserver, CompositeObserver, NoopObserver, OversizedUnit, PassObserver};
pub use options::{FitOptions, PaginationOptions};
pub use pack::pack_sections;
pub use pass::{build_sections, pack, paginate, refit};
pub use split::split_sections;
