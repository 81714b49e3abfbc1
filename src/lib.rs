pub mod advisor;
pub mod dom;
pub mod error;
pub mod locator;
pub mod page_object;
pub mod report;
pub mod source;
pub mod utils;
pub mod validate;

// Re-export common items
pub use dom::{extract, DocumentContextIndex, ElementRecord, TagUniverse};
pub use error::ParseError;
pub use locator::{filter_min_stability, generate_locators, Framework, LocatorCandidate, StabilityLabel};
pub use page_object::select_best;
pub use report::compute_summary;
pub use utils::ScanConfig;
