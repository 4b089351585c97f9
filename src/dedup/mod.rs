//! Deduplication module.
//!
//! Provides:
//! - Descending-order membership index over cached tweet ids
//! - Merge of prior and freshly fetched tweets

pub mod index;
pub mod merge;

pub use index::DedupIndex;
pub use merge::{is_strictly_descending, merge, sort_descending_unique};
