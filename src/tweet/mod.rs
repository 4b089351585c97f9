//! Tweet module.
//!
//! Provides:
//! - Normalized tweet, media and author records
//! - Raw-to-normalized mapping and media filtering

pub mod item;
pub mod normalize;

pub use item::{file_name_from_url, Author, MediaItem, MediaType, Tweet};
pub use normalize::{media_tweets, normalize};
