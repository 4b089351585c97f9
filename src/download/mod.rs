//! Download module for the export pipeline.
//!
//! This module provides:
//! - Favorites timeline pagination
//! - Bounded-concurrency media downloading
//! - Stage outcomes and run statistics

pub mod fetcher;
pub mod media;
pub mod state;

pub use fetcher::{fetch_all, FavoritesSource};
pub use media::{download_all, DownloadOptions, MediaSource};
pub use state::{DownloadReport, FetchOutcome, RunSummary};
