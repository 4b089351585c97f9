//! Likes Exporter - export media from liked tweets.
//!
//! This library authenticates against the Twitter REST API with OAuth 1.0a,
//! walks the liked-tweets timeline and downloads the media attached to it.
//!
//! # Features
//!
//! - PIN-based OAuth handshake with an encrypted on-disk token
//! - Backward pagination with resume support
//! - Incremental runs against a local JSON cache
//! - Bounded-concurrency media downloads
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use likes_exporter::{run_export, auth::ConsoleVerifier, Config, TwitterApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = TwitterApi::new(&config.api)?;
//!
//!     let summary = run_export(&api, &config, &ConsoleVerifier).await?;
//!     println!("{} new tweets", summary.new_tweets);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod error;
pub mod export;
pub mod fs;
pub mod output;
pub mod tweet;

// Re-exports for convenience
pub use api::TwitterApi;
pub use config::Config;
pub use download::RunSummary;
pub use error::{Error, Result};
pub use export::{export_likes, run_export};
pub use tweet::{MediaItem, MediaType, Tweet};
