//! Tweet cache file.
//!
//! The cache is a pretty-printed JSON array of every known media tweet,
//! ordered by decreasing id. It is rewritten in full at the end of each run.

use std::path::Path;

use crate::dedup::{is_strictly_descending, sort_descending_unique};
use crate::error::Result;
use crate::fs::naming::partial_path;
use crate::fs::paths::expect_regular_file;
use crate::tweet::Tweet;

/// Load the prior tweet list.
///
/// An absent file yields an empty list; a directory in its place is fatal.
/// A list that is not strictly descending is repaired with a warning.
pub async fn load_cache(path: &Path) -> Result<Vec<Tweet>> {
    if !expect_regular_file(path).await? {
        tracing::info!(
            "No cached response list at {}, starting fresh",
            path.display()
        );
        return Ok(Vec::new());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let tweets: Vec<Tweet> = serde_json::from_str(&content)?;
    tracing::info!(
        "Retrieved cached response list ({} tweets)",
        tweets.len()
    );

    if is_strictly_descending(&tweets) {
        return Ok(tweets);
    }

    let before = tweets.len();
    let repaired = sort_descending_unique(tweets);
    tracing::warn!(
        "Cache {} was not ordered by decreasing id; re-sorted ({} -> {} tweets)",
        path.display(),
        before,
        repaired.len()
    );
    Ok(repaired)
}

/// Overwrite the cache with `tweets`.
///
/// Writes a sibling temp file first and renames it into place.
pub async fn save_cache(path: &Path, tweets: &[Tweet]) -> Result<()> {
    expect_regular_file(path).await?;

    let json = serde_json::to_string_pretty(tweets)?;
    let temp = partial_path(path);
    tokio::fs::write(&temp, json).await?;
    tokio::fs::rename(&temp, path).await?;

    tracing::debug!("Wrote {} tweets to {}", tweets.len(), path.display());
    Ok(())
}
