//! Run statistics and stage outcomes.

use crate::error::Error;
use crate::tweet::Tweet;

/// Result of walking the favorites timeline.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Media-bearing tweets in the order they were fetched.
    pub tweets: Vec<Tweet>,

    /// Completed page requests, including the terminal empty page.
    pub request_count: u64,

    /// Oldest id observed so far; pass it back to resume.
    pub last_cursor: Option<u64>,

    /// Whether a page request failed before the walk reached the end.
    pub truncated: bool,

    /// The failure that truncated the walk, if any.
    pub error: Option<Error>,
}

impl FetchOutcome {
    /// Cursor to hand to the next run, only set when the walk was cut short.
    pub fn resume_cursor(&self) -> Option<u64> {
        if self.truncated {
            self.last_cursor
        } else {
            None
        }
    }
}

/// Tally of one download batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: u64,
    pub skipped: u64,
    pub failed: Vec<String>,
}

impl DownloadReport {
    pub fn total(&self) -> u64 {
        self.downloaded + self.skipped + self.failed.len() as u64
    }

    pub fn increment_downloaded(&mut self) {
        self.downloaded += 1;
    }

    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn mark_failed(&mut self, url: String) {
        self.failed.push(url);
    }
}

/// Everything the final report prints.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub request_count: u64,
    pub new_tweets: u64,
    pub new_media: u64,
    pub cached_tweets: u64,
    pub downloads: DownloadReport,
    pub truncated: bool,
    pub resume_cursor: Option<u64>,
}

impl RunSummary {
    /// Whether any recoverable failure left the run incomplete.
    pub fn is_partial(&self) -> bool {
        self.truncated || !self.downloads.failed.is_empty()
    }
}
