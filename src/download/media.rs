//! Bounded-concurrency media downloads.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use crate::api::TwitterApi;
use crate::download::state::DownloadReport;
use crate::error::{Error, Result};
use crate::fs::naming::partial_path;
use crate::fs::paths::{file_status, FileStatus};
use crate::output::DownloadProgress;
use crate::tweet::file_name_from_url;

/// Fetches one remote resource into a local file.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Stream `url` into `dest`, returning the number of bytes written.
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64>;
}

#[async_trait]
impl MediaSource for TwitterApi {
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.download_file(url).await?;

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}

/// Scheduler settings.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Maximum downloads in flight.
    pub concurrency: usize,

    /// Pause after each finished download. Taken outside the slot.
    pub delay: Duration,
}

enum ItemOutcome {
    Downloaded,
    Skipped,
    Failed,
}

/// Download every URL into `dest_dir`, at most `options.concurrency` at a time.
///
/// Files are named after the URL's last path segment. An existing file, or a
/// name already claimed by an earlier URL of the batch, is counted as skipped
/// and never fetched. A failing item is logged and
/// recorded in `failed`; the rest of the batch carries on.
pub async fn download_all<S: MediaSource + ?Sized>(
    source: &S,
    urls: &[String],
    dest_dir: &Path,
    options: &DownloadOptions,
    progress: &DownloadProgress,
) -> DownloadReport {
    let slots = Semaphore::new(options.concurrency.max(1));
    // One writer per file name; later URLs mapping to a claimed name are skipped.
    let mut claimed = HashSet::new();

    let outcomes = join_all(urls.iter().map(|url| {
        let slots = &slots;
        let duplicate = file_name_from_url(url).is_ok_and(|name| !claimed.insert(name));
        async move {
            if duplicate {
                tracing::debug!("Skipping {}, file name already scheduled", url);
                progress.complete_item();
                return (url, ItemOutcome::Skipped);
            }
            let outcome = download_item(source, url, dest_dir, options, slots, progress).await;
            (url, outcome)
        }
    }))
    .await;

    let mut report = DownloadReport::default();
    for (url, outcome) in outcomes {
        match outcome {
            ItemOutcome::Downloaded => report.increment_downloaded(),
            ItemOutcome::Skipped => report.increment_skipped(),
            ItemOutcome::Failed => report.mark_failed(url.clone()),
        }
    }
    progress.finish();

    report
}

async fn download_item<S: MediaSource + ?Sized>(
    source: &S,
    url: &str,
    dest_dir: &Path,
    options: &DownloadOptions,
    slots: &Semaphore,
    progress: &DownloadProgress,
) -> ItemOutcome {
    let target = match target_path(url, dest_dir).await {
        Ok(Some(target)) => target,
        Ok(None) => {
            tracing::debug!("Skipping existing file for {}", url);
            progress.complete_item();
            return ItemOutcome::Skipped;
        }
        Err(e) => {
            tracing::warn!("Failed to download {}: {}", url, e);
            progress.complete_item();
            return ItemOutcome::Failed;
        }
    };

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bar = progress.start_item(&name);

    let result = match slots.acquire().await {
        Ok(_permit) => fetch_atomically(source, url, &target).await,
        Err(e) => Err(Error::Download(format!("Download slots closed: {}", e))),
    };
    progress.complete_item();

    let outcome = match result {
        Ok(bytes) => {
            tracing::debug!("Downloaded {} ({} bytes)", target.display(), bytes);
            ItemOutcome::Downloaded
        }
        Err(e) => {
            tracing::warn!("Failed to download {}: {}", url, e);
            ItemOutcome::Failed
        }
    };

    if !options.delay.is_zero() {
        sleep(options.delay).await;
    }
    progress.remove_item(bar);

    outcome
}

/// Destination for `url`, or `None` when the file is already present.
async fn target_path(url: &str, dest_dir: &Path) -> Result<Option<PathBuf>> {
    let target = dest_dir.join(file_name_from_url(url)?);
    match file_status(&target).await? {
        FileStatus::NotExists => Ok(Some(target)),
        FileStatus::IsFile => Ok(None),
        _ => Err(Error::FileSystem {
            path: target.display().to_string(),
            message: "expected a media file".to_string(),
        }),
    }
}

/// Write to a `.part` sibling and rename on success, so an interrupted
/// download is never mistaken for a finished one.
async fn fetch_atomically<S: MediaSource + ?Sized>(
    source: &S,
    url: &str,
    target: &Path,
) -> Result<u64> {
    let partial = partial_path(target);

    let result = match source.fetch_to_file(url, &partial).await {
        Ok(bytes) => tokio::fs::rename(&partial, target)
            .await
            .map(|_| bytes)
            .map_err(Error::from),
        Err(e) => Err(e),
    };

    if result.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    result
}
