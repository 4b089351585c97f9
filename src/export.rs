//! The export pipeline.
//!
//! authenticate → load cache → paginate → merge → write cache → download.
//! Each stage runs once, in order. Only the download stage is concurrent.

use std::collections::HashSet;

use crate::api::types::AccessToken;
use crate::api::TwitterApi;
use crate::auth::{AuthManager, CredentialStore, VerifierSource};
use crate::config::Config;
use crate::dedup::{merge, DedupIndex};
use crate::download::{
    download_all, fetch_all, DownloadOptions, FavoritesSource, MediaSource, RunSummary,
};
use crate::error::Result;
use crate::fs::{ensure_dir, load_cache, save_cache};
use crate::output::{create_spinner, print_info, print_success, print_warning, DownloadProgress};
use crate::tweet::Tweet;

/// Run a full export against the live API.
pub async fn run_export<V: VerifierSource + ?Sized>(
    api: &TwitterApi,
    config: &Config,
    verifier: &V,
) -> Result<RunSummary> {
    let store = CredentialStore::new(&config.storage.passphrase);
    let mut auth = AuthManager::new(api, &store, verifier);
    let token = auth.ensure_token(&config.storage.credential_path).await?;

    export_likes(api, &token, config).await
}

/// Everything after authentication.
///
/// The cache is written only after pagination has finished (or been cut
/// short), so downloads only target tweets present in the written cache.
pub async fn export_likes<S>(source: &S, token: &AccessToken, config: &Config) -> Result<RunSummary>
where
    S: FavoritesSource + MediaSource + ?Sized,
{
    let storage = &config.storage;
    let options = &config.options;

    let prior = load_cache(&storage.cache_path).await?;

    let spinner = create_spinner("Fetching liked tweets...", options.show_progress);
    let outcome = fetch_all(source, token, options.resume_cursor, options.page_size).await;
    spinner.finish_and_clear();

    if let Some(e) = &outcome.error {
        print_warning(&format!("{}", e));
    }
    tracing::info!(
        "Fetched {} media tweets in {} requests",
        outcome.tweets.len(),
        outcome.request_count
    );

    let index = DedupIndex::new(&prior);
    let new_tweets = index.new_tweets(&outcome.tweets);
    let new_media: u64 = new_tweets.iter().map(|t| t.media.len() as u64).sum();

    let all_tweets = merge(&prior, &outcome.tweets);
    save_cache(&storage.cache_path, &all_tweets).await?;
    print_info(&format!(
        "Response written to '{}'. {} new liked tweets ({} media)",
        storage.cache_path.display(),
        new_tweets.len(),
        new_media
    ));

    let urls = media_urls(&new_tweets);
    let mut summary = RunSummary {
        request_count: outcome.request_count,
        new_tweets: new_tweets.len() as u64,
        new_media,
        cached_tweets: all_tweets.len() as u64,
        truncated: outcome.truncated,
        resume_cursor: outcome.resume_cursor(),
        ..Default::default()
    };

    if urls.is_empty() {
        return Ok(summary);
    }

    ensure_dir(&storage.media_dir).await?;
    let progress = DownloadProgress::new(urls.len() as u64, options.show_progress);
    let download_options = DownloadOptions {
        concurrency: options.parallel_downloads,
        delay: options.download_delay(),
    };
    summary.downloads =
        download_all(source, &urls, &storage.media_dir, &download_options, &progress).await;

    if summary.downloads.failed.is_empty() {
        print_success(&format!(
            "Downloaded {} new media files",
            summary.downloads.downloaded
        ));
    } else {
        print_warning(&format!(
            "{} of {} media downloads failed",
            summary.downloads.failed.len(),
            urls.len()
        ));
    }

    Ok(summary)
}

/// Media URLs of `tweets` in tweet order, each URL once.
pub fn media_urls(tweets: &[&Tweet]) -> Vec<String> {
    let mut seen = HashSet::new();
    tweets
        .iter()
        .flat_map(|t| t.media.iter())
        .filter(|m| seen.insert(m.media_url.as_str()))
        .map(|m| m.media_url.clone())
        .collect()
}
