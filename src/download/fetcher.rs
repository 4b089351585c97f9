//! Favorites timeline walk.

use async_trait::async_trait;

use crate::api::types::{AccessToken, FavoritesRequest, RawTweet};
use crate::api::TwitterApi;
use crate::download::state::FetchOutcome;
use crate::error::{Error, Result};
use crate::tweet::media_tweets;

/// One page of the favorites timeline.
#[async_trait]
pub trait FavoritesSource: Send + Sync {
    async fn fetch_page(
        &self,
        token: &AccessToken,
        request: &FavoritesRequest,
    ) -> Result<Vec<RawTweet>>;
}

#[async_trait]
impl FavoritesSource for TwitterApi {
    async fn fetch_page(
        &self,
        token: &AccessToken,
        request: &FavoritesRequest,
    ) -> Result<Vec<RawTweet>> {
        self.favorites(token, request).await
    }
}

/// Walk the favorites timeline backward from `start_cursor` (or the newest like).
///
/// Pages are requested one after another, each below the oldest id of the
/// previous one. An empty page ends the walk. A failed request also ends it,
/// with `truncated` set and the tweets gathered so far kept; it is not
/// retried.
pub async fn fetch_all<S: FavoritesSource + ?Sized>(
    source: &S,
    token: &AccessToken,
    start_cursor: Option<u64>,
    page_size: u32,
) -> FetchOutcome {
    let mut outcome = FetchOutcome {
        last_cursor: start_cursor,
        ..Default::default()
    };
    let mut max_id = start_cursor;
    // Oldest id seen from a page of this run; `max_id` is inclusive upstream.
    let mut floor: Option<u64> = None;

    loop {
        let request = FavoritesRequest {
            count: page_size,
            max_id,
        };

        let page = match source.fetch_page(token, &request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    "Favorites request {} failed, stopping pagination: {}",
                    outcome.request_count + 1,
                    e
                );
                outcome.truncated = true;
                outcome.error = Some(Error::Pagination {
                    cursor: outcome.last_cursor,
                    message: e.to_string(),
                });
                break;
            }
        };
        outcome.request_count += 1;

        let Some(last_id) = page.last().map(|t| t.id) else {
            tracing::debug!("Empty favorites page, end of timeline");
            break;
        };

        let fresh: Vec<RawTweet> = match floor {
            Some(floor) => page.into_iter().filter(|t| t.id < floor).collect(),
            None => page,
        };
        let kept = media_tweets(&fresh);
        tracing::debug!(
            "Page {}: {} tweets, {} with media, oldest id {}",
            outcome.request_count,
            fresh.len(),
            kept.len(),
            last_id
        );
        outcome.tweets.extend(kept);

        if floor.is_some_and(|floor| last_id >= floor) {
            tracing::warn!("Favorites cursor did not advance past {}, stopping", last_id);
            break;
        }
        floor = Some(last_id);
        outcome.last_cursor = Some(last_id);

        // max_id is inclusive upstream; step below the last id to avoid refetching it.
        match last_id.checked_sub(1) {
            Some(next) => max_id = Some(next),
            None => break,
        }
    }

    outcome
}
