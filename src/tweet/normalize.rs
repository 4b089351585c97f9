//! Mapping from raw API tweets to the normalized shape.

use crate::api::types::RawTweet;
use crate::tweet::item::{Author, MediaItem, MediaType, Tweet};

/// Normalize a raw favorites record.
///
/// Absent optional sections become empty values rather than errors.
pub fn normalize(raw: &RawTweet) -> Tweet {
    let hashtags = raw
        .entities
        .as_ref()
        .and_then(|e| e.hashtags.as_ref())
        .map(|tags| tags.iter().map(|t| t.text.clone()).collect())
        .unwrap_or_default();

    let media = raw
        .extended_entities
        .as_ref()
        .and_then(|e| e.media.as_ref())
        .map(|items| {
            items
                .iter()
                .map(|m| MediaItem {
                    id: m.id,
                    media_url: m.media_url.clone(),
                    page_url: m.url.clone(),
                    media_type: MediaType::from_api(&m.kind),
                })
                .collect()
        })
        .unwrap_or_default();

    let author = raw
        .user
        .as_ref()
        .map(|u| Author {
            id: u.id,
            display_name: u.name.clone(),
            handle: u.screen_name.clone(),
        })
        .unwrap_or_default();

    Tweet {
        id: raw.id,
        text: raw.text.clone().unwrap_or_default(),
        hashtags,
        media,
        author,
        language: raw.lang.clone().unwrap_or_default(),
    }
}

/// Normalize a page and keep only media-bearing tweets, preserving order.
pub fn media_tweets(page: &[RawTweet]) -> Vec<Tweet> {
    page.iter()
        .map(normalize)
        .filter(Tweet::is_media_bearing)
        .collect()
}
