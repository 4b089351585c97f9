//! Normalized tweet representation.
//!
//! These are the records persisted to the tweet cache. Field names on the
//! wire follow the upstream API so cache files written by earlier versions
//! load unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fs::naming::check_file_name;

/// Kind of media attachment.
///
/// Stored as the upstream `type` string; kinds this crate does not know are
/// kept verbatim so the cache round-trips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Photo,
    Video,
    AnimatedGif,
    Other(String),
}

impl MediaType {
    /// Map the upstream `type` string.
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "photo" => MediaType::Photo,
            "video" => MediaType::Video,
            "animated_gif" => MediaType::AnimatedGif,
            other => MediaType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
            MediaType::AnimatedGif => "animated_gif",
            MediaType::Other(kind) => kind,
        }
    }
}

impl From<String> for MediaType {
    fn from(kind: String) -> Self {
        MediaType::from_api(&kind)
    }
}

impl From<MediaType> for String {
    fn from(kind: MediaType) -> Self {
        match kind {
            MediaType::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// A media attachment of a tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,

    /// Location of the binary asset.
    pub media_url: String,

    /// Link to the page showing the media.
    #[serde(rename = "url", default)]
    pub page_url: String,

    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl MediaItem {
    /// File name on disk: the final path segment of `media_url`.
    pub fn file_name(&self) -> Result<String> {
        file_name_from_url(&self.media_url)
    }
}

/// Derive a flat, safe file name from the last path segment of a URL.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidFilename(format!("No file name in URL: {}", url)))?;
    check_file_name(segment).map(str::to_string)
}

/// Author of a tweet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "screen_name")]
    pub handle: String,
}

/// A liked tweet in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(rename = "user", default)]
    pub author: Author,
    #[serde(rename = "lang", default)]
    pub language: String,
}

impl Tweet {
    /// True iff the tweet carries at least one media attachment.
    pub fn is_media_bearing(&self) -> bool {
        !self.media.is_empty()
    }
}
