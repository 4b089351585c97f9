//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Largest page the favorites endpoint will serve.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Application credentials and endpoint locations.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Application (consumer) key used for request signing.
    #[serde(default)]
    pub consumer_key: String,

    /// Application (consumer) secret used for request signing.
    #[serde(default)]
    pub consumer_secret: String,

    /// Base URL of the REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL of the OAuth handshake endpoints.
    #[serde(default = "default_api_base")]
    pub oauth_base: String,
}

/// On-disk locations.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Encrypted access-token file.
    #[serde(default = "default_credential_path")]
    pub credential_path: PathBuf,

    /// JSON cache of every known media tweet.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Flat directory receiving media files.
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Passphrase the credential-file key is derived from.
    #[serde(default)]
    pub passphrase: String,
}

/// Run options.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Maximum number of downloads in flight.
    #[serde(default = "default_parallel_downloads")]
    pub parallel_downloads: usize,

    /// Tweets requested per favorites page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pause after each finished download, in milliseconds.
    #[serde(default = "default_download_delay_ms")]
    pub download_delay_ms: u64,

    /// Start pagination at this id instead of the newest like.
    #[serde(default)]
    pub resume_cursor: Option<u64>,

    /// Whether to draw progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            api_base: default_api_base(),
            oauth_base: default_api_base(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credential_path: default_credential_path(),
            cache_path: default_cache_path(),
            media_dir: default_media_dir(),
            passphrase: String::new(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            parallel_downloads: default_parallel_downloads(),
            page_size: default_page_size(),
            download_delay_ms: default_download_delay_ms(),
            resume_cursor: None,
            show_progress: true,
        }
    }
}

impl OptionsConfig {
    /// The politeness delay as a `Duration`.
    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

fn default_credential_path() -> PathBuf {
    PathBuf::from("oauth.b64.enc")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("response.json")
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("img")
}

fn default_parallel_downloads() -> usize {
    4
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_download_delay_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
