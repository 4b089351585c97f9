//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Liked-tweets media exporter CLI.
#[derive(Parser, Debug)]
#[command(
    name = "likes-exporter",
    version,
    about = "Export media from your liked tweets",
    long_about = "Walks your liked tweets, keeps the ones carrying media, records them in a \
                  local JSON cache and downloads every new image or video.\n\n\
                  Reruns only fetch media for tweets not already in the cache."
)]
pub struct Args {
    /// Maximum number of media downloads in flight.
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Encrypted access-token file.
    #[arg(long = "oauth-file")]
    pub oauth_file: Option<PathBuf>,

    /// JSON cache of liked media tweets.
    #[arg(long = "cache-file")]
    pub cache_file: Option<PathBuf>,

    /// Directory receiving media files.
    #[arg(short = 'd', long = "media-dir")]
    pub media_dir: Option<PathBuf>,

    /// Resume pagination at this tweet id (printed by an interrupted run).
    #[arg(long = "resume-from")]
    pub resume_from: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Application consumer key.
    #[arg(long = "consumer-key", env = "CONSUMER_KEY")]
    pub consumer_key: Option<String>,

    /// Application consumer secret.
    #[arg(long = "consumer-secret", env = "CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: Option<String>,

    /// Passphrase protecting the access-token file.
    #[arg(long, env = "OAUTH_KEY", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Pause after each finished download, in milliseconds.
    #[arg(long = "download-delay-ms")]
    pub download_delay_ms: Option<u64>,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(key) = self.consumer_key {
            config.api.consumer_key = key;
        }

        if let Some(secret) = self.consumer_secret {
            config.api.consumer_secret = secret;
        }

        if let Some(passphrase) = self.passphrase {
            config.storage.passphrase = passphrase;
        }

        if let Some(path) = self.oauth_file {
            config.storage.credential_path = path;
        }

        if let Some(path) = self.cache_file {
            config.storage.cache_path = path;
        }

        if let Some(dir) = self.media_dir {
            config.storage.media_dir = dir;
        }

        if let Some(parallel) = self.parallel {
            config.options.parallel_downloads = parallel;
        }

        if let Some(delay) = self.download_delay_ms {
            config.options.download_delay_ms = delay;
        }

        if let Some(cursor) = self.resume_from {
            config.options.resume_cursor = Some(cursor);
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["likes-exporter"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--parallel",
            "8",
            "--cache-file",
            "likes.json",
            "--media-dir",
            "media",
            "--resume-from",
            "1234",
            "--quiet",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.options.parallel_downloads, 8);
        assert_eq!(config.storage.cache_path, PathBuf::from("likes.json"));
        assert_eq!(config.storage.media_dir, PathBuf::from("media"));
        assert_eq!(config.options.resume_cursor, Some(1234));
        assert!(!config.options.show_progress);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = parse(&["--config", "other.toml"]);
        let mut config = Config::default();
        config.options.parallel_downloads = 3;
        config.options.download_delay_ms = 0;
        args.merge_into_config(&mut config);

        assert_eq!(config.options.parallel_downloads, 3);
        assert_eq!(config.options.download_delay_ms, 0);
        assert_eq!(config.options.resume_cursor, None);
        assert!(config.options.show_progress);
    }

    #[test]
    fn test_rejects_non_numeric_cursor() {
        let argv = ["likes-exporter", "--resume-from", "abc"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
