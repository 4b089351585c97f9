//! Configuration validation logic.

use url::Url;

use crate::config::loader::{Config, MAX_PAGE_SIZE};
use crate::error::{Error, Result};

/// Validate the entire configuration.
///
/// Runs before any network or file I/O so that a bad setup fails fast.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_consumer(&config.api.consumer_key, &config.api.consumer_secret)?;
    validate_base_url("api_base", &config.api.api_base)?;
    validate_base_url("oauth_base", &config.api.oauth_base)?;
    validate_passphrase(&config.storage.passphrase)?;
    validate_parallelism(config.options.parallel_downloads)?;
    validate_page_size(config.options.page_size)?;

    Ok(())
}

/// Validate the application key and secret.
pub fn validate_consumer(key: &str, secret: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::MissingConfig(
            "consumer_key (set CONSUMER_KEY or --consumer-key)".to_string(),
        ));
    }
    if secret.trim().is_empty() {
        return Err(Error::MissingConfig(
            "consumer_secret (set CONSUMER_SECRET or --consumer-secret)".to_string(),
        ));
    }
    Ok(())
}

/// Validate the credential-file passphrase.
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(Error::MissingConfig(
            "passphrase (set OAUTH_KEY or --passphrase)".to_string(),
        ));
    }
    Ok(())
}

/// Validate the download concurrency limit.
pub fn validate_parallelism(parallel: usize) -> Result<()> {
    if parallel == 0 {
        return Err(Error::ConfigValidation {
            field: "parallel_downloads".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Validate the favorites page size.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, page_size
            ),
        });
    }
    Ok(())
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(())
}
