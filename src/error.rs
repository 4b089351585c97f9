//! Error types for the likes-exporter application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Credential file error: {0}")]
    Crypto(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error(
        "Pagination stopped after cursor {}: {message}",
        .cursor.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    Pagination {
        cursor: Option<u64>,
        message: String,
    },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Unexpected file system entry at {path}: {message}")]
    FileSystem { path: String, message: String },

    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error must terminate the run.
    ///
    /// Pagination and single-download failures are absorbed by the pipeline.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Pagination { .. } | Error::Download(_) | Error::InvalidFilename(_)
        )
    }

    /// Process exit code for a fatal error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_)
            | Error::UrlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Authentication(_) | Error::Crypto(_) => exit_codes::AUTH_ERROR,
            Error::FileSystem { .. } | Error::Io(_) | Error::Json(_) => {
                exit_codes::FILESYSTEM_ERROR
            }
            Error::Api(_) | Error::Http(_) | Error::Pagination { .. } => exit_codes::API_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
    pub const AUTH_ERROR: i32 = 3;
    pub const FILESYSTEM_ERROR: i32 = 4;
    pub const API_ERROR: i32 = 5;
    pub const UNEXPECTED_ERROR: i32 = 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors_are_not_fatal() {
        let pagination = Error::Pagination {
            cursor: Some(90),
            message: "HTTP 503".into(),
        };
        assert!(!pagination.is_fatal());
        assert!(!Error::Download("timeout".into()).is_fatal());
    }

    #[test]
    fn test_fatal_error_exit_codes() {
        let auth = Error::Crypto("bad key".into());
        assert!(auth.is_fatal());
        assert_eq!(auth.exit_code(), exit_codes::AUTH_ERROR);

        let fs = Error::FileSystem {
            path: "response.json".into(),
            message: "is a directory".into(),
        };
        assert_eq!(fs.exit_code(), exit_codes::FILESYSTEM_ERROR);

        assert_eq!(
            Error::MissingConfig("passphrase".into()).exit_code(),
            exit_codes::CONFIG_ERROR
        );
    }

    #[test]
    fn test_pagination_message_includes_cursor() {
        let err = Error::Pagination {
            cursor: Some(90),
            message: "connection reset".into(),
        };
        assert_eq!(
            err.to_string(),
            "Pagination stopped after cursor 90: connection reset"
        );

        let first_page = Error::Pagination {
            cursor: None,
            message: "HTTP 503".into(),
        };
        assert_eq!(
            first_page.to_string(),
            "Pagination stopped after cursor none: HTTP 503"
        );
    }
}
