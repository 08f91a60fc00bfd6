//! Error types for the podcast-sync application.

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

    // Source errors
    #[error("Source unavailable: {0}")]
    Source(String),

    #[error("Could not extract episode data: {0}")]
    Extract(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("{0} podcast(s) failed")]
    PodcastsFailed(u64),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Feed parse error: {0}")]
    Feed(#[from] rss::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this error ends a whole podcast run rather than a single episode.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::Source(_)
                | Error::Feed(_)
                | Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const SOURCE_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_PODCASTS_FAILED: i32 = 6;
}
