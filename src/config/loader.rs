//! Configuration structures and loading logic.

use crate::config::modes::SourceKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub podcasts: Vec<PodcastConfig>,
}

/// Options shared by every podcast in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory that holds each podcast's target folder.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Upper bound for a single request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Base pause between listing pages, in milliseconds.
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Skip TLS certificate verification. Never enable this unless a source
    /// is known to serve a broken chain.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to show spinners and download progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// List new episodes without downloading anything.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            request_timeout_secs: default_request_timeout(),
            page_delay_ms: default_page_delay(),
            accept_invalid_certs: false,
            user_agent: default_user_agent(),
            show_progress: true,
            dry_run: false,
        }
    }
}

/// One podcast to keep in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastConfig {
    /// Display name, also used for the default target folder.
    pub name: String,

    #[serde(default)]
    pub source_kind: SourceKind,

    /// Feed URL, or the listing page URL without pagination parameters.
    pub source_locator: String,

    /// Target folder; relative paths resolve against the download directory.
    #[serde(default)]
    pub target_folder: Option<PathBuf>,

    /// Highest listing page to request.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-podcast override of `options.request_timeout_secs`.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Trailing title phrases to drop before building filenames.
    #[serde(default)]
    pub strip_suffixes: Option<Vec<String>>,

    #[serde(default)]
    pub markup: MarkupConfig,
}

/// Selectors and patterns used to read the listing site's markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// One element per episode on a listing page.
    pub row: String,
    /// Link to the episode's detail page, inside a row.
    pub link: String,
    /// Element holding the publish date, inside a row.
    pub date: String,
    /// Element holding the title, inside a row.
    pub title: String,
    /// Regex over the detail link; capture group 1 is the episode id.
    pub id_pattern: String,
    /// chrono format of the date text.
    pub date_format: String,
    /// Regex matching the media URL inside a detail page.
    pub media_pattern: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            row: "tr._1nfXuX".to_string(),
            link: "a[href*='/listen/podcast/']".to_string(),
            date: "td.CQO7ZI".to_string(),
            title: "h3._1qKON5".to_string(),
            id_pattern: r"/listen/podcast/(\d+)".to_string(),
            date_format: "%b %d, %Y".to_string(),
            media_pattern: r#"https://zeitonline[^"]+\.mp3"#.to_string(),
        }
    }
}

fn default_request_timeout() -> u64 {
    15
}

fn default_page_delay() -> u64 {
    1000
}

fn default_max_pages() -> u32 {
    49
}

fn default_user_agent() -> String {
    concat!("podcast-sync/", env!("CARGO_PKG_VERSION")).to_string()
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
                    "Configuration file not found: {}. Create one from podcasts.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl PodcastConfig {
    /// Create a podcast entry with default settings.
    pub fn new(name: impl Into<String>, source_kind: SourceKind, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_kind,
            source_locator: locator.into(),
            target_folder: None,
            max_pages: default_max_pages(),
            request_timeout_secs: None,
            strip_suffixes: None,
            markup: MarkupConfig::default(),
        }
    }

    /// Effective request timeout for this podcast.
    pub fn request_timeout(&self, options: &OptionsConfig) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(options.request_timeout_secs),
        )
    }

    /// Title suffixes to strip; listing titles carry a call-to-action by default.
    pub fn title_suffixes(&self) -> Vec<String> {
        match (&self.strip_suffixes, self.source_kind) {
            (Some(suffixes), _) => suffixes.clone(),
            (None, SourceKind::Listing) => vec!["anhören".to_string()],
            (None, SourceKind::Feed) => Vec::new(),
        }
    }

    /// Target folder name relative to the download directory.
    pub fn target_folder(&self) -> PathBuf {
        self.target_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("downloads_{}", self.name)))
    }
}
