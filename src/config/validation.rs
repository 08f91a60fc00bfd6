//! Configuration validation logic.

use std::path::Component;

use url::Url;

use crate::config::loader::{Config, PodcastConfig};
use crate::config::modes::SourceKind;
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_path_component;
use crate::source::listing::SelectorExtractor;

/// Highest accepted listing page bound.
const MAX_PAGES_LIMIT: u32 = 1000;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.podcasts.is_empty() {
        return Err(Error::MissingConfig(
            "podcasts (at least one podcast entry required)".to_string(),
        ));
    }

    if config.options.request_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_secs".to_string(),
            message: "Timeout must be greater than zero".to_string(),
        });
    }

    for podcast in &config.podcasts {
        validate_podcast(podcast)?;
    }

    Ok(())
}

/// Validate a single podcast entry.
pub fn validate_podcast(podcast: &PodcastConfig) -> Result<()> {
    sanitize_path_component(&podcast.name).map_err(|e| Error::ConfigValidation {
        field: "name".to_string(),
        message: e.to_string(),
    })?;

    validate_locator(&podcast.source_locator)?;
    validate_target_folder(podcast)?;

    if podcast.request_timeout_secs == Some(0) {
        return Err(Error::ConfigValidation {
            field: "request_timeout_secs".to_string(),
            message: format!("Timeout for '{}' must be greater than zero", podcast.name),
        });
    }

    if podcast.source_kind == SourceKind::Listing {
        if podcast.max_pages == 0 || podcast.max_pages > MAX_PAGES_LIMIT {
            return Err(Error::ConfigValidation {
                field: "max_pages".to_string(),
                message: format!(
                    "max_pages for '{}' must be between 1 and {} (got {})",
                    podcast.name, MAX_PAGES_LIMIT, podcast.max_pages
                ),
            });
        }

        // Compiles every selector and pattern
        SelectorExtractor::new(&podcast.markup)?;
    }

    Ok(())
}

/// Validate a source locator: absolute http(s) URL.
pub fn validate_locator(locator: &str) -> Result<Url> {
    let url = Url::parse(locator.trim()).map_err(|e| Error::ConfigValidation {
        field: "source_locator".to_string(),
        message: format!("'{}' is not a valid URL: {}", locator, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: "source_locator".to_string(),
            message: format!("Unsupported URL scheme '{}' in '{}'", url.scheme(), locator),
        });
    }

    Ok(url)
}

/// Reject target folders that climb out of the download directory.
fn validate_target_folder(podcast: &PodcastConfig) -> Result<()> {
    let folder = podcast.target_folder();

    if folder
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::ConfigValidation {
            field: "target_folder".to_string(),
            message: format!(
                "Path traversal detected in target folder '{}'",
                folder.display()
            ),
        });
    }

    if folder.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "target_folder".to_string(),
            message: "Target folder cannot be empty".to_string(),
        });
    }

    Ok(())
}
