//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, PodcastConfig, SourceKind};

/// Podcast sync CLI.
#[derive(Parser, Debug)]
#[command(
    name = "podcast-sync",
    version,
    about = "Mirror podcast episodes from RSS feeds and listing pages",
    long_about = "Downloads new podcast episodes into per-podcast folders.\n\n\
                  Already downloaded episodes are remembered in downloaded_ids.txt and \
                  new files are numbered in publish order: 001_Title.mp3, 002_Title.mp3, ..."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "podcasts.toml", env = "PODCAST_SYNC_CONFIG")]
    pub config: PathBuf,

    /// Sync a single RSS feed instead of the configured podcasts.
    #[arg(long, conflicts_with = "listing")]
    pub feed: Option<String>,

    /// Sync a single paginated listing page instead of the configured podcasts.
    #[arg(long)]
    pub listing: Option<String>,

    /// Name for the podcast given by --feed or --listing.
    #[arg(short, long, default_value = "podcast")]
    pub name: String,

    /// Target folder for the podcast given by --feed or --listing.
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Highest listing page to request.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory", env = "PODCAST_SYNC_DIR")]
    pub download_directory: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable TLS certificate verification.
    #[arg(long)]
    pub accept_invalid_certs: bool,

    /// List new episodes without downloading them.
    #[arg(long)]
    pub dry_run: bool,

    /// Hide progress bars and spinners.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Whether the podcast list comes from the command line.
    pub fn has_ad_hoc_podcast(&self) -> bool {
        self.feed.is_some() || self.listing.is_some()
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // An ad-hoc source replaces the configured podcasts
        let ad_hoc = match (self.feed, self.listing) {
            (Some(url), _) => Some((SourceKind::Feed, url)),
            (None, Some(url)) => Some((SourceKind::Listing, url)),
            (None, None) => None,
        };

        if let Some((kind, url)) = ad_hoc {
            let mut podcast = PodcastConfig::new(self.name, kind, url);
            podcast.target_folder = self.target;
            config.podcasts = vec![podcast];
        }

        if let Some(max_pages) = self.max_pages {
            for podcast in &mut config.podcasts {
                podcast.max_pages = max_pages;
            }
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(timeout) = self.timeout {
            config.options.request_timeout_secs = timeout;
            for podcast in &mut config.podcasts {
                podcast.request_timeout_secs = None;
            }
        }

        // Boolean flags (only override if set to non-default)
        if self.accept_invalid_certs {
            config.options.accept_invalid_certs = true;
        }

        if self.dry_run {
            config.options.dry_run = true;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
