//! podcast-sync - mirror podcast episodes to disk
//!
//! This library discovers episodes from an RSS feed or from paginated listing
//! pages, downloads the ones not seen before, and names them in publish order.
//!
//! # Features
//!
//! - RSS feeds with GUID (or enclosure URL) based identity
//! - Paginated HTML listings with configurable selectors
//! - Append-only ledger of downloaded ids (`downloaded_ids.txt`)
//! - Date-ordered, continuously numbered filenames (`001_Title.mp3`)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use podcast_sync::{sync_podcast, Config, HttpClient, Transport};
//! use podcast_sync::fs::get_podcast_folder;
//! use podcast_sync::source::build_source;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("podcasts.toml"))?;
//!     let podcast = &config.podcasts[0];
//!     let timeout = podcast.request_timeout(&config.options);
//!     let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&config.options, timeout)?);
//!     let source = build_source(podcast, transport.clone(), Duration::from_secs(1))?;
//!
//!     let folder = get_podcast_folder(&config, podcast);
//!     let state = sync_podcast(
//!         source.as_ref(),
//!         transport.as_ref(),
//!         &config.options,
//!         podcast,
//!         &folder,
//!     )
//!     .await?;
//!     println!("{} new episodes", state.downloaded);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod episode;
pub mod error;
pub mod fs;
pub mod output;
pub mod source;

// Re-exports for convenience
pub use config::{Config, PodcastConfig, SourceKind};
pub use dedup::IdLedger;
pub use download::{sync_podcast, GlobalState, SyncState};
pub use episode::{Episode, MediaLocation};
pub use error::{Error, Result};
pub use source::{EpisodeSource, HttpClient, Transport};
