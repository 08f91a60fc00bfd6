//! Episode sources.
//!
//! This module provides:
//! - The HTTP transport
//! - The paginated listing source
//! - The RSS feed source

pub mod client;
pub mod feed;
pub mod listing;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{PodcastConfig, SourceKind};
use crate::episode::Episode;
use crate::error::Result;

pub use client::{HttpClient, PageResponse, Transport};
pub use feed::{parse_feed, FeedSource};
pub use listing::{ListingSource, MarkupExtractor, SelectorExtractor};

/// Produces normalized episodes from one remote source.
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Every episode the source currently lists.
    ///
    /// Fails only when the source cannot be read at all.
    async fn list_episodes(&self) -> Result<Vec<Episode>>;

    /// Absolute URL of an episode's audio.
    async fn resolve_media_url(&self, episode: &Episode) -> Result<String>;
}

/// Build the source configured for a podcast.
pub fn build_source(
    podcast: &PodcastConfig,
    transport: Arc<dyn Transport>,
    page_delay: Duration,
) -> Result<Box<dyn EpisodeSource>> {
    let source: Box<dyn EpisodeSource> = match podcast.source_kind {
        SourceKind::Feed => Box::new(FeedSource::new(
            transport,
            podcast.source_locator.trim(),
        )),
        SourceKind::Listing => Box::new(ListingSource::new(transport, podcast, page_delay)?),
    };
    Ok(source)
}
