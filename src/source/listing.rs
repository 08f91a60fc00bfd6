//! Paginated HTML listing source.
//!
//! Listing pages are requested newest first as `<locator>?page=N&sort=desc`.
//! Each row links to a detail page that embeds the audio URL. Markup access
//! goes through [`MarkupExtractor`], so a redesign of the site only needs new
//! selectors, not pipeline changes. Scraping is inherently tied to the site's
//! current markup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use url::Url;

use crate::config::{MarkupConfig, PodcastConfig};
use crate::episode::{listing_id, Episode, MediaLocation};
use crate::error::{Error, Result};
use crate::source::client::Transport;
use crate::source::EpisodeSource;

/// Reads episode records out of listing and detail page markup.
pub trait MarkupExtractor: Send + Sync {
    /// Episodes on one listing page. Incomplete rows are skipped.
    fn extract_episodes(&self, html: &str, base: &Url) -> Vec<Episode>;

    /// Audio URL embedded in a detail page.
    fn extract_media_url(&self, html: &str) -> Option<String>;
}

/// CSS selector and regex based extractor.
#[derive(Debug)]
pub struct SelectorExtractor {
    row: Selector,
    link: Selector,
    date: Selector,
    title: Selector,
    id_pattern: Regex,
    date_format: String,
    media_pattern: Regex,
}

impl SelectorExtractor {
    /// Compile the selectors and patterns of a markup configuration.
    pub fn new(markup: &MarkupConfig) -> Result<Self> {
        Ok(Self {
            row: parse_selector("markup.row", &markup.row)?,
            link: parse_selector("markup.link", &markup.link)?,
            date: parse_selector("markup.date", &markup.date)?,
            title: parse_selector("markup.title", &markup.title)?,
            id_pattern: Regex::new(&markup.id_pattern)?,
            date_format: markup.date_format.clone(),
            media_pattern: Regex::new(&markup.media_pattern)?,
        })
    }

    fn extract_row(&self, row: ElementRef<'_>, base: &Url) -> Option<Episode> {
        let href = row.select(&self.link).next()?.value().attr("href")?;
        let date_text = element_text(row.select(&self.date).next()?);
        let title = element_text(row.select(&self.title).next()?);

        let Some(id) = listing_id(href, &self.id_pattern) else {
            tracing::debug!("No episode id in link {}", href);
            return None;
        };

        let date = match NaiveDate::parse_from_str(&date_text, &self.date_format) {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!("Skipping episode {}: bad date '{}': {}", id, date_text, e);
                return None;
            }
        };

        let detail_url = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping episode {}: bad link '{}': {}", id, href, e);
                return None;
            }
        };

        Some(Episode::on_date(
            id,
            title,
            date,
            MediaLocation::DetailPage(detail_url.to_string()),
        ))
    }
}

impl MarkupExtractor for SelectorExtractor {
    fn extract_episodes(&self, html: &str, base: &Url) -> Vec<Episode> {
        let document = Html::parse_document(html);

        document
            .select(&self.row)
            .filter_map(|row| self.extract_row(row, base))
            .collect()
    }

    fn extract_media_url(&self, html: &str) -> Option<String> {
        self.media_pattern
            .find(html)
            .map(|m| m.as_str().to_string())
    }
}

fn parse_selector(field: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("Invalid selector '{}': {:?}", css, e),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Episode source backed by paginated listing pages.
pub struct ListingSource {
    transport: Arc<dyn Transport>,
    base: Url,
    max_pages: u32,
    page_delay: Duration,
    extractor: Box<dyn MarkupExtractor>,
}

impl ListingSource {
    /// Create a listing source using the podcast's markup configuration.
    pub fn new(
        transport: Arc<dyn Transport>,
        podcast: &PodcastConfig,
        page_delay: Duration,
    ) -> Result<Self> {
        let extractor = SelectorExtractor::new(&podcast.markup)?;
        Self::with_extractor(transport, podcast, page_delay, Box::new(extractor))
    }

    /// Create a listing source with a custom extractor.
    pub fn with_extractor(
        transport: Arc<dyn Transport>,
        podcast: &PodcastConfig,
        page_delay: Duration,
        extractor: Box<dyn MarkupExtractor>,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            base: Url::parse(podcast.source_locator.trim())?,
            max_pages: podcast.max_pages,
            page_delay,
            extractor,
        })
    }

    /// URL of a listing page (1-based).
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("sort", "desc");
        url.to_string()
    }

    fn jittered_delay(&self) -> Duration {
        let base_ms = self.page_delay.as_millis() as u64;
        let jitter_ms = rand::thread_rng().gen_range(0..=base_ms / 2);
        Duration::from_millis(base_ms + jitter_ms)
    }
}

#[async_trait]
impl EpisodeSource for ListingSource {
    async fn list_episodes(&self) -> Result<Vec<Episode>> {
        let mut episodes = Vec::new();

        for page in 1..=self.max_pages {
            if page > 1 && !self.page_delay.is_zero() {
                sleep(self.jittered_delay()).await;
            }

            let url = self.page_url(page);
            tracing::info!("Scanning listing page {}", page);

            let response = match self.transport.get_page(&url).await {
                Ok(response) => response,
                Err(e) if page == 1 => {
                    return Err(Error::Source(format!("{}: {}", url, e)));
                }
                Err(e) => {
                    tracing::warn!("Stopping at listing page {}: {}", page, e);
                    break;
                }
            };

            if !response.is_success() {
                if page == 1 {
                    return Err(Error::Source(format!(
                        "{}: HTTP {}",
                        url, response.status
                    )));
                }
                tracing::debug!("Listing page {} returned HTTP {}", page, response.status);
                break;
            }

            let found = self.extractor.extract_episodes(&response.text(), &self.base);
            if found.is_empty() {
                tracing::debug!("No episodes on listing page {}", page);
                break;
            }

            tracing::debug!("Found {} episodes on page {}", found.len(), page);
            episodes.extend(found);
        }

        Ok(episodes)
    }

    async fn resolve_media_url(&self, episode: &Episode) -> Result<String> {
        let detail_url = match &episode.media {
            MediaLocation::Direct(url) => return Ok(url.clone()),
            MediaLocation::DetailPage(url) => url,
        };

        let response = self.transport.get_page(detail_url).await?;
        if !response.is_success() {
            return Err(Error::Extract(format!(
                "Detail page for {} returned HTTP {}",
                episode.id, response.status
            )));
        }

        self.extractor
            .extract_media_url(&response.text())
            .ok_or_else(|| Error::Extract(format!("No media link on detail page for {}", episode.id)))
    }
}
