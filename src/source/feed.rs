//! RSS feed source.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::episode::{feed_id, Episode, MediaLocation};
use crate::error::{Error, Result};
use crate::source::client::Transport;
use crate::source::EpisodeSource;

/// Episode source backed by a single RSS document.
pub struct FeedSource {
    transport: Arc<dyn Transport>,
    url: String,
}

impl FeedSource {
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }
}

#[async_trait]
impl EpisodeSource for FeedSource {
    async fn list_episodes(&self) -> Result<Vec<Episode>> {
        let response = self
            .transport
            .get_page(&self.url)
            .await
            .map_err(|e| Error::Source(format!("{}: {}", self.url, e)))?;

        if !response.is_success() {
            return Err(Error::Source(format!(
                "{}: HTTP {}",
                self.url, response.status
            )));
        }

        parse_feed(&response.body)
    }

    async fn resolve_media_url(&self, episode: &Episode) -> Result<String> {
        match &episode.media {
            MediaLocation::Direct(url) => Ok(url.clone()),
            MediaLocation::DetailPage(_) => Err(Error::Extract(format!(
                "Feed episode {} has no direct media URL",
                episode.id
            ))),
        }
    }
}

/// Parse an RSS document into episodes.
///
/// Items without a title, a parseable publish date, or an enclosure URL are
/// skipped. A document that is not RSS at all is an error.
pub fn parse_feed(content: &[u8]) -> Result<Vec<Episode>> {
    let channel = rss::Channel::read_from(content)?;

    let episodes: Vec<Episode> = channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title().map(str::trim).filter(|t| !t.is_empty())?;
            let media_url = item
                .enclosure()
                .map(|enc| enc.url().trim())
                .filter(|url| !url.is_empty())?;

            let Some(published) = item.pub_date().and_then(parse_pub_date) else {
                tracing::debug!("Skipping '{}': missing or invalid pubDate", title);
                return None;
            };

            let Some(id) = feed_id(item.guid().map(|g| g.value()), media_url) else {
                tracing::debug!("Skipping '{}': no usable identifier", title);
                return None;
            };

            Some(Episode {
                id,
                title: title.to_string(),
                published,
                media: MediaLocation::Direct(media_url.to_string()),
            })
        })
        .collect();

    tracing::debug!(
        "Parsed {} of {} feed items",
        episodes.len(),
        channel.items().len()
    );

    Ok(episodes)
}

/// Parse an RSS publish date (RFC 2822, with RFC 3339 as a fallback).
pub fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::{FakeTransport, SAMPLE_FEED as FEED};
    use chrono::NaiveDate;

    #[test]
    fn test_parse_feed() {
        let episodes = parse_feed(FEED.as_bytes()).unwrap();
        assert_eq!(episodes.len(), 2);

        assert_eq!(episodes[0].id, "g1");
        assert_eq!(episodes[0].title, "Folge Eins!");
        assert_eq!(
            episodes[0].date(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(
            episodes[0].direct_url(),
            Some("https://cdn.example.com/eins.mp3")
        );
        assert_eq!(episodes[1].id, "g2");
    }

    #[test]
    fn test_guid_falls_back_to_enclosure() {
        let feed = r#"<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>
            <item>
              <title>No guid</title>
              <pubDate>Mon, 01 Jan 2024 06:00:00 +0000</pubDate>
              <enclosure url="https://cdn.example.com/x.mp3" length="1" type="audio/mpeg"/>
            </item>
        </channel></rss>"#;

        let episodes = parse_feed(feed.as_bytes()).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id, "https://cdn.example.com/x.mp3");
    }

    #[test]
    fn test_incomplete_items_skipped() {
        let feed = r#"<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>
            <item>
              <title>No enclosure</title>
              <pubDate>Mon, 01 Jan 2024 06:00:00 +0000</pubDate>
              <guid>a</guid>
            </item>
            <item>
              <title>No date</title>
              <guid>b</guid>
              <enclosure url="https://cdn.example.com/b.mp3" length="1" type="audio/mpeg"/>
            </item>
            <item>
              <pubDate>Mon, 01 Jan 2024 06:00:00 +0000</pubDate>
              <guid>c</guid>
              <enclosure url="https://cdn.example.com/c.mp3" length="1" type="audio/mpeg"/>
            </item>
            <item>
              <title>Garbage date</title>
              <pubDate>yesterday</pubDate>
              <guid>d</guid>
              <enclosure url="https://cdn.example.com/d.mp3" length="1" type="audio/mpeg"/>
            </item>
        </channel></rss>"#;

        assert!(parse_feed(feed.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_not_a_feed() {
        assert!(parse_feed(b"<html><body>Moved</body></html>").is_err());
    }

    #[test]
    fn test_parse_pub_date() {
        assert!(parse_pub_date("Thu, 01 Feb 2024 06:00:00 +0000").is_some());
        assert!(parse_pub_date("2024-02-01T06:00:00+01:00").is_some());
        assert!(parse_pub_date("01.02.2024").is_none());
    }

    #[test]
    fn test_feed_source_lists_episodes() {
        let transport = Arc::new(FakeTransport::new());
        transport.add_page("https://feeds.example.com/show", FEED);
        let source = FeedSource::new(transport, "https://feeds.example.com/show");

        let episodes = tokio_test::block_on(source.list_episodes()).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(
            tokio_test::block_on(source.resolve_media_url(&episodes[1])).unwrap(),
            "https://cdn.example.com/zwei.mp3"
        );
    }

    #[test]
    fn test_latin1_feed_titles_decoded() {
        let mut feed = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>
  <item>
    <title>"#
            .to_vec();
        feed.extend_from_slice(b"\xDCber M\xFCnchen");
        feed.extend_from_slice(
            br#"</title>
    <pubDate>Mon, 01 Jan 2024 06:00:00 +0000</pubDate>
    <guid>m1</guid>
    <enclosure url="https://cdn.example.com/m.mp3" length="1" type="audio/mpeg"/>
  </item>
</channel></rss>"#,
        );

        let transport = Arc::new(FakeTransport::new());
        transport.add_page_bytes("https://feeds.example.com/latin1", &feed);
        let source = FeedSource::new(transport, "https://feeds.example.com/latin1");

        let episodes = tokio_test::block_on(source.list_episodes()).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].title, "\u{DC}ber M\u{FC}nchen");
        assert_eq!(
            crate::fs::sanitize_title(&episodes[0].title, &[] as &[&str]),
            "\u{DC}ber_M\u{FC}nchen"
        );
    }

    #[test]
    fn test_feed_source_failures_are_structural() {
        let transport = Arc::new(FakeTransport::new());
        transport.add_status("https://feeds.example.com/gone", 410);
        transport.add_page("https://feeds.example.com/html", "<html></html>");

        for url in [
            "https://feeds.example.com/unreachable",
            "https://feeds.example.com/gone",
            "https://feeds.example.com/html",
        ] {
            let source = FeedSource::new(transport.clone(), url);
            let err = tokio_test::block_on(source.list_episodes()).unwrap_err();
            assert!(err.is_structural(), "{} gave {:?}", url, err);
        }
    }
}
