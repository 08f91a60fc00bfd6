//! In-memory transport for tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::source::client::{PageResponse, Transport};

/// Two-episode feed used across tests.
pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Augen zu</title>
    <link>https://example.com</link>
    <description>Test feed</description>
    <item>
      <title>Folge Eins!</title>
      <pubDate>Thu, 01 Feb 2024 06:00:00 +0000</pubDate>
      <guid isPermaLink="false">g1</guid>
      <enclosure url="https://cdn.example.com/eins.mp3" length="1" type="audio/mpeg"/>
    </item>
    <item>
      <title>Folge: Zwei</title>
      <pubDate>Mon, 01 Jan 2024 06:00:00 +0000</pubDate>
      <guid isPermaLink="false">g2</guid>
      <enclosure url="https://cdn.example.com/zwei.mp3" length="1" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

/// Transport serving canned pages and media bodies.
///
/// Unknown page URLs fail like an unreachable host; unknown media URLs fail
/// like a 404.
#[derive(Default)]
pub struct FakeTransport {
    pages: Mutex<HashMap<String, PageResponse>>,
    media: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&self, url: &str, body: &str) {
        self.add_page_bytes(url, body.as_bytes());
    }

    pub fn add_page_bytes(&self, url: &str, body: &[u8]) {
        self.pages.lock().unwrap().insert(
            url.to_string(),
            PageResponse {
                status: 200,
                body: body.to_vec(),
            },
        );
    }

    pub fn add_status(&self, url: &str, status: u16) {
        self.pages.lock().unwrap().insert(
            url.to_string(),
            PageResponse {
                status,
                body: Vec::new(),
            },
        );
    }

    pub fn add_media(&self, url: &str, bytes: &[u8]) {
        self.media
            .lock()
            .unwrap()
            .insert(url.to_string(), bytes.to_vec());
    }

    pub fn remove_media(&self, url: &str) {
        self.media.lock().unwrap().remove(url);
    }

    /// Every URL requested so far, pages and media alike.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Media URLs whose download was attempted.
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_page(&self, url: &str) -> Result<PageResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.lock().unwrap().get(url).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("no route to {}", url),
            ))
        })
    }

    async fn download_to(&self, url: &str, path: &Path) -> Result<u64> {
        self.requests.lock().unwrap().push(url.to_string());
        self.downloads.lock().unwrap().push(url.to_string());
        let bytes = self
            .media
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Download("Failed to download file: HTTP 404".to_string()))?;

        std::fs::write(path, &bytes)?;
        Ok(bytes.len() as u64)
    }
}
