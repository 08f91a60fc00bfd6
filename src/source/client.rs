//! HTTP transport shared by all sources.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::OptionsConfig;
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// A fetched page: status code and raw body bytes.
///
/// The body is left undecoded so XML documents can honour their own
/// `encoding` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl PageResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8 text, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Network access used by sources and the download step.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a page. Non-success statuses are returned, not raised.
    async fn get_page(&self, url: &str) -> Result<PageResponse>;

    /// Download `url` to `path`, returning the number of bytes written.
    ///
    /// `path` only appears once every byte has been written.
    async fn download_to(&self, url: &str, path: &Path) -> Result<u64>;
}

/// reqwest-backed transport.
pub struct HttpClient {
    client: Client,
    request_timeout: Duration,
    show_progress: bool,
}

impl HttpClient {
    /// Build a client for one podcast run.
    pub fn new(options: &OptionsConfig, request_timeout: Duration) -> Result<Self> {
        if options.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .user_agent(&options.user_agent)
            .connect_timeout(request_timeout)
            .read_timeout(request_timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            request_timeout,
            show_progress: options.show_progress,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get_page(&self, url: &str) -> Result<PageResponse> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        let body = response.bytes().await?;
        Ok(PageResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }

    async fn download_to(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        let content_length = response.content_length();
        let progress = if self.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
        {
            Some(create_download_bar(content_length.unwrap_or(0)))
        } else {
            None
        };

        let part_path = part_path(path);
        let result = stream_to_file(response, &part_path, progress.as_ref()).await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        match result {
            Ok(written) => {
                tokio::fs::rename(&part_path, path).await?;
                Ok(written)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&part_path).await;
                Err(e)
            }
        }
    }
}

/// Stream a response body into `path`.
async fn stream_to_file(
    response: reqwest::Response,
    path: &Path,
    progress: Option<&indicatif::ProgressBar>,
) -> Result<u64> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(downloaded)
}

/// In-progress name for a download target.
pub fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
