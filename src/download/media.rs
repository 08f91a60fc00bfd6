//! Media file downloading.

use std::path::{Path, PathBuf};

use crate::episode::Episode;
use crate::error::{Error, Result};
use crate::fs::staging_path;
use crate::source::{EpisodeSource, Transport};

/// Download an episode's audio to its staging path inside `folder`.
///
/// An existing staging file from an interrupted run is replaced.
pub async fn download_episode(
    source: &dyn EpisodeSource,
    transport: &dyn Transport,
    folder: &Path,
    episode: &Episode,
) -> Result<PathBuf> {
    let url = source.resolve_media_url(episode).await?;
    let output_path = staging_path(folder, &episode.id);

    tracing::debug!("Downloading {} from {}", episode.id, url);
    let written = transport.download_to(&url, &output_path).await?;

    if written == 0 {
        let _ = std::fs::remove_file(&output_path);
        return Err(Error::Download(format!("Empty response from {}", url)));
    }

    tracing::debug!("Wrote {} bytes to {}", written, output_path.display());
    Ok(output_path)
}
