//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::{Config, PodcastConfig};
use crate::fs::naming::staging_filename;

/// Name of the downloaded-id ledger inside each target folder.
pub const LEDGER_FILENAME: &str = "downloaded_ids.txt";

/// Get the target folder for a podcast.
pub fn get_podcast_folder(config: &Config, podcast: &PodcastConfig) -> PathBuf {
    config.download_directory().join(podcast.target_folder())
}

/// Path of the ledger file inside a target folder.
pub fn ledger_path(folder: &Path) -> PathBuf {
    folder.join(LEDGER_FILENAME)
}

/// Path an episode is downloaded to before sequencing.
pub fn staging_path(folder: &Path, id: &str) -> PathBuf {
    folder.join(staging_filename(id))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;

    #[test]
    fn test_get_podcast_folder() {
        let mut config = Config::default();
        config.options.download_directory = Some(PathBuf::from("/downloads"));

        let mut podcast =
            PodcastConfig::new("Augen_Zu", SourceKind::Feed, "https://example.com/feed");
        assert_eq!(
            get_podcast_folder(&config, &podcast),
            PathBuf::from("/downloads/downloads_Augen_Zu")
        );

        podcast.target_folder = Some(PathBuf::from("augen"));
        assert_eq!(
            get_podcast_folder(&config, &podcast),
            PathBuf::from("/downloads/augen")
        );
    }

    #[test]
    fn test_ledger_and_staging_paths() {
        let folder = Path::new("/downloads/show");
        assert_eq!(
            ledger_path(folder),
            PathBuf::from("/downloads/show/downloaded_ids.txt")
        );
        assert!(staging_path(folder, "g1").starts_with(folder));
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Idempotent
        ensure_dir(&nested).unwrap();
    }
}
