//! Filename generation for downloaded episodes.

use md5::{Digest, Md5};

use crate::error::{Error, Result};

/// Extension of every saved episode.
pub const MEDIA_EXTENSION: &str = "mp3";

/// Prefix of files that are downloaded but not yet sequenced.
pub const STAGING_PREFIX: &str = "pending_";

/// Map a display title to a filesystem-safe token.
///
/// Drops any of `suffixes` from the end of the title, removes everything that
/// is not alphanumeric, whitespace, underscore or hyphen, and joins the
/// remaining words with single underscores. Never fails; degenerate input
/// yields an empty string.
pub fn sanitize_title<S: AsRef<str>>(title: &str, suffixes: &[S]) -> String {
    let mut text = title.trim();

    loop {
        let before = text.len();
        for suffix in suffixes {
            let suffix = suffix.as_ref();
            if suffix.is_empty() {
                continue;
            }
            if let Some(rest) = text.strip_suffix(suffix) {
                text = rest.trim_end();
            }
        }
        if text.len() == before {
            break;
        }
    }

    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Final name of a sequenced episode, e.g. `001_Folge_Eins.mp3`.
pub fn sequenced_filename(index: usize, sanitized_title: &str) -> String {
    format!("{:03}_{}.{}", index, sanitized_title, MEDIA_EXTENSION)
}

/// Temporary name of a downloaded episode, keyed by its id.
///
/// Ids can be URLs, so they are hashed rather than embedded.
pub fn staging_filename(id: &str) -> String {
    let digest = Md5::digest(id.as_bytes());
    format!("{}{:x}.{}", STAGING_PREFIX, digest, MEDIA_EXTENSION)
}

/// Whether a filename was produced by [`staging_filename`].
pub fn is_staging_filename(filename: &str) -> bool {
    filename.starts_with(STAGING_PREFIX) && filename.ends_with(&format!(".{}", MEDIA_EXTENSION))
}

/// Sanitize a path component (folder name) for use under the download directory.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    // Sanitize problematic characters (replace with underscore)
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Reject empty or whitespace-only names
    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}
