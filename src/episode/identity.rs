//! Stable episode identifiers.
//!
//! Identifiers are written one per line to the ledger, so they must be
//! non-empty single-line strings and re-derive identically on every run.

use regex::Regex;

/// Normalize a candidate identifier. Returns `None` if it cannot be stored.
pub fn normalize_id(raw: &str) -> Option<String> {
    let id = raw.trim();
    if id.is_empty() || id.contains(['\n', '\r']) {
        return None;
    }
    Some(id.to_string())
}

/// Extract a listing episode id from its detail-page URL.
///
/// `pattern` must have the id in capture group 1.
pub fn listing_id(detail_url: &str, pattern: &Regex) -> Option<String> {
    let captures = pattern.captures(detail_url)?;
    normalize_id(captures.get(1)?.as_str())
}

/// Feed episode id: the item's GUID, or its media URL when the GUID is absent.
pub fn feed_id(guid: Option<&str>, media_url: &str) -> Option<String> {
    guid.and_then(normalize_id)
        .or_else(|| normalize_id(media_url))
}
