//! Source kind definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a podcast's episodes are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A standard RSS document with one item per episode (default).
    #[default]
    Feed,
    /// Paginated HTML listing pages with per-episode detail pages.
    Listing,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Feed => write!(f, "feed"),
            SourceKind::Listing => write!(f, "listing"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feed" | "rss" => Ok(SourceKind::Feed),
            "listing" | "html" => Ok(SourceKind::Listing),
            _ => Err(format!("Unknown source kind: {}", s)),
        }
    }
}
