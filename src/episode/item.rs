//! Episode representation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Where an episode's audio can be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLocation {
    /// Absolute URL of the audio file.
    Direct(String),
    /// Detail page that embeds the audio URL.
    DetailPage(String),
}

/// One podcast installment, normalized across sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Stable, source-specific identifier.
    pub id: String,

    /// Raw display title.
    pub title: String,

    /// Publish time. Listing pages only carry a date, stored as midnight UTC.
    pub published: DateTime<Utc>,

    /// Where the audio comes from.
    pub media: MediaLocation,
}

impl Episode {
    /// Create an episode published on a calendar date.
    pub fn on_date(
        id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        media: MediaLocation,
    ) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        Self {
            id: id.into(),
            title: title.into(),
            published: Utc.from_utc_datetime(&midnight),
            media,
        }
    }

    /// Calendar date of publication.
    pub fn date(&self) -> NaiveDate {
        self.published.date_naive()
    }

    /// The media URL, if the source provided one directly.
    pub fn direct_url(&self) -> Option<&str> {
        match &self.media {
            MediaLocation::Direct(url) => Some(url),
            MediaLocation::DetailPage(_) => None,
        }
    }
}
