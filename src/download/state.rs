//! Sync run statistics.

/// Per-podcast run statistics.
#[derive(Debug, Default, Clone)]
pub struct SyncState {
    pub podcast_name: String,

    /// Episodes the source listed.
    pub discovered: u64,
    /// Listed episodes already in the ledger (or repeated in the listing).
    pub skipped: u64,
    /// New episodes found in dry-run mode.
    pub pending: u64,

    pub downloaded: u64,
    pub failed: u64,
    pub renamed: u64,
    pub rename_failed: u64,
}

impl SyncState {
    /// Create an empty state for a podcast.
    pub fn new(podcast_name: impl Into<String>) -> Self {
        Self {
            podcast_name: podcast_name.into(),
            ..Default::default()
        }
    }

    /// Record a completed download.
    pub fn increment_downloaded(&mut self) {
        self.downloaded += 1;
    }

    /// Record an episode that could not be downloaded or recorded.
    pub fn increment_failed(&mut self) {
        self.failed += 1;
    }

    /// Record a sequenced file.
    pub fn increment_renamed(&mut self) {
        self.renamed += 1;
    }

    /// Record a downloaded file left under its staging name.
    pub fn increment_rename_failed(&mut self) {
        self.rename_failed += 1;
    }

    /// Whether any episode needs attention.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.rename_failed > 0
    }
}

/// Statistics across all podcasts of a run.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub discovered: u64,
    pub skipped: u64,
    pub pending: u64,
    pub downloaded: u64,
    pub failed: u64,
    pub podcasts_processed: u64,
    pub podcasts_failed: u64,
}

impl GlobalState {
    /// Add statistics from one podcast run.
    pub fn add_podcast_stats(&mut self, state: &SyncState) {
        self.discovered += state.discovered;
        self.skipped += state.skipped;
        self.pending += state.pending;
        self.downloaded += state.downloaded;
        self.failed += state.failed + state.rename_failed;
        self.podcasts_processed += 1;
    }

    /// Mark a podcast whose source could not be read.
    pub fn mark_podcast_failed(&mut self) {
        self.podcasts_failed += 1;
    }
}
