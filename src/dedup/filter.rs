//! Selection of episodes that still need downloading.

use std::collections::HashSet;

use crate::dedup::ledger::IdLedger;
use crate::episode::Episode;

/// Keep the episodes whose id is not in the ledger.
///
/// Repeated ids within `episodes` are dropped after their first occurrence.
/// The ledger itself is not modified.
pub fn filter_new(episodes: Vec<Episode>, ledger: &IdLedger) -> Vec<Episode> {
    let mut seen = HashSet::new();

    episodes
        .into_iter()
        .filter(|episode| {
            if ledger.contains(&episode.id) {
                return false;
            }
            if !seen.insert(episode.id.clone()) {
                tracing::debug!("Dropping repeated episode id {}", episode.id);
                return false;
            }
            true
        })
        .collect()
}
