//! One sync pass for a podcast: discover, filter, download, record, sequence.

use std::path::Path;

use crate::config::{OptionsConfig, PodcastConfig};
use crate::dedup::{filter_new, IdLedger};
use crate::download::media::download_episode;
use crate::download::state::SyncState;
use crate::error::Result;
use crate::fs::{
    apply_rename, assign_filenames, ensure_dir, is_staging_filename, ledger_path, StagedDownload,
};
use crate::output::{create_spinner, print_info, print_success, print_warning};
use crate::source::{EpisodeSource, Transport};

/// Bring `folder` up to date with `source`.
///
/// Only a source that cannot be read at all fails the run. Episodes that fail
/// to download are logged, left out of the ledger and retried next run. An id
/// is appended to the ledger only after its file is completely on disk.
///
/// New files are numbered after the episodes already in the ledger, so the
/// first episode of an empty folder is `001`.
pub async fn sync_podcast(
    source: &dyn EpisodeSource,
    transport: &dyn Transport,
    options: &OptionsConfig,
    podcast: &PodcastConfig,
    folder: &Path,
) -> Result<SyncState> {
    let mut state = SyncState::new(podcast.name.clone());

    // A dry run leaves the filesystem untouched
    if !options.dry_run {
        ensure_dir(folder)?;
        warn_about_leftovers(folder);
    }

    let mut ledger = IdLedger::load(&ledger_path(folder))?;
    let prior_count = ledger.len();

    let spinner = options
        .show_progress
        .then(|| create_spinner(&format!("Reading {} source...", podcast.source_kind)));
    let listed = source.list_episodes().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let episodes = listed?;

    state.discovered = episodes.len() as u64;
    let mut new_episodes = filter_new(episodes, &ledger);
    state.skipped = state.discovered - new_episodes.len() as u64;

    // Oldest first; stable for equal dates
    new_episodes.sort_by_key(|e| e.published);

    print_info(&format!(
        "{}: {} episodes listed, {} new",
        podcast.name,
        state.discovered,
        new_episodes.len()
    ));

    if options.dry_run {
        for episode in &new_episodes {
            print_info(&format!(
                "  would download {} ({}) [{}]",
                episode.title,
                episode.date(),
                episode.id
            ));
        }
        state.pending = new_episodes.len() as u64;
        return Ok(state);
    }

    let mut staged = Vec::new();

    for episode in new_episodes {
        let staged_path = match download_episode(source, transport, folder, &episode).await {
            Ok(path) => path,
            Err(e) => {
                print_warning(&format!("Skipping '{}': {}", episode.title, e));
                state.increment_failed();
                continue;
            }
        };

        if let Err(e) = ledger.append(&episode.id) {
            // Unrecorded bytes would be sequenced now and downloaded again next run
            print_warning(&format!(
                "Could not record '{}' in {}: {}",
                episode.title,
                ledger.path().display(),
                e
            ));
            let _ = std::fs::remove_file(&staged_path);
            state.increment_failed();
            continue;
        }

        tracing::debug!("Recorded {}", episode.id);
        state.increment_downloaded();
        staged.push(StagedDownload {
            episode,
            staged_path,
        });
    }

    let suffixes = podcast.title_suffixes();
    for plan in assign_filenames(staged, prior_count + 1, &suffixes) {
        match apply_rename(folder, &plan) {
            Ok(path) => {
                print_success(&format!("Saved {}", path.display()));
                state.increment_renamed();
            }
            Err(e) => {
                print_warning(&format!(
                    "Could not rename {} to {}: {}",
                    plan.from.display(),
                    plan.file_name,
                    e
                ));
                state.increment_rename_failed();
            }
        }
    }

    Ok(state)
}

/// Report staged files left behind by an interrupted run.
fn warn_about_leftovers(folder: &Path) {
    let Ok(entries) = std::fs::read_dir(folder) else {
        return;
    };

    let leftovers = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(is_staging_filename)
                .unwrap_or(false)
        })
        .count();

    if leftovers > 0 {
        tracing::warn!(
            "{} staged file(s) from an earlier run in {}",
            leftovers,
            folder.display()
        );
    }
}
