//! Statistics reporting.

use console::style;

use crate::download::{GlobalState, SyncState};

/// Print statistics for a single podcast.
pub fn print_podcast_stats(state: &SyncState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", state.podcast_name)).bold()
    );
    println!("  Listed:     {}", state.discovered);
    println!("  Known:      {} (already downloaded)", state.skipped);
    if state.pending > 0 {
        println!("  New:        {} (dry run)", state.pending);
    }
    println!("  Downloaded: {}", state.downloaded);
    if state.failed > 0 {
        println!("  Failed:     {}", style(state.failed).red());
    }
    if state.rename_failed > 0 {
        println!(
            "  Unrenamed:  {} (left under staging names)",
            style(state.rename_failed).red()
        );
    }
}

/// Print global statistics across all podcasts.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Podcasts processed: {}", state.podcasts_processed);
    if state.podcasts_failed > 0 {
        println!(
            "  Podcasts failed:    {}",
            style(state.podcasts_failed).red()
        );
    }
    println!("  Listed:     {}", state.discovered);
    println!("  Known:      {}", state.skipped);
    if state.pending > 0 {
        println!("  New:        {} (dry run)", state.pending);
    }
    println!("  Downloaded: {}", state.downloaded);
    println!("  Failed:     {}", state.failed);
    println!("{}", style("═".repeat(50)).dim());
}
