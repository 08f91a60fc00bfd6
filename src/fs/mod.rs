//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename generation and title sanitization
//! - Sequential renaming of new downloads

pub mod naming;
pub mod paths;
pub mod sequencer;

pub use naming::{
    is_staging_filename, sanitize_path_component, sanitize_title, sequenced_filename,
    staging_filename,
};
pub use paths::{ensure_dir, get_podcast_folder, ledger_path, staging_path, LEDGER_FILENAME};
pub use sequencer::{apply_rename, assign_filenames, PlannedRename, StagedDownload};
