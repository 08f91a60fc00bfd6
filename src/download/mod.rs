//! Download module.
//!
//! This module provides:
//! - Run statistics
//! - Episode media downloading
//! - The per-podcast sync pipeline

pub mod media;
pub mod pipeline;
pub mod state;

pub use media::download_episode;
pub use pipeline::sync_podcast;
pub use state::{GlobalState, SyncState};
