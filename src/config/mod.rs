//! Configuration module for podcast-sync.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Source kind definitions
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, MarkupConfig, OptionsConfig, PodcastConfig};
pub use modes::SourceKind;
pub use validation::{validate_config, validate_locator, validate_podcast};
