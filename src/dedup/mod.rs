//! Deduplication module.
//!
//! Provides:
//! - The persisted ledger of downloaded ids
//! - Filtering of already downloaded episodes

pub mod filter;
pub mod ledger;

pub use filter::filter_new;
pub use ledger::IdLedger;
