//! Episode module.
//!
//! Provides:
//! - The normalized episode record
//! - Identifier derivation per source kind

pub mod identity;
pub mod item;

pub use identity::{feed_id, listing_id, normalize_id};
pub use item::{Episode, MediaLocation};
