//! Persistent dataset storage for offline support.
//!
//! This module provides the feed-agnostic storage layer:
//! - One opaque serialized blob per dataset name (e.g. "songs")
//! - Whole-blob overwrite only, no partial updates
//! - Absent datasets are a normal, representable outcome

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{CachedBlob, DatasetStore, StoreError};
