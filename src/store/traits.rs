//! Core trait and types for dataset storage backends.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A stored dataset blob together with its write timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBlob {
  /// The serialized dataset, exactly as written
  pub data: Vec<u8>,
  /// When the blob was last successfully written
  pub synced_at: DateTime<Utc>,
}

/// Errors from the underlying storage medium.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("cache database error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("cache lock poisoned")]
  LockPoisoned,

  #[error("cache path error: {0}")]
  Io(#[from] std::io::Error),
}

/// Trait for persistent dataset storage backends.
///
/// The unit of storage is one opaque serialized blob per dataset name.
/// Backends never interpret the blob; callers own serialization.
pub trait DatasetStore: Send + Sync {
  /// Get the stored blob for `name`. A dataset that was never written
  /// is `Ok(None)`, not an error.
  fn get(&self, name: &str) -> Result<Option<CachedBlob>, StoreError>;

  /// Overwrite the blob for `name` wholesale. A concurrent reader sees
  /// either the prior blob or the new one, never a torn value.
  fn set(&self, name: &str, data: &[u8]) -> Result<(), StoreError>;

  /// Remove the blob for `name`. Clearing an absent dataset is a no-op.
  fn clear(&self, name: &str) -> Result<(), StoreError>;
}
