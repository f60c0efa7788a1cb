//! In-memory dataset storage.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{CachedBlob, DatasetStore, StoreError};

/// Dataset store backed by a process-local map. Nothing survives a
/// restart; used by tests and for cache-disabled embedding.
#[derive(Default)]
pub struct MemoryStore {
  datasets: Mutex<HashMap<String, CachedBlob>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl DatasetStore for MemoryStore {
  fn get(&self, name: &str) -> Result<Option<CachedBlob>, StoreError> {
    let datasets = self.datasets.lock().map_err(|_| StoreError::LockPoisoned)?;
    Ok(datasets.get(name).cloned())
  }

  fn set(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
    let mut datasets = self.datasets.lock().map_err(|_| StoreError::LockPoisoned)?;
    datasets.insert(
      name.to_string(),
      CachedBlob {
        data: data.to_vec(),
        synced_at: Utc::now(),
      },
    );
    Ok(())
  }

  fn clear(&self, name: &str) -> Result<(), StoreError> {
    let mut datasets = self.datasets.lock().map_err(|_| StoreError::LockPoisoned)?;
    datasets.remove(name);
    Ok(())
  }
}
