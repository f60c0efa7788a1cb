//! Read-only view of the cached song library.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::feed::{Song, SONGS_DATASET};
use crate::store::DatasetStore;

/// Non-blocking reader over the last-known-good dataset.
///
/// Never touches the network and never fails: an absent or unreadable
/// cache renders as an empty library, so the UI always has something to
/// show.
pub struct Library<S: DatasetStore> {
  store: Arc<S>,
}

impl<S: DatasetStore> Library<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// The cached song collection, or empty if nothing has ever synced.
  pub fn songs(&self) -> Vec<Song> {
    let blob = match self.store.get(SONGS_DATASET) {
      Ok(Some(blob)) => blob,
      Ok(None) => return Vec::new(),
      Err(e) => {
        // An unreadable cache is operationally the same as never-synced
        warn!("failed to read song cache: {}", e);
        return Vec::new();
      }
    };

    match serde_json::from_slice(&blob.data) {
      Ok(songs) => songs,
      Err(e) => {
        warn!("cached song dataset is corrupt, treating as empty: {}", e);
        Vec::new()
      }
    }
  }

  /// When the song dataset last synced successfully, if ever.
  pub fn last_synced(&self) -> Option<DateTime<Utc>> {
    self
      .store
      .get(SONGS_DATASET)
      .ok()
      .flatten()
      .map(|blob| blob.synced_at)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::feed::{FeedSource, Song};
  use crate::store::{CachedBlob, MemoryStore, StoreError};
  use crate::sync::Synchronizer;

  fn song(id: &str, title: &str) -> Song {
    Song {
      id: id.to_string(),
      title: title.to_string(),
      artist: None,
      audio_url: format!("https://cdn.example.com/{}.mp3", id),
      thumbnail_url: None,
      lyrics: None,
      genre: None,
    }
  }

  #[test]
  fn test_never_synced_reads_empty() {
    let library = Library::new(Arc::new(MemoryStore::new()));
    assert!(library.songs().is_empty());
    assert!(library.last_synced().is_none());
  }

  #[test]
  fn test_unreadable_store_reads_empty() {
    struct UnreadableStore;

    impl DatasetStore for UnreadableStore {
      fn get(&self, _name: &str) -> Result<Option<CachedBlob>, StoreError> {
        Err(StoreError::LockPoisoned)
      }
      fn set(&self, _name: &str, _data: &[u8]) -> Result<(), StoreError> {
        Ok(())
      }
      fn clear(&self, _name: &str) -> Result<(), StoreError> {
        Ok(())
      }
    }

    // A store-level read failure renders the same as never-synced
    let library = Library::new(Arc::new(UnreadableStore));
    assert!(library.songs().is_empty());
    assert!(library.last_synced().is_none());
  }

  #[test]
  fn test_corrupt_cache_reads_empty() {
    let store = Arc::new(MemoryStore::new());
    store.set(SONGS_DATASET, b"not json at all").unwrap();

    let library = Library::new(store);
    assert!(library.songs().is_empty());
  }

  #[tokio::test]
  async fn test_sync_then_read_round_trips() {
    struct OneShotFeed(Vec<Song>);

    impl FeedSource for OneShotFeed {
      async fn fetch_songs(&self) -> Result<Vec<Song>, crate::feed::FeedError> {
        Ok(self.0.clone())
      }
    }

    let store = Arc::new(MemoryStore::new());
    let expected = vec![song("s1", "Yene Mezmur"), song("s2", "Kale")];

    let sync = Synchronizer::new(OneShotFeed(expected.clone()), Arc::clone(&store));
    sync.sync().await.unwrap();

    let library = Library::new(store);
    assert_eq!(library.songs(), expected);
    assert!(library.last_synced().is_some());
  }
}
