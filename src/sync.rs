//! Feed synchronizer: reconciles the local cache with the remote feed.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::feed::{FeedError, FeedSource, SONGS_DATASET};
use crate::store::{DatasetStore, StoreError};

/// Why a sync attempt failed. The cached dataset is untouched in every
/// case except a storage write that failed partway into `set`, which the
/// store itself guards against.
#[derive(Debug, Error)]
pub enum SyncError {
  #[error(transparent)]
  Feed(#[from] FeedError),

  #[error("cache write failed: {0}")]
  Storage(#[from] StoreError),

  #[error("failed to serialize song collection: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Result of a completed sync call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
  /// Feed fetched and the cached dataset replaced wholesale
  Updated { songs: usize },
  /// Another sync was already in flight; this call did nothing
  InFlight,
}

/// Owns write access to the song dataset. Readers go through
/// [`crate::library::Library`] and never write.
pub struct Synchronizer<F: FeedSource, S: DatasetStore> {
  feed: F,
  store: Arc<S>,
  in_flight: Mutex<()>,
}

impl<F: FeedSource, S: DatasetStore> Synchronizer<F, S> {
  pub fn new(feed: F, store: Arc<S>) -> Self {
    Self {
      feed,
      store,
      in_flight: Mutex::new(()),
    }
  }

  /// Fetch the feed once and replace the cached dataset on success.
  ///
  /// Any fetch or decode failure leaves the previous cached copy
  /// authoritative. Calling this on every app foreground or on a timer
  /// is safe: an unchanged feed produces an identical overwrite, and
  /// overlapping calls coalesce to a single in-flight operation.
  pub async fn sync(&self) -> Result<SyncOutcome, SyncError> {
    let Ok(_guard) = self.in_flight.try_lock() else {
      debug!("sync already in flight, coalescing");
      return Ok(SyncOutcome::InFlight);
    };

    let songs = self.feed.fetch_songs().await?;
    let payload = serde_json::to_vec(&songs).map_err(SyncError::Serialize)?;
    self.store.set(SONGS_DATASET, &payload)?;

    debug!(songs = songs.len(), "song feed synced");
    Ok(SyncOutcome::Updated { songs: songs.len() })
  }
}
