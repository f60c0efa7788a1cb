use serde::{Deserialize, Serialize};

/// Dataset name for the public song feed.
pub const SONGS_DATASET: &str = "songs";

/// Artist reference embedded in a song (denormalized, not a lookup)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
  pub id: String,
  pub name: String,
}

/// A song in the cached library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
  pub id: String,
  pub title: String,
  pub artist: Option<ArtistRef>,
  pub audio_url: String,
  pub thumbnail_url: Option<String>,
  pub lyrics: Option<String>,
  pub genre: Option<String>,
}
