//! Serde-deserializable types matching the feed API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use serde::Deserialize;

use super::client::FeedError;
use super::types::{ArtistRef, Song};

/// Wire-level response wrapper distinguishing logical success from payload.
///
/// `data` may be absent on a failure envelope, but a success envelope
/// without it is malformed, not an empty feed: it must never overwrite
/// the cache.
#[derive(Debug, Deserialize)]
pub struct ApiFeedEnvelope {
  pub success: bool,
  pub data: Option<Vec<ApiSong>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiArtist {
  #[serde(rename = "_id", default)]
  pub id: String,
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSong {
  #[serde(rename = "_id")]
  pub id: String,
  pub title: String,
  pub artist: Option<ApiArtist>,
  #[serde(default)]
  pub audio_url: String,
  pub thumbnail_url: Option<String>,
  pub lyrics: Option<String>,
  pub genre: Option<String>,
}

impl From<ApiSong> for Song {
  fn from(api: ApiSong) -> Self {
    Song {
      id: api.id,
      title: api.title,
      artist: api.artist.map(|a| ArtistRef {
        id: a.id,
        name: a.name,
      }),
      audio_url: api.audio_url,
      thumbnail_url: api.thumbnail_url,
      lyrics: api.lyrics,
      genre: api.genre,
    }
  }
}

/// Decode a feed response body into the song collection.
///
/// Malformed JSON, a `success: false` envelope, and a success envelope
/// with no `data` field are all decode failures; only an explicit empty
/// `data` array is a valid, empty collection.
pub fn decode_feed(body: &[u8]) -> Result<Vec<Song>, FeedError> {
  use serde::de::Error as _;

  let envelope: ApiFeedEnvelope = serde_json::from_slice(body)?;

  if !envelope.success {
    return Err(FeedError::Rejected);
  }

  let songs = envelope
    .data
    .ok_or_else(|| serde_json::Error::custom("success envelope missing `data`"))?;

  Ok(songs.into_iter().map(Song::from).collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_success_envelope() {
    let body = br#"{
      "success": true,
      "data": [
        {
          "_id": "s1",
          "title": "Yene Mezmur",
          "artist": { "_id": "a1", "name": "Tesfaye" },
          "audioUrl": "https://cdn.example.com/s1.mp3",
          "thumbnailUrl": "https://cdn.example.com/s1.jpg",
          "genre": "worship"
        }
      ]
    }"#;

    let songs = decode_feed(body).unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].id, "s1");
    assert_eq!(songs[0].title, "Yene Mezmur");
    assert_eq!(songs[0].artist.as_ref().unwrap().name, "Tesfaye");
    assert_eq!(songs[0].genre.as_deref(), Some("worship"));
    assert!(songs[0].lyrics.is_none());
  }

  #[test]
  fn test_decode_empty_data_is_valid() {
    let songs = decode_feed(br#"{"success": true, "data": []}"#).unwrap();
    assert!(songs.is_empty());
  }

  #[test]
  fn test_decode_rejected_envelope() {
    let err = decode_feed(br#"{"success": false}"#).unwrap_err();
    assert!(matches!(err, FeedError::Rejected));
  }

  #[test]
  fn test_decode_success_without_data_is_malformed() {
    // Must not be mistaken for a synced-empty feed
    let err = decode_feed(br#"{"success": true}"#).unwrap_err();
    assert!(matches!(err, FeedError::Envelope(_)));
  }

  #[test]
  fn test_decode_malformed_body() {
    let err = decode_feed(b"<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, FeedError::Envelope(_)));
  }

  #[test]
  fn test_decode_missing_optional_fields() {
    let body = br#"{
      "success": true,
      "data": [{ "_id": "s2", "title": "Untitled", "audioUrl": "" }]
    }"#;

    let songs = decode_feed(body).unwrap();
    assert!(songs[0].artist.is_none());
    assert!(songs[0].thumbnail_url.is_none());
  }
}
