use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::Config;

use super::api_types::decode_feed;
use super::types::Song;

/// Errors from fetching and decoding the remote feed.
#[derive(Debug, Error)]
pub enum FeedError {
  #[error("network error reaching feed: {0}")]
  Network(#[from] reqwest::Error),

  #[error("feed returned HTTP {0}")]
  Status(StatusCode),

  #[error("malformed feed envelope: {0}")]
  Envelope(#[from] serde_json::Error),

  #[error("feed reported failure")]
  Rejected,

  #[error("invalid feed URL: {0}")]
  Url(#[from] url::ParseError),
}

/// Source of the canonical song collection.
///
/// The production implementation is [`FeedClient`]; tests substitute a
/// stub so sync behavior can be exercised without a network.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
  /// Fetch the current song collection from the feed.
  async fn fetch_songs(&self) -> Result<Vec<Song>, FeedError>;
}

/// HTTP client for the public feed endpoint.
#[derive(Clone)]
pub struct FeedClient {
  http: reqwest::Client,
  songs_url: Url,
}

impl FeedClient {
  pub fn new(config: &Config) -> Result<Self, FeedError> {
    let base = Url::parse(&config.feed.url)?;
    let songs_url = base.join("songs")?;

    // Bounded timeout so an unreachable feed never hangs a sync
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.feed.timeout_secs))
      .build()?;

    Ok(Self { http, songs_url })
  }
}

impl FeedSource for FeedClient {
  async fn fetch_songs(&self) -> Result<Vec<Song>, FeedError> {
    let response = self.http.get(self.songs_url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(FeedError::Status(status));
    }

    let body = response.bytes().await?;
    decode_feed(&body)
  }
}
