//! Remote feed collaborator: wire types, domain types, and HTTP client.

mod api_types;
mod client;
mod types;

pub use client::{FeedClient, FeedError, FeedSource};
pub use types::{ArtistRef, Song, SONGS_DATASET};
