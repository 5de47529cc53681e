//! Spotify listening-history access.
//!
//! Top tracks, top artists, recently played and saved items, pulled fully
//! into memory behind the [`ListeningService`] capability. The analysis
//! engine consumes the decoded records and performs no I/O of its own.

mod client;
mod models;

pub use client::SpotifyClient;
pub use models::{PlayedTrack, SavedAlbum, SavedTrack, TimeRange, TopArtist, TopTrack};

use anyhow::Result;
use async_trait::async_trait;

/// Capability interface over the user's Spotify listening data.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ListeningService: Send + Sync {
    /// Most-listened tracks over the given time range, best rank first.
    async fn top_tracks(&self, time_range: TimeRange, limit: usize) -> Result<Vec<TopTrack>>;

    /// Most-listened artists over the given time range, best rank first.
    async fn top_artists(&self, time_range: TimeRange, limit: usize) -> Result<Vec<TopArtist>>;

    /// Recently played tracks, newest first. Upstream caps this at 50.
    async fn recently_played(&self, limit: usize) -> Result<Vec<PlayedTrack>>;

    /// Albums the user has saved to their library.
    async fn saved_albums(&self, limit: usize) -> Result<Vec<SavedAlbum>>;

    /// Tracks the user has saved to their library.
    async fn saved_tracks(&self, limit: usize) -> Result<Vec<SavedTrack>>;
}
