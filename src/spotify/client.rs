//! HTTP client for the Spotify Web API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::models::{
    ArtistWire, PagingWire, PlayHistoryWire, SavedAlbumWire, SavedTrackWire, TrackWire,
};
use super::{ListeningService, PlayedTrack, SavedAlbum, SavedTrack, TimeRange, TopArtist, TopTrack};

/// Spotify caps page size at 50 items for the endpoints used here.
const PAGE_SIZE: usize = 50;

/// HTTP client for the user's Spotify listening data.
pub struct SpotifyClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Create a new Spotify client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://api.spotify.com/v1")
    /// * `access_token` - OAuth bearer token, acquired out of band
    /// * `timeout_sec` - request timeout in seconds
    pub fn new(base_url: String, access_token: String, timeout_sec: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            access_token,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .context("Failed to connect to Spotify")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Spotify request {} failed: status {}",
                path,
                response.status()
            );
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse Spotify response for {}", path))
    }

    /// Drain an offset-paged endpoint until `limit` items are collected or
    /// the paging cursor runs out.
    async fn get_paged<W: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        extra: Vec<(&'static str, String)>,
        limit: usize,
    ) -> Result<Vec<W>> {
        let mut items: Vec<W> = Vec::new();
        let mut offset = 0;

        while items.len() < limit {
            let page_size = PAGE_SIZE.min(limit - items.len());
            let mut query: Vec<(&str, String)> = vec![
                ("limit", page_size.to_string()),
                ("offset", offset.to_string()),
            ];
            query.extend(extra.iter().cloned());

            let page: PagingWire<W> = self.get_json(path, &query).await?;
            let received = page.items.len();
            items.extend(page.items);

            if page.next.is_none() || received == 0 {
                break;
            }
            offset += received;
        }

        debug!("Fetched {} items from {}", items.len(), path);
        Ok(items)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ListeningService for SpotifyClient {
    async fn top_tracks(&self, time_range: TimeRange, limit: usize) -> Result<Vec<TopTrack>> {
        let items: Vec<TrackWire> = self
            .get_paged(
                "/me/top/tracks",
                vec![("time_range", time_range.as_api_param().to_string())],
                limit,
            )
            .await?;

        Ok(items.into_iter().map(TrackWire::into_top_track).collect())
    }

    async fn top_artists(&self, time_range: TimeRange, limit: usize) -> Result<Vec<TopArtist>> {
        let items: Vec<ArtistWire> = self
            .get_paged(
                "/me/top/artists",
                vec![("time_range", time_range.as_api_param().to_string())],
                limit,
            )
            .await?;

        Ok(items.into_iter().map(ArtistWire::into_top_artist).collect())
    }

    async fn recently_played(&self, limit: usize) -> Result<Vec<PlayedTrack>> {
        // Cursor-paged upstream; a single page of up to 50 is all the API
        // exposes without the cursor dance, and all the analysis needs.
        let limit = limit.min(PAGE_SIZE);
        let page: PagingWire<PlayHistoryWire> = self
            .get_json(
                "/me/player/recently-played",
                &[("limit", limit.to_string())],
            )
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(PlayHistoryWire::into_played_track)
            .collect())
    }

    async fn saved_albums(&self, limit: usize) -> Result<Vec<SavedAlbum>> {
        let items: Vec<SavedAlbumWire> = self.get_paged("/me/albums", vec![], limit).await?;

        Ok(items
            .into_iter()
            .map(SavedAlbumWire::into_saved_album)
            .collect())
    }

    async fn saved_tracks(&self, limit: usize) -> Result<Vec<SavedTrack>> {
        let items: Vec<SavedTrackWire> = self.get_paged("/me/tracks", vec![], limit).await?;

        Ok(items
            .into_iter()
            .map(SavedTrackWire::into_saved_track)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SpotifyClient::new(
            "https://api.spotify.com/v1".to_string(),
            "tok".to_string(),
            30,
        );
        assert_eq!(client.base_url(), "https://api.spotify.com/v1");
    }

    #[test]
    fn test_trailing_slash_removal() {
        let client = SpotifyClient::new(
            "https://api.spotify.com/v1/".to_string(),
            "tok".to_string(),
            30,
        );
        assert_eq!(client.base_url(), "https://api.spotify.com/v1");
    }
}
