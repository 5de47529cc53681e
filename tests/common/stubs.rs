//! Stub service implementations and fixture builders.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use vinyl_scout::discogs::{Collection, CollectionService, Release, WantlistEntry};
use vinyl_scout::spotify::{
    ListeningService, PlayedTrack, SavedAlbum, SavedTrack, TimeRange, TopArtist, TopTrack,
};

/// In-memory listening data, returned verbatim (truncated to the limit).
#[derive(Default)]
pub struct StubListeningService {
    pub top_tracks: Vec<TopTrack>,
    pub top_artists: Vec<TopArtist>,
    pub recently_played: Vec<PlayedTrack>,
    pub saved_albums: Vec<SavedAlbum>,
    pub saved_tracks: Vec<SavedTrack>,
}

#[async_trait]
impl ListeningService for StubListeningService {
    async fn top_tracks(&self, _time_range: TimeRange, limit: usize) -> Result<Vec<TopTrack>> {
        Ok(self.top_tracks.iter().take(limit).cloned().collect())
    }

    async fn top_artists(&self, _time_range: TimeRange, limit: usize) -> Result<Vec<TopArtist>> {
        Ok(self.top_artists.iter().take(limit).cloned().collect())
    }

    async fn recently_played(&self, limit: usize) -> Result<Vec<PlayedTrack>> {
        Ok(self.recently_played.iter().take(limit).cloned().collect())
    }

    async fn saved_albums(&self, limit: usize) -> Result<Vec<SavedAlbum>> {
        Ok(self.saved_albums.iter().take(limit).cloned().collect())
    }

    async fn saved_tracks(&self, limit: usize) -> Result<Vec<SavedTrack>> {
        Ok(self.saved_tracks.iter().take(limit).cloned().collect())
    }
}

/// In-memory collection data.
#[derive(Default)]
pub struct StubCollectionService {
    pub releases: Vec<Release>,
    pub wantlist: Vec<WantlistEntry>,
}

#[async_trait]
impl CollectionService for StubCollectionService {
    async fn collection(&self, limit: Option<usize>) -> Result<Collection> {
        let releases = match limit {
            Some(limit) => self.releases.iter().take(limit).cloned().collect(),
            None => self.releases.clone(),
        };
        Ok(Collection {
            releases,
            total: self.releases.len(),
        })
    }

    async fn wantlist(&self, limit: Option<usize>) -> Result<Vec<WantlistEntry>> {
        let wants = match limit {
            Some(limit) => self.wantlist.iter().take(limit).cloned().collect(),
            None => self.wantlist.clone(),
        };
        Ok(wants)
    }
}

// ============================================================================
// Fixture builders
// ============================================================================

pub fn top_track(artist: &str, album: &str, popularity: Option<u32>) -> TopTrack {
    TopTrack {
        name: format!("{} song", album),
        artist: artist.to_string(),
        album: album.to_string(),
        popularity,
    }
}

pub fn top_artist(name: &str, genres: &[&str]) -> TopArtist {
    TopArtist {
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        popularity: 70,
        followers: 10_000,
    }
}

pub fn played(artist: &str, album: &str) -> PlayedTrack {
    PlayedTrack {
        name: format!("{} song", album),
        artist: artist.to_string(),
        album: album.to_string(),
        played_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn release(artist: &str, album: &str) -> Release {
    Release {
        release_id: format!("{}-{}", artist, album),
        artist: artist.to_string(),
        album: album.to_string(),
        year: Some(1997),
        date_added: None,
        genres: vec!["Rock".to_string()],
        styles: vec![],
        formats: vec!["Vinyl".to_string()],
    }
}

pub fn release_added(artist: &str, album: &str, added: &str) -> Release {
    Release {
        date_added: Some(
            DateTime::parse_from_rfc3339(added)
                .unwrap()
                .with_timezone(&Utc),
        ),
        ..release(artist, album)
    }
}
