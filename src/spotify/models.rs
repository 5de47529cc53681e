//! Spotify record shapes: wire payloads and the domain types built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spotify's listening-history aggregation windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    /// The query-parameter value the API expects.
    pub fn as_api_param(self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::MediumTerm
    }
}

/// One entry of the user's top-tracks ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub popularity: Option<u32>,
}

/// One entry of the user's top-artists ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopArtist {
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub followers: u64,
}

/// One playback event from the recently-played feed.
#[derive(Debug, Clone, Serialize)]
pub struct PlayedTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub played_at: DateTime<Utc>,
}

/// One album saved to the user's library.
#[derive(Debug, Clone, Serialize)]
pub struct SavedAlbum {
    pub name: String,
    pub artist: String,
    pub added_at: Option<DateTime<Utc>>,
}

/// One track saved to the user's library.
#[derive(Debug, Clone, Serialize)]
pub struct SavedTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub added_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Wire types
// ============================================================================

/// Spotify's standard offset-paged envelope.
#[derive(Debug, Deserialize)]
pub(super) struct PagingWire<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrackWire {
    pub name: String,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub artists: Vec<ArtistRefWire>,
    pub album: AlbumRefWire,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtistRefWire {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AlbumRefWire {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtistWire {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
    pub followers: FollowersWire,
}

#[derive(Debug, Deserialize)]
pub(super) struct FollowersWire {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlayHistoryWire {
    pub track: TrackWire,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SavedAlbumWire {
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
    pub album: SavedAlbumInnerWire,
}

#[derive(Debug, Deserialize)]
pub(super) struct SavedAlbumInnerWire {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRefWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SavedTrackWire {
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
    pub track: TrackWire,
}

/// First credited artist, or empty when the credit list is empty
/// (local files and some podcast payloads omit it).
pub(super) fn primary_artist(artists: &[ArtistRefWire]) -> String {
    artists
        .first()
        .map(|artist| artist.name.clone())
        .unwrap_or_default()
}

impl TrackWire {
    pub fn into_top_track(self) -> TopTrack {
        TopTrack {
            artist: primary_artist(&self.artists),
            album: self.album.name,
            name: self.name,
            popularity: self.popularity,
        }
    }
}

impl ArtistWire {
    pub fn into_top_artist(self) -> TopArtist {
        TopArtist {
            name: self.name,
            genres: self.genres,
            popularity: self.popularity,
            followers: self.followers.total,
        }
    }
}

impl PlayHistoryWire {
    pub fn into_played_track(self) -> PlayedTrack {
        PlayedTrack {
            artist: primary_artist(&self.track.artists),
            album: self.track.album.name,
            name: self.track.name,
            played_at: self.played_at,
        }
    }
}

impl SavedAlbumWire {
    pub fn into_saved_album(self) -> SavedAlbum {
        SavedAlbum {
            artist: primary_artist(&self.album.artists),
            name: self.album.name,
            added_at: self.added_at,
        }
    }
}

impl SavedTrackWire {
    pub fn into_saved_track(self) -> SavedTrack {
        SavedTrack {
            artist: primary_artist(&self.track.artists),
            album: self.track.album.name,
            name: self.track.name,
            added_at: self.added_at,
        }
    }
}
