//! Discogs record shapes: wire payloads and the domain types built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed upstream data. Fails the whole computation; nothing is
/// silently coerced to a default.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("release {release_id} has unparseable date_added {value:?}")]
    InvalidDateAdded {
        release_id: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("release {release_id} has no artist credit")]
    MissingArtistCredit { release_id: u64 },
}

/// One physical item in the user's vinyl collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub release_id: String,
    pub artist: String,
    pub album: String,
    pub year: Option<i32>,
    pub date_added: Option<DateTime<Utc>>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub formats: Vec<String>,
}

/// A fully materialized collection: the (possibly prefix-limited) releases
/// plus the upstream total count.
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub releases: Vec<Release>,
    pub total: usize,
}

/// One wantlist item.
#[derive(Debug, Clone, Serialize)]
pub struct WantlistEntry {
    pub artist: String,
    pub album: String,
    pub year: Option<i32>,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct PaginationWire {
    pub page: usize,
    pub pages: usize,
    pub items: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct CollectionPageWire {
    pub pagination: PaginationWire,
    pub releases: Vec<CollectionReleaseWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WantlistPageWire {
    pub pagination: PaginationWire,
    pub wants: Vec<WantWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CollectionReleaseWire {
    pub id: u64,
    #[serde(default)]
    pub date_added: Option<String>,
    pub basic_information: BasicInformationWire,
}

#[derive(Debug, Deserialize)]
pub(super) struct WantWire {
    pub id: u64,
    pub basic_information: BasicInformationWire,
}

#[derive(Debug, Deserialize)]
pub(super) struct BasicInformationWire {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub artists: Vec<ArtistCreditWire>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub formats: Vec<FormatWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtistCreditWire {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct FormatWire {
    pub name: String,
}

impl CollectionReleaseWire {
    /// Build the domain release. Discogs reports unknown years as 0 and
    /// timestamps as RFC 3339 with an offset.
    pub fn into_release(self) -> Result<Release, DataError> {
        let date_added = match self.date_added {
            None => None,
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|source| DataError::InvalidDateAdded {
                        release_id: self.id,
                        value: raw,
                        source,
                    })?
                    .with_timezone(&Utc),
            ),
        };

        let artist = self
            .basic_information
            .artists
            .first()
            .map(|credit| credit.name.clone())
            .ok_or(DataError::MissingArtistCredit { release_id: self.id })?;

        Ok(Release {
            release_id: self.id.to_string(),
            artist,
            album: self.basic_information.title,
            year: self.basic_information.year.filter(|&year| year != 0),
            date_added,
            genres: self.basic_information.genres,
            styles: self.basic_information.styles,
            formats: self
                .basic_information
                .formats
                .into_iter()
                .map(|format| format.name)
                .collect(),
        })
    }
}

impl WantWire {
    pub fn into_entry(self) -> Result<WantlistEntry, DataError> {
        let artist = self
            .basic_information
            .artists
            .first()
            .map(|credit| credit.name.clone())
            .ok_or(DataError::MissingArtistCredit { release_id: self.id })?;

        Ok(WantlistEntry {
            artist,
            album: self.basic_information.title,
            year: self.basic_information.year.filter(|&year| year != 0),
        })
    }
}
