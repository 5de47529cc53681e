//! Album identity matching.
//!
//! Decides whether a streaming-side album and a physical release in the
//! collection are the same record: text normalization, an edit-distance
//! similarity metric, and threshold-based tier classification on top.

mod matcher;
mod normalize;
mod similarity;

pub use matcher::{
    extract_unique_albums, match_many, match_one, CandidateAlbum, MatchResult, MatchTier,
};
pub use normalize::{normalize_album, normalize_artist};
pub use similarity::similarity;
