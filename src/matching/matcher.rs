//! Candidate-album to owned-release matching and tier classification.

use serde::Serialize;
use std::collections::HashSet;

use super::{normalize_album, normalize_artist, similarity};
use crate::discogs::Release;

/// Artist similarity contributes less than the album title: many artists
/// have near-identical names, titles are the discriminating signal.
const ARTIST_WEIGHT: f64 = 0.4;
const ALBUM_WEIGHT: f64 = 0.6;

/// Combined score at or above this is the same album.
const EXACT_THRESHOLD: f64 = 0.95;
/// Combined score at or above this is the same album modulo edition noise.
const FUZZY_THRESHOLD: f64 = 0.75;
/// Artist-only fallback: same artist, different or uncertain album.
const ARTIST_ONLY_THRESHOLD: f64 = 0.9;

/// A logical album identity derived from streaming records.
/// Carries the original display strings, never the normalized forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAlbum {
    pub name: String,
    pub artist: String,
}

/// Discrete confidence classification of a candidate/collection match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Fuzzy,
    ArtistOnly,
    NoMatch,
}

impl MatchTier {
    /// Ownership predicate: ArtistOnly signals "same artist, different or
    /// uncertain album" and does not count as owning the record.
    pub fn is_owned(self) -> bool {
        matches!(self, MatchTier::Exact | MatchTier::Fuzzy)
    }
}

/// Outcome of matching one candidate against the collection.
///
/// `matched_release` is `Some` exactly when `tier` is not `NoMatch`; a
/// below-threshold nearest neighbor is never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub candidate: CandidateAlbum,
    pub matched_release: Option<Release>,
    pub score: f64,
    pub tier: MatchTier,
}

impl MatchResult {
    pub fn is_owned(&self) -> bool {
        self.tier.is_owned()
    }
}

fn classify(score: f64, artist_score: f64) -> MatchTier {
    if score >= EXACT_THRESHOLD {
        MatchTier::Exact
    } else if score >= FUZZY_THRESHOLD {
        MatchTier::Fuzzy
    } else if artist_score >= ARTIST_ONLY_THRESHOLD {
        MatchTier::ArtistOnly
    } else {
        MatchTier::NoMatch
    }
}

/// Match one candidate album against every release in the collection.
///
/// The best release is the strictly highest combined score; on ties the
/// first one seen wins (`>` comparison, iteration order). An empty
/// collection yields `NoMatch` with score 0.
pub fn match_one(candidate: &CandidateAlbum, releases: &[Release]) -> MatchResult {
    let artist_norm = normalize_artist(&candidate.artist);
    let album_norm = normalize_album(&candidate.name);

    let mut best: Option<(&Release, f64, f64)> = None;

    for release in releases {
        let artist_score = similarity(&artist_norm, &normalize_artist(&release.artist));
        let album_score = similarity(&album_norm, &normalize_album(&release.album));
        let score = ARTIST_WEIGHT * artist_score + ALBUM_WEIGHT * album_score;

        if best.map_or(true, |(_, best_score, _)| score > best_score) {
            best = Some((release, score, artist_score));
        }
    }

    match best {
        None => MatchResult {
            candidate: candidate.clone(),
            matched_release: None,
            score: 0.0,
            tier: MatchTier::NoMatch,
        },
        Some((release, score, artist_score)) => {
            let tier = classify(score, artist_score);
            MatchResult {
                candidate: candidate.clone(),
                matched_release: if tier == MatchTier::NoMatch {
                    None
                } else {
                    Some(release.clone())
                },
                score,
                tier,
            }
        }
    }
}

/// Element-wise [`match_one`], preserving input order.
///
/// O(candidates × releases), fine at user-library scale.
pub fn match_many(candidates: &[CandidateAlbum], releases: &[Release]) -> Vec<MatchResult> {
    candidates
        .iter()
        .map(|candidate| match_one(candidate, releases))
        .collect()
}

/// Deduplicate candidate albums by their normalized (artist, album) pair.
///
/// The first occurrence wins and keeps its original display strings;
/// first-seen order is preserved.
pub fn extract_unique_albums<I>(candidates: I) -> Vec<CandidateAlbum>
where
    I: IntoIterator<Item = CandidateAlbum>,
{
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unique = Vec::new();

    for candidate in candidates {
        let key = (
            normalize_artist(&candidate.artist),
            normalize_album(&candidate.name),
        );
        if seen.insert(key) {
            unique.push(candidate);
        }
    }

    unique
}
