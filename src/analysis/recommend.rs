//! Vinyl purchase recommendations.
//!
//! Candidates arrive ranked by the caller (listening rank); everything the
//! user already owns on vinyl is filtered out and the remainder is emitted
//! in that order with a human-readable reason per entry.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::discogs::Release;
use crate::matching::{match_many, normalize_album, normalize_artist, CandidateAlbum};
use crate::spotify::TopTrack;

/// A candidate album carrying its source signal: position in the caller's
/// ranking is implied by index, popularity comes along when the source had
/// one.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub album: CandidateAlbum,
    pub popularity: Option<u32>,
}

/// One purchase recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub artist: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
}

/// Recommendation count for one artist, for visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
    pub artist: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    /// Candidates already owned on vinyl (exact or fuzzy match).
    pub owned_count: usize,
    /// Recommendations grouped by artist, most recommended first.
    pub by_artist: Vec<ArtistCount>,
}

/// Collapse a top-tracks ranking into unique candidate albums.
///
/// Dedup key is the normalized (artist, album) pair; the first occurrence
/// keeps its display strings and popularity, and its position defines the
/// candidate's rank.
pub fn rank_candidates(tracks: &[TopTrack]) -> Vec<RankedCandidate> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut ranked = Vec::new();

    for track in tracks {
        let key = (
            normalize_artist(&track.artist),
            normalize_album(&track.album),
        );
        if seen.insert(key) {
            ranked.push(RankedCandidate {
                album: CandidateAlbum {
                    name: track.album.clone(),
                    artist: track.artist.clone(),
                },
                popularity: track.popularity,
            });
        }
    }

    ranked
}

/// Generate up to `max_results` purchase recommendations.
///
/// Candidates matching the collection at Exact or Fuzzy tier are owned and
/// skipped; ArtistOnly does not count as ownership. Output preserves the
/// candidates' relative order, so the caller's ranking is the ranking.
pub fn recommend(
    candidates: &[RankedCandidate],
    releases: &[Release],
    max_results: usize,
) -> RecommendationReport {
    let albums: Vec<CandidateAlbum> = candidates
        .iter()
        .map(|candidate| candidate.album.clone())
        .collect();
    let matches = match_many(&albums, releases);

    let owned_count = matches.iter().filter(|result| result.is_owned()).count();

    let mut recommendations = Vec::new();
    for (position, (candidate, result)) in candidates.iter().zip(&matches).enumerate() {
        if result.is_owned() {
            continue;
        }
        if recommendations.len() >= max_results {
            break;
        }
        recommendations.push(Recommendation {
            name: candidate.album.name.clone(),
            artist: candidate.album.artist.clone(),
            reason: format!(
                "Ranked #{} among the albums in your current top tracks",
                position + 1
            ),
            popularity: candidate.popularity,
        });
    }

    let by_artist = count_by_artist(&recommendations);

    RecommendationReport {
        recommendations,
        owned_count,
        by_artist,
    }
}

fn count_by_artist(recommendations: &[Recommendation]) -> Vec<ArtistCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for recommendation in recommendations {
        *counts.entry(recommendation.artist.as_str()).or_default() += 1;
    }

    let mut by_artist: Vec<ArtistCount> = counts
        .into_iter()
        .map(|(artist, count)| ArtistCount {
            artist: artist.to_string(),
            count,
        })
        .collect();
    by_artist.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.artist.cmp(&b.artist)));
    by_artist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str, album: &str, popularity: Option<u32>) -> TopTrack {
        TopTrack {
            name: format!("{} song", album),
            artist: artist.to_string(),
            album: album.to_string(),
            popularity,
        }
    }

    fn release(artist: &str, album: &str) -> Release {
        Release {
            release_id: format!("{}-{}", artist, album),
            artist: artist.to_string(),
            album: album.to_string(),
            year: None,
            date_added: None,
            genres: vec![],
            styles: vec![],
            formats: vec![],
        }
    }

    fn candidate(artist: &str, album: &str) -> RankedCandidate {
        RankedCandidate {
            album: CandidateAlbum {
                name: album.to_string(),
                artist: artist.to_string(),
            },
            popularity: None,
        }
    }

    #[test]
    fn test_rank_candidates_dedups_keeping_first() {
        let ranked = rank_candidates(&[
            track("Radiohead", "OK Computer", Some(80)),
            track("Radiohead", "OK Computer (Remastered 2009)", Some(75)),
            track("Nick Drake", "Pink Moon", None),
        ]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].album.name, "OK Computer");
        assert_eq!(ranked[0].popularity, Some(80));
        assert_eq!(ranked[1].album.artist, "Nick Drake");
    }

    #[test]
    fn test_recommend_filters_owned_and_preserves_order() {
        let releases = vec![release("Radiohead", "OK Computer")];
        let candidates = vec![
            candidate("Radiohead", "OK Computer"),
            candidate("Nick Drake", "Pink Moon"),
            candidate("Slint", "Spiderland"),
        ];

        let report = recommend(&candidates, &releases, 10);

        assert_eq!(report.owned_count, 1);
        let names: Vec<&str> = report
            .recommendations
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pink Moon", "Spiderland"]);
        // Reasons reference the position in the ranked input
        assert!(report.recommendations[0].reason.contains("#2"));
        assert!(report.recommendations[1].reason.contains("#3"));
    }

    #[test]
    fn test_recommend_caps_results() {
        let candidates: Vec<RankedCandidate> = (0..10)
            .map(|i| candidate(&format!("Artist {}", i), &format!("Album {}", i)))
            .collect();

        let report = recommend(&candidates, &[], 5);

        assert_eq!(report.recommendations.len(), 5);
        assert_eq!(report.owned_count, 0);
        for (i, rec) in report.recommendations.iter().enumerate() {
            assert_eq!(rec.name, format!("Album {}", i));
            assert!(!rec.reason.is_empty());
        }
    }

    #[test]
    fn test_artist_only_match_is_still_recommended() {
        let releases = vec![release("Radiohead", "OK Computer")];
        let candidates = vec![candidate("Radiohead", "Amnesiac")];

        let report = recommend(&candidates, &releases, 10);

        assert_eq!(report.owned_count, 0);
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_by_artist_counts_sorted() {
        let candidates = vec![
            candidate("Radiohead", "Amnesiac"),
            candidate("Radiohead", "Kid A"),
            candidate("Low", "Secret Name"),
        ];

        let report = recommend(&candidates, &[], 10);

        assert_eq!(
            report.by_artist,
            vec![
                ArtistCount {
                    artist: "Radiohead".to_string(),
                    count: 2
                },
                ArtistCount {
                    artist: "Low".to_string(),
                    count: 1
                },
            ]
        );
    }
}
