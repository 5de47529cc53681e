//! Collection/listening alignment analysis.
//!
//! Cross-references the vinyl collection with the listening history and
//! answers three questions: what is owned and listened to, what sits on
//! the shelf unplayed, and what gets played but is missing on vinyl.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::discogs::Release;
use crate::matching::{
    extract_unique_albums, match_many, normalize_album, normalize_artist, CandidateAlbum,
    MatchResult,
};
use crate::spotify::{PlayedTrack, TopArtist, TopTrack};

/// Which report sections to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    Insights,
    Comparison,
    Full,
}

impl AnalysisMode {
    fn wants_insights(self) -> bool {
        matches!(self, AnalysisMode::Insights | AnalysisMode::Full)
    }

    fn wants_comparison(self) -> bool {
        matches!(self, AnalysisMode::Comparison | AnalysisMode::Full)
    }
}

/// The three-way partition over albums touched by either side, plus the
/// derived scores. "Neither owned nor listened" is deliberately not part
/// of the denominator.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentSummary {
    pub alignment_score: u32,
    pub owned_and_listened: usize,
    pub owned_not_listened: usize,
    pub listened_not_owned: usize,
    pub total_owned: usize,
    pub total_listened_unique: usize,
    pub venn: VennData,
}

/// Venn-diagram counts over unique albums.
#[derive(Debug, Clone, Serialize)]
pub struct VennData {
    pub both: usize,
    pub only_owned: usize,
    pub only_listened: usize,
    pub overlap_percentage: u32,
}

/// An owned album annotated with its recent play count.
#[derive(Debug, Clone, Serialize)]
pub struct PlayedAlbum {
    pub artist: String,
    pub album: String,
    pub play_count: usize,
}

/// An owned album gathering dust: no recent plays, not in the top tracks.
#[derive(Debug, Clone, Serialize)]
pub struct ShelvedAlbum {
    pub artist: String,
    pub album: String,
    pub date_added: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// One month of the cumulative acquisition timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub month: String,
    pub added: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct InsightsSection {
    pub most_played: Vec<PlayedAlbum>,
    pub least_played: Vec<ShelvedAlbum>,
    pub genres: Vec<GenreCount>,
    pub acquisition_timeline: Vec<TimelinePoint>,
}

/// A top artist that also appears in the collection.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistOverlap {
    pub artist: String,
    /// 1-based position in the top-artists ranking.
    pub rank: usize,
    pub owned_albums: usize,
    pub genres: Vec<String>,
}

/// An owned release that matched nothing in the listening history.
#[derive(Debug, Clone, Serialize)]
pub struct NeglectedRelease {
    pub artist: String,
    pub album: String,
    pub days_since_added: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistFrequency {
    pub artist: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ComparisonSection {
    pub artist_overlap: Vec<ArtistOverlap>,
    pub not_matching_listening: Vec<NeglectedRelease>,
    /// Most frequent artists among listened-but-not-owned albums.
    pub missing_artists: Vec<ArtistFrequency>,
    /// Most frequent artists among owned-but-unplayed releases.
    pub unplayed_artists: Vec<ArtistFrequency>,
}

/// The full analysis result; `insights`/`comparison` are present only when
/// the requested mode asked for them.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub summary: AlignmentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonSection>,
}

const MOST_PLAYED_LIMIT: usize = 10;
const LEAST_PLAYED_LIMIT: usize = 10;
const GENRE_LIMIT: usize = 20;
const ARTIST_FREQUENCY_LIMIT: usize = 5;

/// Run the alignment analysis.
///
/// Pure over its inputs; `now` anchors the days-since-added computation so
/// callers (and tests) control the clock.
pub fn analyze(
    releases: &[Release],
    top_tracks: &[TopTrack],
    top_artists: &[TopArtist],
    recent_tracks: &[PlayedTrack],
    mode: AnalysisMode,
    now: DateTime<Utc>,
) -> AnalysisReport {
    let builder = ReportBuilder::new(releases, top_tracks, top_artists, recent_tracks);

    AnalysisReport {
        summary: builder.summary(),
        insights: mode.wants_insights().then(|| builder.insights()),
        comparison: mode.wants_comparison().then(|| builder.comparison(now)),
    }
}

/// Normalized (artist, album) pair, the identity albums are compared under.
type AlbumKey = (String, String);

fn album_key(artist: &str, album: &str) -> AlbumKey {
    (normalize_artist(artist), normalize_album(album))
}

/// One owned release annotated with its listening signals.
struct ReleaseSignal<'a> {
    release: &'a Release,
    play_count: usize,
    in_top_tracks: bool,
}

impl ReleaseSignal<'_> {
    fn listened(&self) -> bool {
        self.play_count > 0 || self.in_top_tracks
    }
}

/// Shared precomputation for all report sections. Built once per request,
/// sections read from it on demand.
struct ReportBuilder<'a> {
    releases: &'a [Release],
    top_artists: &'a [TopArtist],
    signals: Vec<ReleaseSignal<'a>>,
    /// Unique listened albums matched against the collection.
    listened_matches: Vec<MatchResult>,
}

impl<'a> ReportBuilder<'a> {
    fn new(
        releases: &'a [Release],
        top_tracks: &'a [TopTrack],
        top_artists: &'a [TopArtist],
        recent_tracks: &'a [PlayedTrack],
    ) -> Self {
        let mut play_counts: HashMap<AlbumKey, usize> = HashMap::new();
        for track in recent_tracks {
            *play_counts
                .entry(album_key(&track.artist, &track.album))
                .or_default() += 1;
        }

        let top_track_albums: HashSet<AlbumKey> = top_tracks
            .iter()
            .map(|track| album_key(&track.artist, &track.album))
            .collect();

        let signals = releases
            .iter()
            .map(|release| {
                let key = album_key(&release.artist, &release.album);
                ReleaseSignal {
                    release,
                    play_count: play_counts.get(&key).copied().unwrap_or(0),
                    in_top_tracks: top_track_albums.contains(&key),
                }
            })
            .collect();

        // Everything listened to, top tracks first, recent plays after
        let listened = extract_unique_albums(
            top_tracks
                .iter()
                .map(|track| CandidateAlbum {
                    name: track.album.clone(),
                    artist: track.artist.clone(),
                })
                .chain(recent_tracks.iter().map(|track| CandidateAlbum {
                    name: track.album.clone(),
                    artist: track.artist.clone(),
                })),
        );
        let listened_matches = match_many(&listened, releases);

        Self {
            releases,
            top_artists,
            signals,
            listened_matches,
        }
    }

    fn summary(&self) -> AlignmentSummary {
        let owned_and_listened = self.signals.iter().filter(|s| s.listened()).count();
        let owned_not_listened = self.signals.len() - owned_and_listened;
        let listened_not_owned = self
            .listened_matches
            .iter()
            .filter(|result| !result.is_owned())
            .count();

        let alignment_score = percentage(
            owned_and_listened,
            owned_and_listened + owned_not_listened + listened_not_owned,
        );

        let both = self.listened_matches.len() - listened_not_owned;
        let only_owned = self.releases.len().saturating_sub(both);
        let only_listened = listened_not_owned;
        let venn = VennData {
            both,
            only_owned,
            only_listened,
            overlap_percentage: percentage(both, both + only_owned + only_listened),
        };

        AlignmentSummary {
            alignment_score,
            owned_and_listened,
            owned_not_listened,
            listened_not_owned,
            total_owned: self.releases.len(),
            total_listened_unique: self.listened_matches.len(),
            venn,
        }
    }

    fn insights(&self) -> InsightsSection {
        // Most played: descending play count, collection order breaks ties
        let mut played: Vec<&ReleaseSignal> =
            self.signals.iter().filter(|s| s.play_count > 0).collect();
        played.sort_by(|a, b| b.play_count.cmp(&a.play_count));
        let most_played = played
            .into_iter()
            .take(MOST_PLAYED_LIMIT)
            .map(|signal| PlayedAlbum {
                artist: signal.release.artist.clone(),
                album: signal.release.album.clone(),
                play_count: signal.play_count,
            })
            .collect();

        // Least played: untouched releases, oldest acquisition first,
        // unknown dates last
        let mut shelved: Vec<&ReleaseSignal> =
            self.signals.iter().filter(|s| !s.listened()).collect();
        shelved.sort_by(|a, b| {
            cmp_options_none_last(a.release.date_added.as_ref(), b.release.date_added.as_ref())
        });
        let least_played = shelved
            .into_iter()
            .take(LEAST_PLAYED_LIMIT)
            .map(|signal| ShelvedAlbum {
                artist: signal.release.artist.clone(),
                album: signal.release.album.clone(),
                date_added: signal.release.date_added,
            })
            .collect();

        InsightsSection {
            most_played,
            least_played,
            genres: self.genre_counts(),
            acquisition_timeline: self.acquisition_timeline(),
        }
    }

    fn genre_counts(&self) -> Vec<GenreCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for release in self.releases {
            for genre in &release.genres {
                *counts.entry(genre.as_str()).or_default() += 1;
            }
        }

        let mut genres: Vec<GenreCount> = counts
            .into_iter()
            .map(|(genre, count)| GenreCount {
                genre: genre.to_string(),
                count,
            })
            .collect();
        genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
        genres.truncate(GENRE_LIMIT);
        genres
    }

    fn acquisition_timeline(&self) -> Vec<TimelinePoint> {
        let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
        for release in self.releases {
            if let Some(date_added) = release.date_added {
                let month = format!("{:04}-{:02}", date_added.year(), date_added.month());
                *by_month.entry(month).or_default() += 1;
            }
        }

        let mut total = 0;
        by_month
            .into_iter()
            .map(|(month, added)| {
                total += added;
                TimelinePoint {
                    month,
                    added,
                    total,
                }
            })
            .collect()
    }

    fn comparison(&self, now: DateTime<Utc>) -> ComparisonSection {
        // Owned-album count per normalized artist
        let mut owned_by_artist: HashMap<String, usize> = HashMap::new();
        for release in self.releases {
            *owned_by_artist
                .entry(normalize_artist(&release.artist))
                .or_default() += 1;
        }

        let artist_overlap = self
            .top_artists
            .iter()
            .enumerate()
            .filter_map(|(index, artist)| {
                owned_by_artist
                    .get(&normalize_artist(&artist.name))
                    .map(|&owned_albums| ArtistOverlap {
                        artist: artist.name.clone(),
                        rank: index + 1,
                        owned_albums,
                        genres: artist.genres.clone(),
                    })
            })
            .collect();

        // Releases no listened album matched onto
        let matched_ids: HashSet<&str> = self
            .listened_matches
            .iter()
            .filter(|result| result.is_owned())
            .filter_map(|result| result.matched_release.as_ref())
            .map(|release| release.release_id.as_str())
            .collect();
        let mut not_matching_listening: Vec<NeglectedRelease> = self
            .releases
            .iter()
            .filter(|release| !matched_ids.contains(release.release_id.as_str()))
            .map(|release| NeglectedRelease {
                artist: release.artist.clone(),
                album: release.album.clone(),
                days_since_added: release
                    .date_added
                    .map(|date_added| (now - date_added).num_days()),
            })
            .collect();
        // Longest-shelved first, unknown dates last
        not_matching_listening.sort_by(|a, b| match (a.days_since_added, b.days_since_added) {
            (Some(a_days), Some(b_days)) => b_days.cmp(&a_days),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let missing_artists = top_artist_frequencies(
            self.listened_matches
                .iter()
                .filter(|result| !result.is_owned())
                .map(|result| result.candidate.artist.as_str()),
        );
        let unplayed_artists = top_artist_frequencies(
            self.signals
                .iter()
                .filter(|signal| !signal.listened())
                .map(|signal| signal.release.artist.as_str()),
        );

        ComparisonSection {
            artist_overlap,
            not_matching_listening,
            missing_artists,
            unplayed_artists,
        }
    }
}

/// Rounded percentage with the zero-denominator guard.
fn percentage(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (100.0 * numerator as f64 / denominator as f64).round() as u32
}

/// Ascending comparison over optional values, `None` always last.
fn cmp_options_none_last<T: Ord>(a: Option<&T>, b: Option<&T>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

/// Frequency table over artist display names, keyed by normalized name,
/// first-seen display string wins. Top entries only.
fn top_artist_frequencies<'a, I>(artists: I) -> Vec<ArtistFrequency>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();
    for artist in artists {
        let entry = counts
            .entry(normalize_artist(artist))
            .or_insert_with(|| (artist.to_string(), 0));
        entry.1 += 1;
    }

    let mut frequencies: Vec<ArtistFrequency> = counts
        .into_values()
        .map(|(artist, count)| ArtistFrequency { artist, count })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.artist.cmp(&b.artist)));
    frequencies.truncate(ARTIST_FREQUENCY_LIMIT);
    frequencies
}
