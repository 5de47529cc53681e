//! Cross-service aggregation on top of the album matcher.
//!
//! Pure functions over already-fetched listening and collection records:
//! vinyl purchase recommendations, and collection/listening alignment
//! analysis with mode-selected report sections. No I/O happens here.

mod alignment;
mod recommend;

pub use alignment::{
    analyze, AlignmentSummary, AnalysisMode, AnalysisReport, ArtistFrequency, ArtistOverlap,
    ComparisonSection, GenreCount, InsightsSection, NeglectedRelease, PlayedAlbum, ShelvedAlbum,
    TimelinePoint, VennData,
};
pub use recommend::{
    rank_candidates, recommend, ArtistCount, RankedCandidate, Recommendation,
    RecommendationReport,
};
