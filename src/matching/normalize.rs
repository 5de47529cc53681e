//! Text normalization for artist and album comparison.
//!
//! Both services decorate the same logical album with different noise:
//! Spotify appends edition markers ("OK Computer (Remastered 2009)"),
//! Discogs keeps catalog punctuation and leading articles. Everything is
//! canonicalized here before any similarity is computed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Parenthesized spans: "(Remastered 2009)", "(Deluxe Edition)"
    static ref PAREN_SPAN: Regex = Regex::new(r"\([^)]*\)").unwrap();

    /// Bracketed spans: "[Mono]", "[2011 Remaster]"
    static ref BRACKET_SPAN: Regex = Regex::new(r"\[[^\]]*\]").unwrap();

    /// Trailing edition clause introduced by a hyphen, with or without a
    /// 4-digit year: "- 2009 Remaster", "- Deluxe Edition", "- Mono"
    static ref EDITION_SUFFIX: Regex = Regex::new(
        r"(?i)\s*-\s*(?:\d{4}\s+)?(?:deluxe|remastered|remaster|expanded|anniversary|edition|special|bonus|mono|stereo)\b.*$"
    )
    .unwrap();

    /// Anything that is neither a word character nor whitespace
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();

    /// Whitespace runs
    static ref MULTI_SPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize an artist name for matching.
///
/// Lower-cases, strips a single leading "The ", drops punctuation and
/// collapses whitespace. Idempotent.
pub fn normalize_artist(artist: &str) -> String {
    let mut result = artist.to_lowercase();

    if let Some(stripped) = result.strip_prefix("the ") {
        result = stripped.to_string();
    }

    let result = NON_WORD.replace_all(&result, "");
    let result = MULTI_SPACE.replace_all(&result, " ");
    result.trim().to_string()
}

/// Normalize an album title for matching.
///
/// Removes parenthesized and bracketed spans and trailing hyphenated
/// edition clauses ("- 2009 Remaster", "- Deluxe Edition") before the
/// punctuation/whitespace cleanup. Idempotent.
pub fn normalize_album(album: &str) -> String {
    let mut result = album.to_lowercase();

    result = PAREN_SPAN.replace_all(&result, "").to_string();
    result = BRACKET_SPAN.replace_all(&result, "").to_string();
    result = EDITION_SUFFIX.replace(&result, "").to_string();

    let result = NON_WORD.replace_all(&result, "");
    let result = MULTI_SPACE.replace_all(&result, " ");
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_artist_basic() {
        assert_eq!(normalize_artist("The Beatles"), "beatles");
        assert_eq!(normalize_artist("Radiohead"), "radiohead");
        assert_eq!(normalize_artist("  Sigur  Rós  "), "sigur rós");
        assert_eq!(normalize_artist("AC/DC"), "acdc");
    }

    #[test]
    fn test_normalize_artist_strips_single_article() {
        // Only one leading article goes away
        assert_eq!(normalize_artist("The The"), "the");
        // "Theatre" must not lose its prefix
        assert_eq!(normalize_artist("Theatre of Tragedy"), "theatre of tragedy");
    }

    #[test]
    fn test_normalize_album_edition_markers() {
        assert_eq!(
            normalize_album("OK Computer (Remastered 2009)"),
            normalize_album("OK Computer")
        );
        assert_eq!(normalize_album("Abbey Road [2019 Mix]"), "abbey road");
        assert_eq!(normalize_album("In Rainbows - 2007 Remaster"), "in rainbows");
        assert_eq!(normalize_album("Kid A - Deluxe Edition"), "kid a");
        assert_eq!(normalize_album("Help! - Mono"), "help");
    }

    #[test]
    fn test_normalize_album_plain_titles_survive() {
        assert_eq!(normalize_album("Mono Masters"), "mono masters");
        assert_eq!(normalize_album("Special Beat Service"), "special beat service");
    }

    #[test]
    fn test_normalize_empty_and_idempotent() {
        assert_eq!(normalize_artist(""), "");
        assert_eq!(normalize_album(""), "");

        for raw in [
            "The Dark Side of the Moon (50th Anniversary) [Remaster]",
            "Rumours - 2004 Remaster",
            "...And Justice for All",
            "§¶•ªº",
        ] {
            let once = normalize_album(raw);
            assert_eq!(normalize_album(&once), once, "not idempotent for {:?}", raw);
        }

        for raw in ["The Velvet Underground & Nico", "múm", "!!!"] {
            let once = normalize_artist(raw);
            assert_eq!(normalize_artist(&once), once, "not idempotent for {:?}", raw);
        }
    }
}
