//! Episode number inference from filenames
//!
//! This module looks at a bare filename and makes a best guess at which
//! absolute episode number it carries. Two passes are tried in order:
//!
//! 1. A *strict* pass that only accepts a 1-4 digit token delimited on both
//!    sides by whitespace or a hyphen (`Show - 07 - Title.mkv`).
//! 2. A *loose* pass that considers every word-bounded 1-4 digit run, drops
//!    years and resolution markers, and keeps the last survivor
//!    (`Show.1080p.12.mkv`).

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// A digit token standing alone between ASCII whitespace or hyphens.
static STRICT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[\t\n\f\r ]|-)([0-9]{1,4})(?:[\t\n\f\r ]|-)").unwrap()
});

/// Any word-bounded digit run of up to four digits. Word edges are ASCII
/// only: non-ASCII letters next to the digits count as separators.
static LOOSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)[0-9]{1,4}(?-u:\b)").unwrap());

/// Numbers at or above this value are read as a calendar year.
const YEAR_THRESHOLD: u32 = 1900;

/// Common vertical resolutions that show up as bare numbers.
const RESOLUTION_MARKERS: [u32; 3] = [720, 1080, 2160];

/// Which rule produced an episode number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Delimiter-bounded token
    Strict,
    /// Best-effort fallback over all digit runs
    Loose,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Strict => write!(f, "strict"),
            MatchType::Loose => write!(f, "loose"),
        }
    }
}

/// Result of matching a single filename
///
/// A match without a `match_type` means no usable episode number was found;
/// `episode_number` then stays at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMatch {
    /// The filename exactly as read from the directory
    pub filename: String,
    /// The inferred absolute episode number
    pub episode_number: u32,
    /// The rule that produced `episode_number`, if any
    pub match_type: Option<MatchType>,
}

impl EpisodeMatch {
    fn found(filename: &str, episode_number: u32, match_type: MatchType) -> Self {
        Self {
            filename: filename.to_string(),
            episode_number,
            match_type: Some(match_type),
        }
    }

    fn not_found(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            episode_number: 0,
            match_type: None,
        }
    }

    /// Returns true if an episode number could be extracted
    pub fn is_found(&self) -> bool {
        self.match_type.is_some()
    }
}

/// Infers the absolute episode number carried by a filename
///
/// Never fails: a filename without a usable number yields a match for which
/// [`EpisodeMatch::is_found`] returns false.
///
/// # Examples
///
/// ```
/// use tvdb_renamer::{match_episode_number, MatchType};
///
/// let strict = match_episode_number("Show - 07 - Title.mkv");
/// assert_eq!(strict.episode_number, 7);
/// assert_eq!(strict.match_type, Some(MatchType::Strict));
///
/// let loose = match_episode_number("Show.1080p.12.mkv");
/// assert_eq!(loose.episode_number, 12);
/// assert_eq!(loose.match_type, Some(MatchType::Loose));
///
/// assert!(!match_episode_number("Show.2024.1080p.mkv").is_found());
/// ```
pub fn match_episode_number(filename: &str) -> EpisodeMatch {
    if let Some(number) = strict_candidate(filename) {
        tracing::debug!(filename, number, "strict episode match");
        return EpisodeMatch::found(filename, number, MatchType::Strict);
    }

    if let Some(number) = loose_candidate(filename) {
        tracing::debug!(filename, number, "loose episode match");
        return EpisodeMatch::found(filename, number, MatchType::Loose);
    }

    tracing::debug!(filename, "no episode number found");
    EpisodeMatch::not_found(filename)
}

/// First delimiter-bounded token, if any
fn strict_candidate(filename: &str) -> Option<u32> {
    STRICT_PATTERN
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Last digit run surviving the year and resolution filter
fn loose_candidate(filename: &str) -> Option<u32> {
    LOOSE_PATTERN
        .find_iter(filename)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|&number| !is_excluded(number))
        .last()
}

fn is_excluded(number: u32) -> bool {
    number >= YEAR_THRESHOLD || RESOLUTION_MARKERS.contains(&number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_match_between_hyphens() {
        let result = match_episode_number("Show - 07 - Title.mkv");
        assert_eq!(result.filename, "Show - 07 - Title.mkv");
        assert_eq!(result.episode_number, 7);
        assert_eq!(result.match_type, Some(MatchType::Strict));
        assert!(result.is_found());
    }

    #[test]
    fn test_strict_match_between_spaces() {
        let result = match_episode_number("My Show 113 [1080p].mkv");
        assert_eq!(result.episode_number, 113);
        assert_eq!(result.match_type, Some(MatchType::Strict));
    }

    #[test]
    fn test_strict_uses_first_token() {
        let result = match_episode_number("Show - 03 - 04 - Title.mkv");
        assert_eq!(result.episode_number, 3);
        assert_eq!(result.match_type, Some(MatchType::Strict));
    }

    #[test]
    fn test_strict_is_not_subject_to_denylist() {
        let result = match_episode_number("Show - 1080 - Title.mkv");
        assert_eq!(result.episode_number, 1080);
        assert_eq!(result.match_type, Some(MatchType::Strict));
    }

    #[test]
    fn test_strict_rejects_five_digit_token() {
        // 12345 is never a strict token, and too long for the loose pass
        let result = match_episode_number("Show - 12345 - Title.mkv");
        assert!(!result.is_found());
    }

    #[test]
    fn test_loose_keeps_last_candidate() {
        let result = match_episode_number("Show.1080p.12.mkv");
        assert_eq!(result.episode_number, 12);
        assert_eq!(result.match_type, Some(MatchType::Loose));
    }

    #[test]
    fn test_loose_last_wins_over_earlier_candidates() {
        let result = match_episode_number("Show.S2.E05.[720].mkv");
        // "S2" and "E05" are not word-bounded digit runs; only 720 is, and it is excluded
        assert!(!result.is_found());

        let result = match_episode_number("Show.02.[Group].15.mkv");
        assert_eq!(result.episode_number, 15);
        assert_eq!(result.match_type, Some(MatchType::Loose));
    }

    #[test]
    fn test_loose_excludes_years_and_resolutions() {
        assert!(!match_episode_number("Show.2024.1080p.mkv").is_found());
        assert!(!match_episode_number("Show.1999.720.mkv").is_found());
        assert!(!match_episode_number("Show.2160.mkv").is_found());
    }

    #[test]
    fn test_loose_year_boundary() {
        let result = match_episode_number("Show.1899.mkv");
        assert_eq!(result.episode_number, 1899);
        assert_eq!(result.match_type, Some(MatchType::Loose));
    }

    #[test]
    fn test_zero_is_a_valid_candidate() {
        let result = match_episode_number("Show.00.mkv");
        assert!(result.is_found());
        assert_eq!(result.episode_number, 0);
    }

    #[test]
    fn test_no_digits() {
        let result = match_episode_number("Just A Title.mkv");
        assert_eq!(result, EpisodeMatch::not_found("Just A Title.mkv"));
        assert_eq!(result.episode_number, 0);
        assert_eq!(result.match_type, None);
    }

    #[test]
    fn test_loose_match_next_to_non_ascii_letters() {
        let result = match_episode_number("第12話.mkv");
        assert_eq!(result.episode_number, 12);
        assert_eq!(result.match_type, Some(MatchType::Loose));

        let result = match_episode_number("Café12.mkv");
        assert_eq!(result.episode_number, 12);
        assert_eq!(result.match_type, Some(MatchType::Loose));
    }

    #[test]
    fn test_non_ascii_whitespace_is_not_a_strict_delimiter() {
        // U+3000 ideographic space
        let result = match_episode_number("Show\u{3000}07\u{3000}Title.mkv");
        assert_eq!(result.episode_number, 7);
        assert_eq!(result.match_type, Some(MatchType::Loose));
    }

    #[test]
    fn test_match_type_display() {
        assert_eq!(MatchType::Strict.to_string(), "strict");
        assert_eq!(MatchType::Loose.to_string(), "loose");
    }
}
