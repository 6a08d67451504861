/// Data structures and traits for TV series metadata retrieval.
///
/// This module provides the series and episode records the renamer needs,
/// as well as the trait metadata providers implement.
mod cached;
mod tvdb;
mod tvdb_types;

pub use cached::CachedMetadataProvider;
pub use tvdb::TvdbProvider;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during metadata retrieval operations.
#[derive(Debug, Error)]
pub enum MetadataRetrievalError {
    /// The provider rejected our credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request to the metadata provider failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the provider's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested series was not found
    #[error("Series not found: {0}")]
    SeriesNotFound(String),

    /// No episode exists for the given absolute number
    #[error("No episode {absolute_number} found for {series}")]
    EpisodeNotFound { series: String, absolute_number: u32 },

    /// The API returned invalid or unexpected data
    #[error("API returned invalid data: {0}")]
    InvalidData(String),
}

/// A series returned by a search, offered for disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesCandidate {
    /// Provider-specific series identifier
    pub id: String,
    /// Display name (English where available)
    pub name: String,
    /// First-aired year, as reported by the provider (may be empty)
    pub year: String,
}

impl SeriesCandidate {
    /// Label shown when the user picks between several candidates
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.year).trim_end().to_string()
    }
}

/// Metadata for a single episode, resolved from its absolute number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    /// The season this episode belongs to
    pub season_number: u32,
    /// The episode number within the season
    pub seasonal_episode_number: u32,
    /// English episode title, empty when untranslated
    pub title: String,
}

/// Trait for metadata providers that can resolve series and episodes.
///
/// Implementors of this trait can retrieve episode metadata from various sources
/// such as TVDB, TMDB, or other episode databases.
pub trait MetadataProvider {
    /// Searches for series matching a free-text title query.
    ///
    /// # Returns
    ///
    /// All candidates in provider order. An empty result is reported as
    /// `SeriesNotFound` rather than an empty vector.
    fn search_series(&self, query: &str) -> Result<Vec<SeriesCandidate>, MetadataRetrievalError>;

    /// Resolves an absolute episode number to season, in-season number and title.
    ///
    /// # Arguments
    ///
    /// * `series` - The series previously chosen from `search_series`
    /// * `absolute_number` - The episode's position counted across all seasons
    fn fetch_episode(
        &self,
        series: &SeriesCandidate,
        absolute_number: u32,
    ) -> Result<EpisodeInfo, MetadataRetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_label() {
        let series = SeriesCandidate {
            id: "81189".to_string(),
            name: "Breaking Bad".to_string(),
            year: "2008".to_string(),
        };
        assert_eq!(series.label(), "Breaking Bad 2008");

        let no_year = SeriesCandidate {
            year: String::new(),
            ..series
        };
        assert_eq!(no_year.label(), "Breaking Bad");
    }
}
