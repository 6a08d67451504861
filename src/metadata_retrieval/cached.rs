//! Cached metadata provider implementation
//!
//! This module provides a caching wrapper for metadata providers that
//! stores resolved episodes in a local cache, so re-running the renamer on
//! the same directory does not repeat every lookup.

use super::{EpisodeInfo, MetadataProvider, MetadataRetrievalError, SeriesCandidate};
use crate::cache::CacheStorage;

/// A caching wrapper for metadata providers
///
/// Episode lookups are cached per series and absolute number. Series searches
/// always go to the wrapped provider. Cache failures are logged and otherwise
/// ignored; they never fail a lookup.
pub struct CachedMetadataProvider<P>
where
    P: MetadataProvider,
{
    /// The underlying metadata provider
    provider: P,
    /// Cache storage for episode data
    cache: CacheStorage<EpisodeInfo>,
}

impl<P> CachedMetadataProvider<P>
where
    P: MetadataProvider,
{
    /// Creates a new cached metadata provider wrapping the given provider
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let tvdb = TvdbProvider::login(&config.api_key)?;
    /// let cache = CacheStorage::open("episodes", Some(Duration::from_secs(86400)))?;
    /// let cached = CachedMetadataProvider::new(tvdb, cache);
    /// ```
    pub fn new(provider: P, cache: CacheStorage<EpisodeInfo>) -> Self {
        Self { provider, cache }
    }

    fn cache_key(series: &SeriesCandidate, absolute_number: u32) -> String {
        format!("{}_{}", series.id, absolute_number)
    }
}

impl<P> MetadataProvider for CachedMetadataProvider<P>
where
    P: MetadataProvider,
{
    fn search_series(&self, query: &str) -> Result<Vec<SeriesCandidate>, MetadataRetrievalError> {
        self.provider.search_series(query)
    }

    fn fetch_episode(
        &self,
        series: &SeriesCandidate,
        absolute_number: u32,
    ) -> Result<EpisodeInfo, MetadataRetrievalError> {
        let cache_key = Self::cache_key(series, absolute_number);

        match self.cache.load(&cache_key) {
            Ok(Some(episode)) => {
                tracing::debug!(%cache_key, "episode cache hit");
                return Ok(episode);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(%cache_key, error = %e, "ignoring unreadable cache entry");
            }
        }

        let episode = self.provider.fetch_episode(series, absolute_number)?;

        if let Err(e) = self.cache.store(&cache_key, &episode) {
            tracing::warn!(%cache_key, error = %e, "failed to cache episode");
        }

        Ok(episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CountingProvider {
        calls: Cell<usize>,
    }

    impl MetadataProvider for CountingProvider {
        fn search_series(
            &self,
            query: &str,
        ) -> Result<Vec<SeriesCandidate>, MetadataRetrievalError> {
            Err(MetadataRetrievalError::SeriesNotFound(query.to_string()))
        }

        fn fetch_episode(
            &self,
            _series: &SeriesCandidate,
            absolute_number: u32,
        ) -> Result<EpisodeInfo, MetadataRetrievalError> {
            self.calls.set(self.calls.get() + 1);
            Ok(EpisodeInfo {
                season_number: 1,
                seasonal_episode_number: absolute_number,
                title: format!("Episode {}", absolute_number),
            })
        }
    }

    fn series() -> SeriesCandidate {
        SeriesCandidate {
            id: "42".to_string(),
            name: "Show".to_string(),
            year: "2001".to_string(),
        }
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStorage::open_in(dir.path(), None).unwrap();
        let provider = CachedMetadataProvider::new(
            CountingProvider {
                calls: Cell::new(0),
            },
            cache,
        );

        let first = provider.fetch_episode(&series(), 3).unwrap();
        let second = provider.fetch_episode(&series(), 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.provider.calls.get(), 1);

        provider.fetch_episode(&series(), 4).unwrap();
        assert_eq!(provider.provider.calls.get(), 2);
    }

    #[test]
    fn test_search_is_passed_through() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStorage::open_in(dir.path(), None).unwrap();
        let provider = CachedMetadataProvider::new(
            CountingProvider {
                calls: Cell::new(0),
            },
            cache,
        );

        assert!(matches!(
            provider.search_series("Nothing"),
            Err(MetadataRetrievalError::SeriesNotFound(_))
        ));
    }
}
