/// TheTVDB v4 metadata provider implementation.
use super::tvdb_types::{
    EpisodeExtended, LoginData, LoginRequest, SeriesEpisodes, TvdbResponse, TvdbSeries,
};
use super::{EpisodeInfo, MetadataProvider, MetadataRetrievalError, SeriesCandidate};
use serde::de::DeserializeOwned;

/// Language code TheTVDB uses for English translations.
const ENGLISH: &str = "eng";

/// Metadata provider for the TheTVDB v4 API.
///
/// A provider is only ever handed out after a successful login; the bearer
/// token obtained there is attached to every subsequent request.
pub struct TvdbProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl TvdbProvider {
    /// Logs in against the public TheTVDB API.
    pub fn login(api_key: &str) -> Result<Self, MetadataRetrievalError> {
        Self::login_at("https://api4.thetvdb.com/v4", api_key)
    }

    /// Logs in against a TheTVDB-compatible API at `base_url`.
    pub fn login_at(base_url: &str, api_key: &str) -> Result<Self, MetadataRetrievalError> {
        let client = reqwest::blocking::Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();

        tracing::debug!(%base_url, "logging in to TheTVDB");

        let response = client
            .post(format!("{}/login", base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&LoginRequest { apikey: api_key })
            .send()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataRetrievalError::AuthenticationFailed(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let login: TvdbResponse<LoginData> = response
            .json()
            .map_err(|e| MetadataRetrievalError::ParseError(e.to_string()))?;

        if login.data.token.is_empty() {
            return Err(MetadataRetrievalError::AuthenticationFailed(
                "no token in login response".to_string(),
            ));
        }

        Ok(Self {
            client,
            base_url,
            token: login.data.token,
        })
    }

    /// Performs an authenticated GET and decodes the `data` envelope.
    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MetadataRetrievalError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "TheTVDB request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataRetrievalError::RequestError(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let envelope: TvdbResponse<T> = response
            .json()
            .map_err(|e| MetadataRetrievalError::ParseError(e.to_string()))?;

        Ok(envelope.data)
    }

    /// Converts a search hit to a candidate, preferring the English name.
    fn convert_series(series: TvdbSeries) -> SeriesCandidate {
        let name = series
            .translations
            .as_ref()
            .and_then(|t| t.get(ENGLISH))
            .filter(|eng| !eng.is_empty())
            .cloned()
            .unwrap_or(series.name);

        SeriesCandidate {
            id: series.tvdb_id,
            name,
            year: series.year.unwrap_or_default(),
        }
    }

    /// Converts an extended episode record to our internal `EpisodeInfo`.
    fn convert_episode(extended: EpisodeExtended) -> Result<EpisodeInfo, MetadataRetrievalError> {
        let season_number = extended
            .seasons
            .as_deref()
            .and_then(|seasons| seasons.first())
            .map(|season| season.number)
            .ok_or_else(|| {
                MetadataRetrievalError::InvalidData("Episode has no season".to_string())
            })?;

        let title = extended
            .translations
            .and_then(|t| t.name_translations)
            .unwrap_or_default()
            .into_iter()
            .find(|t| t.language == ENGLISH)
            .and_then(|t| t.name)
            .unwrap_or_default();

        Ok(EpisodeInfo {
            season_number,
            seasonal_episode_number: extended.number,
            title,
        })
    }
}

impl MetadataProvider for TvdbProvider {
    fn search_series(&self, query: &str) -> Result<Vec<SeriesCandidate>, MetadataRetrievalError> {
        let hits: Option<Vec<TvdbSeries>> =
            self.get("/search", &[("query", query), ("type", "series")])?;

        let candidates: Vec<SeriesCandidate> = hits
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_series)
            .collect();

        if candidates.is_empty() {
            return Err(MetadataRetrievalError::SeriesNotFound(query.to_string()));
        }

        Ok(candidates)
    }

    fn fetch_episode(
        &self,
        series: &SeriesCandidate,
        absolute_number: u32,
    ) -> Result<EpisodeInfo, MetadataRetrievalError> {
        let absolute = absolute_number.to_string();
        let listing: SeriesEpisodes = self.get(
            &format!("/series/{}/episodes/absolute", series.id),
            &[
                ("page", "1"),
                ("season", "1"),
                ("episodeNumber", absolute.as_str()),
            ],
        )?;

        let episode_id = listing
            .episodes
            .and_then(|episodes| episodes.into_iter().next())
            .map(|episode| episode.id)
            .ok_or_else(|| MetadataRetrievalError::EpisodeNotFound {
                series: series.name.clone(),
                absolute_number,
            })?;

        let extended: EpisodeExtended = self.get(
            &format!("/episodes/{}/extended", episode_id),
            &[("meta", "translations")],
        )?;

        Self::convert_episode(extended)
    }
}
