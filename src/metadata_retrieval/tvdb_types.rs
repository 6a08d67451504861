/// TheTVDB v4 API request and response types.
///
/// These structures mirror the JSON format of the endpoints we call. Only the
/// fields the renamer reads are declared.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generic `{"status": ..., "data": ...}` envelope used by every endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvdbResponse<T> {
    pub data: T,
}

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub apikey: &'a str,
}

/// `data` of the login response.
#[derive(Debug, Deserialize)]
pub(super) struct LoginData {
    #[serde(default)]
    pub token: String,
}

/// A single hit from `GET /search?type=series`.
#[derive(Debug, Deserialize)]
pub(super) struct TvdbSeries {
    pub tvdb_id: String,
    pub name: String,
    #[serde(default)]
    pub year: Option<String>,
    /// Language code to translated name
    #[serde(default)]
    pub translations: Option<HashMap<String, String>>,
}

/// `data` of `GET /series/{id}/episodes/absolute`.
#[derive(Debug, Deserialize)]
pub(super) struct SeriesEpisodes {
    #[serde(default)]
    pub episodes: Option<Vec<TvdbEpisode>>,
}

/// Episode summary record; we only need its identifier.
#[derive(Debug, Deserialize)]
pub(super) struct TvdbEpisode {
    pub id: u64,
}

/// `data` of `GET /episodes/{id}/extended?meta=translations`.
#[derive(Debug, Deserialize)]
pub(super) struct EpisodeExtended {
    /// Episode number within its season
    pub number: u32,
    #[serde(default)]
    pub seasons: Option<Vec<TvdbSeason>>,
    #[serde(default)]
    pub translations: Option<Translations>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvdbSeason {
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct Translations {
    #[serde(rename = "nameTranslations", default)]
    pub name_translations: Option<Vec<NameTranslation>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NameTranslation {
    pub name: Option<String>,
    pub language: String,
}
