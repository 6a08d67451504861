//! Runtime configuration from the environment
//!
//! A `.env` file in the working directory is loaded first (if present), so
//! the API key can live next to the videos instead of in the shell profile.

use thiserror::Error;

/// Environment variable holding the TheTVDB API key
pub const API_KEY_VAR: &str = "TVDB_API_KEY";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TVDB_API_KEY is not set (env var or .env)")]
    MissingApiKey,

    #[error("Failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

/// Settings needed to talk to TheTVDB
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Loads `.env` and reads the configuration from the environment
    ///
    /// A missing `.env` file is fine; a malformed one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self { api_key })
    }
}
