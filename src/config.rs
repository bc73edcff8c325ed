//! Options for the Deezer source.
//!
//! Options can be built directly, read from an untyped JSON object (the shape hosts
//! usually pass plugin options in), or read from `DEEZER_*` environment variables.
//! The JSON and environment paths validate every value eagerly.

use serde_json::{Map, Value};
use std::env;
use url::Url;

use crate::error::ConfigError;
use crate::sources::deezer::api::BASE_URL;

pub const ENV_ALBUM_LIMIT: &str = "DEEZER_ALBUM_LIMIT";
pub const ENV_PLAYLIST_LIMIT: &str = "DEEZER_PLAYLIST_LIMIT";
pub const ENV_CONVERT_UNRESOLVED: &str = "DEEZER_CONVERT_UNRESOLVED";
pub const ENV_QUERY_SOURCE: &str = "DEEZER_QUERY_SOURCE";
pub const ENV_API_URL: &str = "DEEZER_API_URL";

/// Source tags used when none are configured.
pub const DEFAULT_QUERY_SOURCES: [&str; 2] = ["deezer", "dz"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Maximum number of album tracks returned, 0 for all.
    pub album_limit: usize,
    /// Maximum number of playlist tracks returned, 0 for all.
    pub playlist_limit: usize,
    /// Resolve every track through the fallback search before returning it.
    pub convert_unresolved: bool,
    /// Source tags that route a structured query to Deezer's free-text search.
    pub query_source: Vec<String>,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            album_limit: 0,
            playlist_limit: 0,
            convert_unresolved: false,
            query_source: DEFAULT_QUERY_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AdapterOptions {
    /// Reads options from a JSON object using the host's camelCase keys.
    ///
    /// Missing or `null` keys keep their default; unknown keys are ignored. Negative
    /// limits mean "unlimited" and fractional limits are truncated.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => {
                return Err(ConfigError::InvalidType {
                    option: "options",
                    expected: "an object",
                });
            }
        };

        let mut options = Self::default();

        if let Some(value) = provided(map, "convertUnresolved") {
            options.convert_unresolved = value.as_bool().ok_or(ConfigError::InvalidType {
                option: "convertUnresolved",
                expected: "a boolean",
            })?;
        }

        if let Some(value) = provided(map, "playlistLimit") {
            options.playlist_limit = parse_limit(value, "playlistLimit")?;
        }

        if let Some(value) = provided(map, "albumLimit") {
            options.album_limit = parse_limit(value, "albumLimit")?;
        }

        if let Some(value) = provided(map, "querySource") {
            let invalid = || ConfigError::InvalidType {
                option: "querySource",
                expected: "an array of strings",
            };
            options.query_source = value
                .as_array()
                .ok_or_else(invalid)?
                .iter()
                .map(|tag| tag.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<_, _>>()?;
        }

        Ok(options)
    }

    /// Reads options from `DEEZER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads options through `lookup`, which maps a variable name to its value.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        if let Some(value) = lookup(ENV_ALBUM_LIMIT) {
            options.album_limit = parse_env_limit(ENV_ALBUM_LIMIT, value)?;
        }

        if let Some(value) = lookup(ENV_PLAYLIST_LIMIT) {
            options.playlist_limit = parse_env_limit(ENV_PLAYLIST_LIMIT, value)?;
        }

        if let Some(value) = lookup(ENV_CONVERT_UNRESOLVED) {
            options.convert_unresolved = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_CONVERT_UNRESOLVED,
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup(ENV_QUERY_SOURCE) {
            options.query_source = value
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(options)
    }

    pub fn is_query_source(&self, source: &str) -> bool {
        self.query_source.iter().any(|tag| tag == source)
    }
}

/// Picks the API base URL: `explicit`, then `DEEZER_API_URL`, then the public API.
pub fn api_base_url(explicit: Option<String>) -> Result<String, ConfigError> {
    match explicit.or_else(|| env::var(ENV_API_URL).ok()) {
        Some(url) => Ok(Url::parse(&url)?.to_string()),
        None => Ok(BASE_URL.to_string()),
    }
}

fn provided<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn parse_limit(value: &Value, option: &'static str) -> Result<usize, ConfigError> {
    let limit = value.as_f64().ok_or(ConfigError::InvalidType {
        option,
        expected: "a number",
    })?;
    // Saturating cast; anything at or below zero means unlimited.
    Ok(if limit <= 0.0 { 0 } else { limit.trunc() as usize })
}

fn parse_env_limit(var: &'static str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(limit) => Ok(usize::try_from(limit).unwrap_or(0)),
        Err(_) => Err(ConfigError::InvalidEnv { var, value }),
    }
}
