//! Error types for the Deezer source.
//!
//! `ConfigError` is raised while building the adapter and is never caught internally.
//! `DeezerError` covers everything that can go wrong while answering a search and is
//! always turned into a `SearchResult` before it reaches the host.

use thiserror::Error;

/// Errors raised while validating adapter options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An option was provided with the wrong type.
    #[error("Deezer option \"{option}\" must be {expected}.")]
    InvalidType {
        option: &'static str,
        expected: &'static str,
    },

    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    /// The configured API base URL is not a valid URL.
    #[error("Invalid Deezer API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors that can occur while fetching or converting Deezer data.
#[derive(Error, Debug)]
pub enum DeezerError {
    #[error("The Deezer track object was not provided")]
    MissingTrack,

    #[error("The track artist array was not provided")]
    MissingArtist,

    #[error("The track title was not provided")]
    MissingTitle,

    #[error("The track title must be a string, received type {0}")]
    InvalidTitle(&'static str),

    /// Transport failure or non-2xx status.
    #[error("API communication failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unable to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Deezer answers unknown ids with a 200 and an `error` object.
    #[error("Deezer API error {code} ({kind}): {message}")]
    Api {
        kind: String,
        message: String,
        code: u32,
    },

    #[error("Incorrect type for Deezer URL, must be one of \"track\", \"album\" or \"playlist\".")]
    UnsupportedUrlType(String),
}

/// Result type for Deezer operations.
pub type DeezerResult<T> = Result<T, DeezerError>;

/// Errors raised while resolving an unresolved track through the host.
#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("No matches found for \"{0}\"")]
    NoMatches(String),

    #[error("Failed to resolve track: {0}")]
    LoadFailed(String),
}
