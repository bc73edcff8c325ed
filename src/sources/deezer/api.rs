//! Thin client for Deezer's public REST API.
//! Recognises Deezer URLs and fetches tracks, albums, playlists and free-text searches.

use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::HTTP_CLIENT;
use crate::error::{DeezerError, DeezerResult};
use crate::manager::track::UnresolvedTrack;

use super::track::{RawCatalogTrack, TrackList, convert_to_unresolved};

/// Base URL of the public Deezer API.
pub const BASE_URL: &str = "https://api.deezer.com";

/// Regex to match Deezer track, album and playlist URLs, capturing the type and numeric id.
static DEEZER_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?deezer\.com/(?:[A-Za-z0-9_]{2}/)?(track|album|playlist)/(\d+)")
        .unwrap()
});

/// The entity type and id captured from a Deezer URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeezerUrl {
    pub kind: String,
    pub id: String,
}

/// Tracks fetched for one entity, plus the album or playlist title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogEntity {
    pub name: Option<String>,
    pub tracks: Vec<UnresolvedTrack>,
}

/// Album and playlist payloads share this shape.
#[derive(Debug, Deserialize)]
struct RawCollection {
    title: Option<String>,
    #[serde(default)]
    tracks: TrackList,
}

#[derive(Debug, Deserialize)]
struct RawApiError {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: u32,
}

/// Client for the Deezer API.
#[derive(Debug, Clone)]
pub struct DeezerApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for DeezerApi {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl DeezerApi {
    /// Creates a client for the API at `base_url`, sharing the crate's HTTP client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks if the given query is a Deezer track, album or playlist URL.
    pub fn is_deezer_url(query: &str) -> bool {
        DEEZER_URL_REGEX.is_match(query)
    }

    /// Extracts the entity type and id from a Deezer URL.
    pub fn parse_url(query: &str) -> Option<DeezerUrl> {
        let captures = DEEZER_URL_REGEX.captures(query)?;
        Some(DeezerUrl {
            kind: captures.get(1)?.as_str().to_string(),
            id: captures.get(2)?.as_str().to_string(),
        })
    }

    /// GETs `path` and decodes the body, turning Deezer's in-band error object into an error.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DeezerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting Deezer API: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        if let Some(error) = body.get("error").filter(|e| e.is_object()) {
            let error: RawApiError = serde_json::from_value(error.clone())?;
            return Err(DeezerError::Api {
                kind: error.kind,
                message: error.message,
                code: error.code,
            });
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Free-text track search.
    ///
    /// Any failure to obtain a response (transport, status, body or API error) yields an
    /// empty list. Only conversion errors are returned.
    pub async fn search_tracks(&self, query: &str) -> DeezerResult<Vec<UnresolvedTrack>> {
        let url = format!("{}/search/track", self.base_url);
        debug!("Searching Deezer for: {}", query);

        let response = async {
            let response = self
                .client
                .get(&url)
                .query(&[("q", query)])
                .send()
                .await?
                .error_for_status()?;
            Ok::<_, reqwest::Error>(response.json::<TrackList>().await?)
        }
        .await;

        let list = match response {
            Ok(list) => list,
            Err(e) => {
                warn!("Deezer search for {:?} failed, returning no results: {}", query, e);
                return Ok(Vec::new());
            }
        };

        let tracks = list
            .data
            .iter()
            .map(|track| convert_to_unresolved(track.as_ref()))
            .collect::<DeezerResult<Vec<_>>>()?;

        debug!("Deezer search for {:?} returned {} tracks", query, tracks.len());
        Ok(tracks)
    }

    /// Fetches a single track by id.
    pub async fn get_track(&self, id: &str) -> DeezerResult<CatalogEntity> {
        let track: RawCatalogTrack = self.get_json(&format!("/track/{}", id)).await?;

        Ok(CatalogEntity {
            name: None,
            tracks: vec![convert_to_unresolved(Some(&track))?],
        })
    }

    /// Fetches an album's tracks, keeping the first `limit` when `limit` is non-zero.
    pub async fn get_album_tracks(&self, id: &str, limit: usize) -> DeezerResult<CatalogEntity> {
        self.get_collection(&format!("/album/{}", id), limit).await
    }

    /// Fetches a playlist's tracks, keeping the first `limit` when `limit` is non-zero.
    pub async fn get_playlist_tracks(&self, id: &str, limit: usize) -> DeezerResult<CatalogEntity> {
        self.get_collection(&format!("/playlist/{}", id), limit).await
    }

    async fn get_collection(&self, path: &str, limit: usize) -> DeezerResult<CatalogEntity> {
        let collection: RawCollection = self.get_json(path).await?;

        let mut tracks = collection
            .tracks
            .data
            .iter()
            .map(|track| convert_to_unresolved(track.as_ref()))
            .collect::<DeezerResult<Vec<_>>>()?;

        if limit > 0 {
            tracks.truncate(limit);
        }

        Ok(CatalogEntity {
            name: collection.title,
            tracks,
        })
    }
}
