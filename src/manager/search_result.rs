//! The result shape every search answers with.

use serde::{Deserialize, Serialize};

use super::track::UnresolvedTrack;

/// Outcome classification of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadType {
    TrackLoaded,
    PlaylistLoaded,
    NoMatches,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Common,
}

/// Name and total length of a loaded album or playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub name: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadException {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub load_type: LoadType,
    pub tracks: Vec<UnresolvedTrack>,
    pub playlist: Option<PlaylistInfo>,
    pub exception: Option<LoadException>,
}

impl SearchResult {
    /// Builds a result, keeping `playlist` and `exception` consistent with `load_type`.
    ///
    /// `playlist` is only set for `PLAYLIST_LOADED` with a name; its duration is the
    /// sum of the track durations. `exception` is only set for `LOAD_FAILED`.
    pub fn build(
        load_type: LoadType,
        tracks: Vec<UnresolvedTrack>,
        error: Option<String>,
        name: Option<String>,
    ) -> Self {
        let playlist = name
            .filter(|_| load_type == LoadType::PlaylistLoaded)
            .map(|name| PlaylistInfo {
                name,
                duration_ms: tracks.iter().map(|t| t.duration_ms).sum(),
            });

        let exception = error
            .filter(|_| load_type == LoadType::LoadFailed)
            .map(|message| LoadException {
                message,
                severity: Severity::Common,
            });

        Self {
            load_type,
            tracks,
            playlist,
            exception,
        }
    }

    pub fn track_loaded(tracks: Vec<UnresolvedTrack>) -> Self {
        Self::build(LoadType::TrackLoaded, tracks, None, None)
    }

    pub fn playlist_loaded(tracks: Vec<UnresolvedTrack>, name: Option<String>) -> Self {
        Self::build(LoadType::PlaylistLoaded, tracks, None, name)
    }

    pub fn no_matches() -> Self {
        Self::build(LoadType::NoMatches, Vec::new(), None, None)
    }

    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::build(LoadType::LoadFailed, Vec::new(), Some(message.into()), None)
    }
}
