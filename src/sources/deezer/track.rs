//! Deezer's track payload and its conversion into an `UnresolvedTrack`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DeezerError, DeezerResult};
use crate::manager::track::UnresolvedTrack;

const TRACK_URL: &str = "https://deezer.com/track";
const COVER_URL: &str = "https://e-cdn-images.dzcdn.net/images/cover";
const COVER_SIZE: &str = "264x264-000000-80-0-0.jpg";

/// Track object as returned by the Deezer API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCatalogTrack {
    pub id: Option<i64>,
    pub link: Option<String>,
    pub md5_image: Option<String>,
    pub preview: Option<String>,
    pub artist: Option<RawArtist>,
    /// Left untyped so a non-string title is reported rather than failing the whole body.
    pub title: Option<Value>,
    pub title_short: Option<String>,
    /// Length in seconds.
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArtist {
    pub name: Option<String>,
}

/// A list wrapper, as used by `/search/track` and the `tracks` field of albums and playlists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackList {
    #[serde(default)]
    pub data: Vec<Option<RawCatalogTrack>>,
}

/// Converts a Deezer track into the host's unresolved track.
///
/// Fails when the track, its artist or its title is missing, or when the title is
/// not a string.
pub fn convert_to_unresolved(track: Option<&RawCatalogTrack>) -> DeezerResult<UnresolvedTrack> {
    let track = track.ok_or(DeezerError::MissingTrack)?;
    let artist = track.artist.as_ref().ok_or(DeezerError::MissingArtist)?;

    let title = match &track.title {
        None | Some(Value::Null) => return Err(DeezerError::MissingTitle),
        Some(Value::String(title)) if title.is_empty() => return Err(DeezerError::MissingTitle),
        Some(Value::String(title)) => title.clone(),
        Some(other) => return Err(DeezerError::InvalidTitle(json_type(other))),
    };

    let uri = non_empty(&track.link)
        .map(str::to_string)
        .or_else(|| track.id.map(|id| format!("{TRACK_URL}/{id}")));

    Ok(UnresolvedTrack {
        identifier: track.id.map(|id| id.to_string()),
        uri,
        thumbnail: non_empty(&track.md5_image).map(|md5| format!("{COVER_URL}/{md5}/{COVER_SIZE}")),
        preview: non_empty(&track.preview).map(str::to_string),
        author: artist
            .name
            .clone()
            .unwrap_or_else(|| "Unknown Artist".to_string()),
        title: Some(title)
            .filter(|t| !t.is_empty())
            .or_else(|| non_empty(&track.title_short).map(str::to_string))
            .unwrap_or_else(|| "Unknown Title".to_string()),
        duration_ms: track.duration.unwrap_or(0).saturating_mul(1000),
        ..Default::default()
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
