//! Track and query types shared between the host and its search sources.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResolveError;

use super::SearchProvider;
use super::search_result::LoadType;

/// Allowed duration drift when matching a resolution candidate.
const DURATION_TOLERANCE_MS: u64 = 1500;

/// Opaque value identifying who asked for a track. Never inspected, only forwarded.
pub type Requester = serde_json::Value;

/// A search request. A plain string becomes a query without a source tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source: None,
        }
    }

    /// A query explicitly aimed at the source named by `source`.
    pub fn tagged(query: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source: Some(source.into()),
        }
    }
}

impl From<&str> for SearchQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for SearchQuery {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

/// The playable track the host matched an unresolved track to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub title: String,
    pub author: String,
    pub duration_ms: u64,
}

impl From<&UnresolvedTrack> for ResolvedTrack {
    fn from(track: &UnresolvedTrack) -> Self {
        Self {
            identifier: track.identifier.clone(),
            uri: track.uri.clone(),
            title: track.title.clone(),
            author: track.author.clone(),
            duration_ms: track.duration_ms,
        }
    }
}

/// Lightweight track reference that the host may later resolve into a playable track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub author: String,
    pub title: String,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<Requester>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedTrack>,
}

impl UnresolvedTrack {
    /// Attaches the requester, as the host does when it builds a track for a user.
    pub fn with_requester(mut self, requester: Option<&Requester>) -> Self {
        self.requester = requester.cloned();
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Searches `"<author> - <title>"` through `provider` and stores the best match.
    ///
    /// Candidates are ranked: matching author (or its "- Topic" channel) or exact title,
    /// then a duration within 1.5 seconds, then whatever came first.
    pub async fn resolve(&mut self, provider: &dyn SearchProvider) -> Result<(), ResolveError> {
        let query = format!("{} - {}", self.author, self.title);
        debug!("Resolving track with query: {}", query);

        let result = provider
            .search(SearchQuery::new(query.as_str()), self.requester.clone())
            .await;

        if result.load_type == LoadType::LoadFailed {
            let message = result
                .exception
                .map(|e| e.message)
                .unwrap_or_else(|| query.clone());
            return Err(ResolveError::LoadFailed(message));
        }

        let found = self
            .best_match(&result.tracks)
            .ok_or(ResolveError::NoMatches(query))?;
        self.resolved = Some(ResolvedTrack::from(found));

        Ok(())
    }

    fn best_match<'a>(&self, candidates: &'a [UnresolvedTrack]) -> Option<&'a UnresolvedTrack> {
        let topic_channel = format!("{} - Topic", self.author);

        candidates
            .iter()
            .find(|c| {
                c.author.eq_ignore_ascii_case(&self.author)
                    || c.author.eq_ignore_ascii_case(&topic_channel)
                    || c.title == self.title
            })
            .or_else(|| {
                if self.duration_ms == 0 {
                    return None;
                }
                candidates
                    .iter()
                    .find(|c| c.duration_ms.abs_diff(self.duration_ms) <= DURATION_TOLERANCE_MS)
            })
            .or_else(|| candidates.first())
    }
}
