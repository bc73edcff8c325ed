//! Deezer search source.
//!
//! `Deezer` answers two kinds of requests: queries tagged with one of the configured
//! source names (free-text search) and Deezer track/album/playlist URLs. Once loaded
//! into a `Manager` it sits in front of the previous search provider as a `DeezerSearch`
//! and hands everything it does not recognise to that provider untouched.

pub mod api;
pub mod track;

use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::AdapterOptions;
use crate::error::{DeezerError, DeezerResult};
use crate::manager::search_result::SearchResult;
use crate::manager::track::{Requester, SearchQuery, UnresolvedTrack};
use crate::manager::{Manager, Plugin, SearchProvider};

use api::{CatalogEntity, DeezerApi, DeezerUrl};

/// Entity types a Deezer URL can point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Track,
    Album,
    Playlist,
}

impl FromStr for EntityKind {
    type Err = DeezerError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "track" => Ok(EntityKind::Track),
            "album" => Ok(EntityKind::Album),
            "playlist" => Ok(EntityKind::Playlist),
            other => Err(DeezerError::UnsupportedUrlType(other.to_string())),
        }
    }
}

/// The Deezer adapter: options plus an API client.
#[derive(Debug, Clone, Default)]
pub struct Deezer {
    options: AdapterOptions,
    api: DeezerApi,
}

impl Deezer {
    pub fn new(options: AdapterOptions) -> Self {
        Self::with_api(options, DeezerApi::default())
    }

    /// Uses `api` instead of the public endpoint.
    pub fn with_api(options: AdapterOptions, api: DeezerApi) -> Self {
        Self { options, api }
    }

    /// Wraps the adapter in front of `fallback`.
    pub fn into_search(self, fallback: Arc<dyn SearchProvider>) -> DeezerSearch {
        DeezerSearch {
            deezer: self,
            fallback,
        }
    }

    /// Free-text search for queries tagged with a configured source.
    ///
    /// Returns `None` when the query is not tagged for Deezer or the search found
    /// nothing, so the caller can try the next strategy.
    pub async fn tagged_search(
        &self,
        query: &SearchQuery,
        requester: Option<&Requester>,
        fallback: &dyn SearchProvider,
    ) -> Option<SearchResult> {
        let source = query.source.as_deref()?;
        if !self.options.is_query_source(source) {
            return None;
        }

        info!("Searching Deezer ({}) for: {}", source, query.query);

        match self.api.search_tracks(&query.query).await {
            Ok(tracks) if tracks.is_empty() => {
                debug!("No Deezer results for {:?}, trying other strategies", query.query);
                None
            }
            Ok(tracks) => Some(SearchResult::track_loaded(
                self.build_tracks(tracks, requester, fallback).await,
            )),
            Err(e) => {
                error!("Deezer search for {:?} failed: {}", query.query, e);
                Some(SearchResult::load_failed(e.to_string()))
            }
        }
    }

    /// Loads the entity behind a Deezer URL.
    ///
    /// Returns `None` when the query is not a Deezer URL.
    pub async fn url_search(
        &self,
        query: &SearchQuery,
        requester: Option<&Requester>,
        fallback: &dyn SearchProvider,
    ) -> Option<SearchResult> {
        let url = DeezerApi::parse_url(&query.query)?;

        let kind = match url.kind.parse::<EntityKind>() {
            Ok(kind) => kind,
            Err(e) => return Some(SearchResult::load_failed(e.to_string())),
        };

        info!("Loading Deezer {} {}", url.kind, url.id);

        let entity = match self.fetch(kind, &url).await {
            Ok(entity) => entity,
            Err(e) => {
                error!("Failed to load Deezer {} {}: {}", url.kind, url.id, e);
                return Some(SearchResult::load_failed(e.to_string()));
            }
        };

        if entity.tracks.is_empty() {
            return Some(SearchResult::no_matches());
        }

        let tracks = self.build_tracks(entity.tracks, requester, fallback).await;
        Some(match kind {
            EntityKind::Track => SearchResult::track_loaded(tracks),
            EntityKind::Album | EntityKind::Playlist => {
                SearchResult::playlist_loaded(tracks, entity.name)
            }
        })
    }

    async fn fetch(&self, kind: EntityKind, url: &DeezerUrl) -> DeezerResult<CatalogEntity> {
        match kind {
            EntityKind::Track => self.api.get_track(&url.id).await,
            EntityKind::Album => {
                self.api
                    .get_album_tracks(&url.id, self.options.album_limit)
                    .await
            }
            EntityKind::Playlist => {
                self.api
                    .get_playlist_tracks(&url.id, self.options.playlist_limit)
                    .await
            }
        }
    }

    /// Attaches the requester and, when configured, resolves each track through `fallback`.
    async fn build_tracks(
        &self,
        tracks: Vec<UnresolvedTrack>,
        requester: Option<&Requester>,
        fallback: &dyn SearchProvider,
    ) -> Vec<UnresolvedTrack> {
        let mut built = Vec::with_capacity(tracks.len());

        for track in tracks {
            let mut track = track.with_requester(requester);
            if self.options.convert_unresolved {
                if let Err(e) = track.resolve(fallback).await {
                    warn!("Could not resolve {} - {}: {}", track.author, track.title, e);
                }
            }
            built.push(track);
        }

        built
    }
}

impl Plugin for Deezer {
    /// Puts the adapter in front of the manager's current search provider.
    fn load(self, manager: &mut Manager) {
        let fallback = manager.search_provider();
        manager.set_search_provider(Arc::new(self.into_search(fallback)));
        info!("Deezer search source loaded");
    }
}

/// `Deezer` in front of the provider it falls back to.
pub struct DeezerSearch {
    deezer: Deezer,
    fallback: Arc<dyn SearchProvider>,
}

#[async_trait]
impl SearchProvider for DeezerSearch {
    async fn search(&self, query: SearchQuery, requester: Option<Requester>) -> SearchResult {
        let fallback = self.fallback.as_ref();

        if let Some(result) = self
            .deezer
            .tagged_search(&query, requester.as_ref(), fallback)
            .await
        {
            return result;
        }

        if let Some(result) = self
            .deezer
            .url_search(&query, requester.as_ref(), fallback)
            .await
        {
            return result;
        }

        fallback.search(query, requester).await
    }
}
