//! The host side of the plugin contract.
//!
//! A `Manager` owns the search provider every search is routed to. Plugins install
//! themselves by wrapping the current provider and handing the wrapper back, so the
//! previous provider stays reachable as their fallback.

pub mod search_result;
pub mod track;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use search_result::SearchResult;
use track::{Requester, SearchQuery};

/// Anything able to answer a search request.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: SearchQuery, requester: Option<Requester>) -> SearchResult;
}

/// A component loaded into the manager at registration time.
pub trait Plugin {
    /// Called once when the plugin is registered.
    fn load(self, manager: &mut Manager);
}

/// Provider used when nothing else is installed: finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySearch;

#[async_trait]
impl SearchProvider for EmptySearch {
    async fn search(&self, query: SearchQuery, _requester: Option<Requester>) -> SearchResult {
        debug!("No search source for query: {}", query.query);
        SearchResult::no_matches()
    }
}

/// Routes searches to the currently installed provider.
pub struct Manager {
    search: Arc<dyn SearchProvider>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(Arc::new(EmptySearch))
    }
}

impl Manager {
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self { search }
    }

    /// Registers a plugin.
    pub fn use_plugin(&mut self, plugin: impl Plugin) -> &mut Self {
        plugin.load(self);
        self
    }

    /// The provider searches are currently routed to.
    pub fn search_provider(&self) -> Arc<dyn SearchProvider> {
        Arc::clone(&self.search)
    }

    pub fn set_search_provider(&mut self, search: Arc<dyn SearchProvider>) {
        self.search = search;
    }

    pub async fn search(
        &self,
        query: impl Into<SearchQuery>,
        requester: Option<Requester>,
    ) -> SearchResult {
        self.search.search(query.into(), requester).await
    }
}
