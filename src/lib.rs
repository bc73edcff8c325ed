//! Deezer search source for a music-playback manager.
//!
//! Loading [`Deezer`] into a [`Manager`] routes Deezer URLs and Deezer-tagged queries to
//! Deezer's public API and leaves every other search to the provider that was installed
//! before it.

pub mod config;
pub mod error;
pub mod manager;
pub mod sources;

use std::sync::LazyLock;

pub use config::AdapterOptions;
pub use error::{ConfigError, DeezerError, ResolveError};
pub use manager::search_result::{LoadType, SearchResult};
pub use manager::track::{Requester, SearchQuery, UnresolvedTrack};
pub use manager::{EmptySearch, Manager, Plugin, SearchProvider};
pub use sources::deezer::api::DeezerApi;
pub use sources::deezer::{Deezer, DeezerSearch};

/// HTTP client shared by every API client in the crate.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);
