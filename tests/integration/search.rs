//! URL searches and delegation to the previous provider.

use std::sync::Arc;

use deezer_source::{
    AdapterOptions, Deezer, DeezerApi, LoadType, Manager, SearchQuery, SearchResult,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::MockServer;

use crate::common::fixtures;
use crate::common::mocks::{MockFallback, playable, unused_fallback};
use crate::common::{manager_with_deezer, mount_json, mount_status};

#[tokio::test]
async fn test_unrecognised_query_is_delegated_verbatim() {
    let server = MockServer::start().await;
    let expected = SearchResult::track_loaded(vec![playable("Daft Punk", "One More Time", 320_000)]);

    let mut fallback = MockFallback::new();
    let answer = expected.clone();
    fallback
        .expect_search()
        .withf(|query, requester| {
            *query == SearchQuery::new("daft punk one more time")
                && *requester == Some(fixtures::sample_requester())
        })
        .times(1)
        .returning(move |_, _| answer.clone());

    let manager = manager_with_deezer(&server, AdapterOptions::default(), Arc::new(fallback));
    let result = manager
        .search("daft punk one more time", Some(fixtures::sample_requester()))
        .await;

    assert_eq!(result, expected);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_other_service_url_is_delegated() {
    let server = MockServer::start().await;

    let mut fallback = MockFallback::new();
    fallback
        .expect_search()
        .times(1)
        .returning(|_, _| SearchResult::no_matches());

    let manager = manager_with_deezer(&server, AdapterOptions::default(), Arc::new(fallback));
    let result = manager
        .search("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC", None)
        .await;

    assert_eq!(result.load_type, LoadType::NoMatches);
}

#[tokio::test]
async fn test_track_url() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/track/3135556",
        fixtures::track(3135556, "Harder, Better, Faster, Stronger", "Daft Punk", 224),
    )
    .await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager
        .search(
            "https://www.deezer.com/en/track/3135556",
            Some(fixtures::sample_requester()),
        )
        .await;

    assert_eq!(result.load_type, LoadType::TrackLoaded);
    assert_eq!(result.playlist, None);
    assert_eq!(result.exception, None);
    assert_eq!(result.tracks.len(), 1);

    let track = &result.tracks[0];
    assert_eq!(track.identifier.as_deref(), Some("3135556"));
    assert_eq!(track.author, "Daft Punk");
    assert_eq!(track.duration_ms, 224_000);
    assert_eq!(track.requester, Some(fixtures::sample_requester()));
}

#[tokio::test]
async fn test_album_limit() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/album/302127",
        fixtures::collection("Discovery", fixtures::tracks(14)),
    )
    .await;

    let options = AdapterOptions {
        album_limit: 4,
        ..Default::default()
    };
    let manager = manager_with_deezer(&server, options, Arc::new(unused_fallback()));
    let result = manager
        .search("https://www.deezer.com/album/302127", None)
        .await;

    assert_eq!(result.load_type, LoadType::PlaylistLoaded);
    let titles: Vec<&str> = result.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Track 1", "Track 2", "Track 3", "Track 4"]);

    let playlist = result.playlist.unwrap();
    assert_eq!(playlist.name, "Discovery");
    assert_eq!(playlist.duration_ms, 4 * 200_000);
}

#[tokio::test]
async fn test_playlist_limit_does_not_apply_to_albums() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/album/302127",
        fixtures::collection("Discovery", fixtures::tracks(6)),
    )
    .await;

    let options = AdapterOptions {
        playlist_limit: 2,
        ..Default::default()
    };
    let manager = manager_with_deezer(&server, options, Arc::new(unused_fallback()));
    let result = manager.search("deezer.com/album/302127", None).await;

    assert_eq!(result.tracks.len(), 6);
}

#[tokio::test]
async fn test_playlist_network_error() {
    let server = MockServer::start().await;
    mount_status(&server, "/playlist/908622995", 502).await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager
        .search("https://www.deezer.com/playlist/908622995", None)
        .await;

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert!(result.tracks.is_empty());
    assert_eq!(result.playlist, None);

    let exception = result.exception.unwrap();
    assert!(
        exception.message.contains("502"),
        "unexpected message: {}",
        exception.message
    );
}

#[tokio::test]
async fn test_playlist_unreachable_api() {
    crate::test_utils::init();

    // Nothing listens on port 1.
    let mut manager = Manager::new(Arc::new(unused_fallback()));
    manager.use_plugin(Deezer::with_api(
        AdapterOptions::default(),
        DeezerApi::new("http://127.0.0.1:1"),
    ));
    let result = manager
        .search("https://www.deezer.com/playlist/908622995", None)
        .await;

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert!(result.tracks.is_empty());
    assert_eq!(result.playlist, None);
    assert!(result.exception.is_some());
}

#[tokio::test]
async fn test_missing_artist_is_load_failed() {
    let server = MockServer::start().await;
    mount_json(&server, "/track/1", json!({ "id": 1, "title": "Orphan" })).await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager.search("https://www.deezer.com/track/1", None).await;

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert_eq!(
        result.exception.map(|e| e.message),
        Some("The track artist array was not provided".to_string())
    );
}

#[tokio::test]
async fn test_broken_playlist_track_discards_everything() {
    let server = MockServer::start().await;
    let mut tracks = fixtures::tracks(3);
    tracks.push(json!(null));
    mount_json(&server, "/playlist/5", fixtures::collection("Mixed", tracks)).await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager.search("https://www.deezer.com/playlist/5", None).await;

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert!(result.tracks.is_empty());
    assert_eq!(
        result.exception.map(|e| e.message),
        Some("The Deezer track object was not provided".to_string())
    );
}

#[tokio::test]
async fn test_unknown_id_is_load_failed() {
    let server = MockServer::start().await;
    mount_json(&server, "/track/99", fixtures::no_data()).await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager.search("https://www.deezer.com/track/99", None).await;

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert_eq!(
        result.exception.map(|e| e.message),
        Some("Deezer API error 800 (DataException): no data".to_string())
    );
}

#[tokio::test]
async fn test_unknown_album_is_load_failed() {
    let server = MockServer::start().await;
    mount_json(&server, "/album/99", fixtures::no_data()).await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager.search("https://www.deezer.com/album/99", None).await;

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert!(result.tracks.is_empty());
    assert_eq!(result.playlist, None);
    assert!(result.exception.is_some());
}

#[tokio::test]
async fn test_empty_album_is_no_matches() {
    let server = MockServer::start().await;
    mount_json(&server, "/album/8", fixtures::collection("Silence", Vec::new())).await;

    let manager = manager_with_deezer(
        &server,
        AdapterOptions::default(),
        Arc::new(unused_fallback()),
    );
    let result = manager.search("https://www.deezer.com/album/8", None).await;

    assert_eq!(result, SearchResult::no_matches());
}
