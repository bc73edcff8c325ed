//! Shared fixtures, mocks and setup for the integration tests.


use std::sync::Arc;

use deezer_source::{AdapterOptions, Deezer, DeezerApi, Manager, SearchProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a manager whose default search is `fallback`, with Deezer loaded in front of it.
pub fn manager_with_deezer(
    server: &MockServer,
    options: AdapterOptions,
    fallback: Arc<dyn SearchProvider>,
) -> Manager {
    crate::test_utils::init();

    let mut manager = Manager::new(fallback);
    manager.use_plugin(Deezer::with_api(options, DeezerApi::new(server.uri())));
    manager
}

/// Answers `GET route` with `body`.
pub async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answers `GET route` with an empty response carrying `status`.
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
