#![allow(dead_code)]
//! Shared helpers for ph8-link integration tests.

use ph8_link::Ph8LinkClient;

/// Initialize test logging once; safe to call from every test
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a client pointed at a mock server, with an in-memory token store
pub fn client_for(server: &mockito::Server) -> Ph8LinkClient {
    Ph8LinkClient::builder()
        .base_url(server.url())
        .build()
        .expect("client builds")
}

/// A profile response body for the default test user
pub fn alice_profile() -> &'static str {
    r#"{"id":"u1","email":"alice@example.com","displayName":"Alice","role":"Student","avatarUrl":null}"#
}
