//! Refresh-and-retry behavior of the authenticated transport.

mod common;

use common::{client_for, init_logs};
use mockito::{Matcher, Server};
use ph8_link::{Ph8LinkError, TokenKey};

#[tokio::test]
async fn test_expired_access_token_refreshes_transparently() {
    init_logs();
    let mut server = Server::new_async().await;

    // First attempt with the stale token is rejected
    let stale_mock = server
        .mock("GET", "/api/v1/topics")
        .match_header("authorization", "Bearer stale-acc")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/api/v1/auth/refresh")
        .match_body(Matcher::Json(serde_json::json!({
            "refresh_token": "good-ref"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken":"fresh-acc","refreshToken":"good-ref"}"#)
        .expect(1)
        .create_async()
        .await;
    let retry_mock = server
        .mock("GET", "/api/v1/topics")
        .match_header("authorization", "Bearer fresh-acc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client.token_store().set(TokenKey::Access, "stale-acc").unwrap();
    client.token_store().set(TokenKey::Refresh, "good-ref").unwrap();

    let topics = client.topics().list().await.unwrap();
    assert!(topics.is_empty());

    stale_mock.assert_async().await;
    refresh_mock.assert_async().await;
    retry_mock.assert_async().await;

    // Storage reflects the new access token; refresh token unchanged
    let store = client.token_store();
    assert_eq!(store.get(TokenKey::Access).unwrap().as_deref(), Some("fresh-acc"));
    assert_eq!(store.get(TokenKey::Refresh).unwrap().as_deref(), Some("good-ref"));
}

#[tokio::test]
async fn test_rotated_refresh_token_is_persisted() {
    init_logs();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/v1/topics")
        .match_header("authorization", "Bearer stale-acc")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v1/auth/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken":"fresh-acc","refreshToken":"rotated-ref"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/topics")
        .match_header("authorization", "Bearer fresh-acc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);
    client.token_store().set(TokenKey::Access, "stale-acc").unwrap();
    client.token_store().set(TokenKey::Refresh, "old-ref").unwrap();

    client.topics().list().await.unwrap();

    let store = client.token_store();
    assert_eq!(
        store.get(TokenKey::Refresh).unwrap().as_deref(),
        Some("rotated-ref")
    );
}

#[tokio::test]
async fn test_missing_refresh_token_is_session_expired() {
    init_logs();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/v1/topics")
        .with_status(401)
        .create_async()
        .await;

    let client = client_for(&server);
    client.token_store().set(TokenKey::Access, "stale-acc").unwrap();

    let result = client.topics().list().await;
    assert!(matches!(result, Err(Ph8LinkError::SessionExpired)));

    // Both slots cleared; the caller must re-authenticate
    let store = client.token_store();
    assert_eq!(store.get(TokenKey::Access).unwrap(), None);
    assert_eq!(store.get(TokenKey::Refresh).unwrap(), None);
}

#[tokio::test]
async fn test_rejected_refresh_token_is_session_expired() {
    init_logs();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/v1/topics")
        .with_status(401)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/api/v1/auth/refresh")
        .with_status(401)
        .with_body("refresh token expired")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client.token_store().set(TokenKey::Access, "stale-acc").unwrap();
    client.token_store().set(TokenKey::Refresh, "stale-ref").unwrap();

    let result = client.topics().list().await;
    assert!(matches!(result, Err(Ph8LinkError::SessionExpired)));

    refresh_mock.assert_async().await;
    let store = client.token_store();
    assert_eq!(store.get(TokenKey::Access).unwrap(), None);
    assert_eq!(store.get(TokenKey::Refresh).unwrap(), None);
}

#[tokio::test]
async fn test_at_most_one_refresh_per_call() {
    init_logs();
    let mut server = Server::new_async().await;

    // Both attempts are rejected: the stale token and the refreshed one
    let unauthorized_mock = server
        .mock("GET", "/api/v1/topics")
        .with_status(401)
        .expect(2)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/api/v1/auth/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken":"still-bad","refreshToken":"ref-1"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client.token_store().set(TokenKey::Access, "stale-acc").unwrap();
    client.token_store().set(TokenKey::Refresh, "ref-1").unwrap();

    // The second 401 surfaces to the caller instead of looping
    let result = client.topics().list().await;
    assert!(matches!(
        result,
        Err(Ph8LinkError::ServerError { status_code: 401, .. })
    ));

    unauthorized_mock.assert_async().await;
    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn test_non_401_errors_are_not_retried() {
    init_logs();
    let mut server = Server::new_async().await;

    let error_mock = server
        .mock("GET", "/api/v1/topics")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/api/v1/auth/refresh")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    client.token_store().set(TokenKey::Access, "acc").unwrap();
    client.token_store().set(TokenKey::Refresh, "ref").unwrap();

    let result = client.topics().list().await;
    assert!(matches!(
        result,
        Err(Ph8LinkError::ServerError { status_code: 500, .. })
    ));

    error_mock.assert_async().await;
    refresh_mock.assert_async().await;

    // Tokens untouched: only a failed refresh clears them
    assert!(client.token_store().get(TokenKey::Access).unwrap().is_some());
}
