//! Integration tests for the session store

mod common;

use common::{bearer_token, envelope, error_body, harness, user_json};
use serde_json::json;
use videotube_client::{
    ApiClient, ClientConfig, ClientError, CredentialStorage, MemoryStorage, Session, StorageChain,
    StorageError, TokenPair,
};
use videotube_core::types::LoginRequest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        username: Some("creator".to_string()),
        email: None,
        password: "hunter2".to_string(),
    }
}

#[tokio::test]
async fn login_persists_credentials_to_every_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "user": user_json(),
            "accessToken": "A1",
            "refreshToken": "R1",
        }))))
        .mount(&server)
        .await;

    let h = harness(&server);
    let payload = h.client.login(&credentials()).await.unwrap();
    assert_eq!(payload.access_token, "A1");
    assert_eq!(payload.user.username, "creator");

    for backend in [&h.durable, &h.scoped, &h.cookie] {
        assert_eq!(
            backend.get(ClientConfig::ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("A1")
        );
        assert_eq!(
            backend.get(ClientConfig::REFRESH_TOKEN_KEY).unwrap().as_deref(),
            Some("R1")
        );
        let stored_user = backend.get(ClientConfig::USER_KEY).unwrap().unwrap();
        assert!(stored_user.contains("creator@example.com"));
    }
    assert!(h.client.session().is_authenticated());
}

#[tokio::test]
async fn login_survives_a_failing_durable_backend() {
    struct DisabledStorage;

    impl CredentialStorage for DisabledStorage {
        fn label(&self) -> &'static str {
            "disabled"
        }
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::new("disabled", "storage access denied"))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::new("disabled", "storage access denied"))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::new("disabled", "storage access denied"))
        }
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "user": user_json(),
            "accessToken": "A1",
            "refreshToken": "R1",
        }))))
        .mount(&server)
        .await;

    let fallback = std::sync::Arc::new(MemoryStorage::new("fallback"));
    let chain = StorageChain::new(vec![Box::new(DisabledStorage), Box::new(fallback.clone())]);
    let client = ApiClient::builder()
        .base_url(server.uri())
        .storage(chain)
        .build()
        .unwrap();

    client.login(&credentials()).await.unwrap();

    assert!(client.session().is_authenticated());
    assert_eq!(
        fallback.get(ClientConfig::ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("A1")
    );
}

#[tokio::test]
async fn rejected_login_surfaces_server_message_and_leaves_session_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_body(401, "Invalid user credentials")),
        )
        .mount(&server)
        .await;

    let h = harness(&server);
    let err = h.client.login(&credentials()).await.unwrap_err();

    match err {
        ClientError::InvalidCredentials(message) => {
            assert_eq!(message, "Invalid user credentials");
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    let session = h.client.session().session();
    assert!(!session.is_authenticated());
    assert!(session.access_token.is_none());
    assert_eq!(session.error.as_deref(), Some("Invalid user credentials"));
}

#[tokio::test]
async fn set_tokens_preserves_refresh_token_when_omitted() {
    let server = MockServer::start().await;
    let h = harness(&server);
    let store = h.client.session();

    store.set_tokens(TokenPair {
        access_token: "A".to_string(),
        refresh_token: Some("R".to_string()),
    });
    store.set_tokens(TokenPair {
        access_token: "B".to_string(),
        refresh_token: None,
    });

    let session = store.session();
    assert_eq!(session.access_token.as_deref(), Some("B"));
    assert_eq!(session.refresh_token.as_deref(), Some("R"));
    assert_eq!(
        h.durable.get(ClientConfig::ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("B")
    );
    assert_eq!(
        h.durable.get(ClientConfig::REFRESH_TOKEN_KEY).unwrap().as_deref(),
        Some("R")
    );
}

#[tokio::test]
async fn logout_twice_is_idempotent() {
    let server = MockServer::start().await;
    let h = harness(&server);
    let store = h.client.session();

    store.set_tokens(TokenPair {
        access_token: "A".to_string(),
        refresh_token: Some("R".to_string()),
    });

    store.logout();
    store.logout();

    assert_eq!(store.session(), Session::default());
    assert!(h.durable.get(ClientConfig::ACCESS_TOKEN_KEY).unwrap().is_none());
    assert!(h.durable.get(ClientConfig::REFRESH_TOKEN_KEY).unwrap().is_none());
}

#[tokio::test]
async fn initialize_rehydrates_from_any_backend() {
    let server = MockServer::start().await;

    // only the last-priority backend holds credentials, as after a cleared
    // localStorage in private browsing
    let cookie = std::sync::Arc::new(MemoryStorage::new("cookie"));
    cookie
        .set(ClientConfig::ACCESS_TOKEN_KEY, &bearer_token(600))
        .unwrap();
    cookie.set(ClientConfig::REFRESH_TOKEN_KEY, "R1").unwrap();
    cookie
        .set(ClientConfig::USER_KEY, &user_json().to_string())
        .unwrap();

    let chain = StorageChain::new(vec![
        Box::new(MemoryStorage::new("durable")),
        Box::new(cookie),
    ]);
    let client = ApiClient::builder()
        .base_url(server.uri())
        .storage(chain)
        .build()
        .unwrap();

    let session = client.session().session();
    assert!(session.is_authenticated());
    assert_eq!(session.refresh_token.as_deref(), Some("R1"));
    assert!(!client.session().is_token_expired());
}

#[tokio::test]
async fn initialize_treats_corrupt_user_as_absent() {
    let server = MockServer::start().await;

    let durable = std::sync::Arc::new(MemoryStorage::new("durable"));
    durable.set(ClientConfig::ACCESS_TOKEN_KEY, "A1").unwrap();
    durable.set(ClientConfig::USER_KEY, "not json at all").unwrap();

    let chain = StorageChain::new(vec![Box::new(durable)]);
    let client = ApiClient::builder()
        .base_url(server.uri())
        .storage(chain)
        .build()
        .unwrap();

    let session = client.session().session();
    assert_eq!(session.access_token.as_deref(), Some("A1"));
    assert!(session.user.is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_during_inflight_refresh_discards_the_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "accessToken": "A2" })))
                .set_delay(std::time::Duration::from_millis(250)),
        )
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client.session().set_tokens(TokenPair {
        access_token: "A1".to_string(),
        refresh_token: Some("R1".to_string()),
    });

    let store = h.client.session().clone();
    let refresh = tokio::spawn(async move { store.refresh_access_token().await });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    h.client.session().logout();

    let result = refresh.await.unwrap();
    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));

    // the cleared session must not be resurrected
    let session = h.client.session().session();
    assert!(session.access_token.is_none());
    assert!(session.refresh_token.is_none());
    assert!(h.durable.get(ClientConfig::ACCESS_TOKEN_KEY).unwrap().is_none());
}
