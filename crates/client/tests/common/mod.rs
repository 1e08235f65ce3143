#![allow(dead_code)]

//! Shared fixtures for the client integration tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use videotube_client::{ApiClient, MemoryStorage, SessionEvents, StorageChain};
use wiremock::MockServer;

/// Wrap a payload in the server's success envelope
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({
        "statusCode": 200,
        "data": data,
        "message": "ok",
        "success": true,
    })
}

/// The server's error body shape
pub fn error_body(status: u16, message: &str) -> serde_json::Value {
    json!({
        "statusCode": status,
        "message": message,
        "success": false,
    })
}

pub fn user_json() -> serde_json::Value {
    json!({
        "_id": "u1",
        "username": "creator",
        "email": "creator@example.com",
        "fullName": "Creator One",
        "avatar": null,
        "coverImage": null,
    })
}

/// A structurally valid unsigned JWT whose exp is offset from now
pub fn bearer_token(exp_offset_secs: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, now + exp_offset_secs));
    format!("{header}.{payload}.testsig")
}

/// Counts session-expired notifications
#[derive(Default)]
pub struct RecordingEvents {
    fired: AtomicUsize,
}

impl RecordingEvents {
    pub fn count(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl SessionEvents for RecordingEvents {
    fn on_session_expired(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub durable: Arc<MemoryStorage>,
    pub scoped: Arc<MemoryStorage>,
    pub cookie: Arc<MemoryStorage>,
    pub events: Arc<RecordingEvents>,
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Client wired to three inspectable backends and a recording event handler
pub fn harness(server: &MockServer) -> Harness {
    init_tracing();
    let durable = Arc::new(MemoryStorage::new("durable"));
    let scoped = Arc::new(MemoryStorage::new("session"));
    let cookie = Arc::new(MemoryStorage::new("cookie"));
    let events = Arc::new(RecordingEvents::default());

    let chain = StorageChain::new(vec![
        Box::new(durable.clone()),
        Box::new(scoped.clone()),
        Box::new(cookie.clone()),
    ]);
    let client = ApiClient::builder()
        .base_url(server.uri())
        .storage(chain)
        .events(events.clone())
        .build()
        .unwrap();

    Harness {
        client,
        durable,
        scoped,
        cookie,
        events,
    }
}
