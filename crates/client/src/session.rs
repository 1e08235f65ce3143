//! Session state and the token refresh protocol
//!
//! [`SessionStore`] is the single source of truth for authentication state.
//! It owns the persistence fan-out and the auth endpoints (`/auth/login`,
//! `/auth/refresh`); those calls go out on a plain HTTP client so they can
//! never re-enter the 401 pipeline. Everything else reads and writes session
//! state only through the operations exposed here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use videotube_core::types::{AuthPayload, LoginRequest, RefreshPayload, RefreshRequest, User};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::jwt;
use crate::storage::StorageChain;
use crate::wire;

/// In-memory authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Last auth operation's failure message
    pub error: Option<String>,
}

impl Session {
    /// Authenticated means both a bearer token and a profile are held.
    /// The refresh token may be absent mid-rotation.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Token pair handed to [`SessionStore::set_tokens`]
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    /// Omitted when the server rotates only the access token; the held
    /// refresh token is preserved in that case
    pub refresh_token: Option<String>,
}

struct SessionInner {
    session: RwLock<Session>,
    storage: StorageChain,
    http: reqwest::Client,
    base_url: String,
    /// Serializes refresh attempts so concurrent 401s coalesce into one
    /// network call
    refresh_gate: tokio::sync::Mutex<()>,
    /// Bumped by every successful refresh and every logout; lets waiters and
    /// in-flight refreshes detect that the session moved under them
    epoch: AtomicU64,
}

/// Authentication state holder with multi-backend persistence
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    pub fn new(base_url: impl Into<String>, storage: StorageChain, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                session: RwLock::new(Session::default()),
                storage,
                http,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                refresh_gate: tokio::sync::Mutex::new(()),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Rehydrate the session from persisted credentials. Idempotent.
    ///
    /// A persisted user profile that no longer parses is logged and treated
    /// as absent; the tokens are still loaded.
    pub fn initialize(&self) {
        let access_token = self.inner.storage.read(ClientConfig::ACCESS_TOKEN_KEY);
        let refresh_token = self.inner.storage.read(ClientConfig::REFRESH_TOKEN_KEY);
        let user = self
            .inner
            .storage
            .read(ClientConfig::USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(%err, "persisted user profile did not parse, ignoring");
                    None
                }
            });

        let mut session = self.write();
        session.access_token = access_token;
        session.refresh_token = refresh_token;
        session.user = user;
        session.error = None;
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "session initialized from storage"
        );
    }

    /// Authenticate against `/auth/login`.
    ///
    /// On success the credentials are fanned out to every storage backend and
    /// the in-memory session updated in one step. On rejection the session is
    /// left untouched apart from its error message.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthPayload, ClientError> {
        let url = format!("{}/auth/login", self.inner.base_url);
        let response = self
            .inner
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .inspect_err(|err| {
                self.set_error(&err.to_string());
                tracing::warn!(%err, "login request failed in transit");
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = wire::error_message(response).await;
            self.set_error(&message);
            tracing::warn!(status = status.as_u16(), %message, "login rejected");
            return Err(if status.is_client_error() {
                ClientError::InvalidCredentials(message)
            } else {
                ClientError::from_status(status, message)
            });
        }

        let payload: AuthPayload = wire::decode(response).await?;
        self.persist(&payload);
        {
            let mut session = self.write();
            session.user = Some(payload.user.clone());
            session.access_token = Some(payload.access_token.clone());
            session.refresh_token = payload.refresh_token.clone();
            session.error = None;
        }
        tracing::info!(user = %payload.user.username, "login succeeded");
        Ok(payload)
    }

    /// Store a profile obtained out-of-band
    pub fn set_user(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.inner.storage.write(ClientConfig::USER_KEY, &raw),
            Err(err) => tracing::warn!(%err, "user profile did not serialize, not persisting"),
        }
        self.write().user = Some(user);
    }

    /// Store tokens obtained out-of-band.
    ///
    /// An omitted refresh token preserves the held one (rotation policies
    /// that renew only the access token).
    pub fn set_tokens(&self, tokens: TokenPair) {
        self.inner
            .storage
            .write(ClientConfig::ACCESS_TOKEN_KEY, &tokens.access_token);
        if let Some(refresh_token) = &tokens.refresh_token {
            self.inner
                .storage
                .write(ClientConfig::REFRESH_TOKEN_KEY, refresh_token);
        }

        let mut session = self.write();
        session.access_token = Some(tokens.access_token);
        if tokens.refresh_token.is_some() {
            session.refresh_token = tokens.refresh_token;
        }
    }

    /// Exchange the held refresh token for a new access token.
    ///
    /// Concurrent callers coalesce: whoever acquires the gate first performs
    /// the network call, later arrivals observe the advanced epoch and reuse
    /// the fresh token without a second call. A logout that lands while the
    /// call is in flight wins; the refreshed credentials are discarded rather
    /// than resurrecting a cleared session. Any failure clears the session
    /// before returning.
    pub async fn refresh_access_token(&self) -> Result<String, ClientError> {
        let entry_epoch = self.inner.epoch.load(Ordering::Acquire);
        let _gate = self.inner.refresh_gate.lock().await;

        if self.inner.epoch.load(Ordering::Acquire) != entry_epoch {
            // another caller finished a refresh (or a logout) while we waited
            if let Some(token) = self.access_token() {
                tracing::debug!("coalesced onto a refresh that completed while waiting");
                return Ok(token);
            }
            return Err(ClientError::NoRefreshToken);
        }

        let Some(refresh_token) = self.refresh_token() else {
            return Err(ClientError::NoRefreshToken);
        };

        match self.exchange(refresh_token).await {
            Ok(payload) => {
                if self.inner.epoch.load(Ordering::Acquire) != entry_epoch {
                    tracing::debug!("session cleared while refresh was in flight, discarding");
                    return Err(ClientError::RefreshFailed(
                        "session cleared during refresh".to_string(),
                    ));
                }

                self.inner
                    .storage
                    .write(ClientConfig::ACCESS_TOKEN_KEY, &payload.access_token);
                if let Some(rotated) = &payload.refresh_token {
                    self.inner
                        .storage
                        .write(ClientConfig::REFRESH_TOKEN_KEY, rotated);
                }
                {
                    let mut session = self.write();
                    session.access_token = Some(payload.access_token.clone());
                    if payload.refresh_token.is_some() {
                        session.refresh_token = payload.refresh_token.clone();
                    }
                    session.error = None;
                }
                self.inner.epoch.fetch_add(1, Ordering::AcqRel);
                tracing::debug!("access token refreshed");
                Ok(payload.access_token)
            }
            Err(err) => {
                tracing::warn!(%err, "token refresh failed, clearing session");
                self.logout();
                Err(match err {
                    ClientError::RefreshFailed(message) => ClientError::RefreshFailed(message),
                    other => ClientError::RefreshFailed(other.to_string()),
                })
            }
        }
    }

    async fn exchange(&self, refresh_token: String) -> Result<RefreshPayload, ClientError> {
        let url = format!("{}/auth/refresh", self.inner.base_url);
        let response = self
            .inner
            .http
            .post(&url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = wire::error_message(response).await;
            return Err(ClientError::RefreshFailed(message));
        }
        wire::decode(response).await
    }

    /// Clear persisted and in-memory state. Never fails; safe to call twice.
    pub fn logout(&self) {
        self.inner.storage.clear(ClientConfig::ACCESS_TOKEN_KEY);
        self.inner.storage.clear(ClientConfig::REFRESH_TOKEN_KEY);
        self.inner.storage.clear(ClientConfig::USER_KEY);
        *self.write() = Session::default();
        self.inner.epoch.fetch_add(1, Ordering::AcqRel);
        tracing::info!("session cleared");
    }

    /// Advisory expiry check on the held access token; fail-closed.
    ///
    /// This is a hint to avoid sending obviously dead tokens. Server-side
    /// verification remains the sole source of truth.
    pub fn is_token_expired(&self) -> bool {
        match self.access_token() {
            Some(token) => jwt::is_expired(&token, jwt::now_ts()),
            None => true,
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    fn persist(&self, payload: &AuthPayload) {
        self.inner
            .storage
            .write(ClientConfig::ACCESS_TOKEN_KEY, &payload.access_token);
        if let Some(refresh_token) = &payload.refresh_token {
            self.inner
                .storage
                .write(ClientConfig::REFRESH_TOKEN_KEY, refresh_token);
        }
        match serde_json::to_string(&payload.user) {
            Ok(raw) => self.inner.storage.write(ClientConfig::USER_KEY, &raw),
            Err(err) => tracing::warn!(%err, "user profile did not serialize, not persisting"),
        }
    }

    fn set_error(&self, message: &str) {
        self.write().error = Some(message.to_string());
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.session.read().expect("session lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.session.write().expect("session lock poisoned")
    }
}
