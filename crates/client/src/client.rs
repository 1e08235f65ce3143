//! VideoTube API client and the request pipeline
//!
//! Every call dispatched through [`ApiClient::execute`] gets the current
//! bearer credential attached pre-flight and, when the server answers 401,
//! exactly one refresh-and-replay cycle. The replay is a structural one-shot:
//! its outcome is decoded directly and returned to the caller, so a second
//! 401 can never re-enter the refresh path.

use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::events::{NoopEvents, SessionEvents};
use crate::session::SessionStore;
use crate::storage::StorageChain;
use crate::wire;

/// VideoTube API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    events: Arc<dyn SessionEvents>,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store backing this client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Create a request builder without credentials attached
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request through the full pipeline
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        // captured before dispatch; streaming bodies cannot be cloned and
        // therefore cannot be replayed
        let replay = request.try_clone();
        let response = self.authorize(request).send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return wire::decode(response).await;
        }

        match replay {
            Some(replay) => self.refresh_and_replay(replay).await,
            None => {
                let message = wire::error_message(response).await;
                tracing::warn!("401 on a non-replayable request");
                Err(ClientError::AuthenticationFailed(message))
            }
        }
    }

    /// Attach the bearer credential when one is held and not obviously dead;
    /// otherwise send unauthenticated and let protected routes answer 401
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.access_token() {
            Some(token) if !self.session.is_token_expired() => {
                request.header(header::AUTHORIZATION, format!("Bearer {token}"))
            }
            _ => request,
        }
    }

    /// One refresh-and-replay cycle for a request that came back 401
    async fn refresh_and_replay<T: DeserializeOwned>(
        &self,
        replay: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        if self.session.refresh_token().is_none() {
            // nothing to exchange, go straight to login
            tracing::debug!("401 with no refresh token held, clearing session");
            self.session.logout();
            self.events.on_session_expired();
            return Err(ClientError::NoRefreshToken);
        }

        match self.session.refresh_access_token().await {
            Ok(token) => {
                let response = replay
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .send()
                    .await?;
                // the replay's outcome is final, including a second 401
                wire::decode(response).await
            }
            Err(err) => {
                tracing::warn!(%err, "refresh protocol failed, session expired");
                self.events.on_session_expired();
                Err(err)
            }
        }
    }
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    timeout: Duration,
    user_agent: Option<String>,
    storage: Option<StorageChain>,
    events: Option<Arc<dyn SessionEvents>>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            #[cfg(not(target_arch = "wasm32"))]
            timeout: Duration::from_secs(crate::config::ClientConfig::DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            storage: None,
            events: None,
        }
    }
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the default 30 second request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Credential backends the session fans out to
    pub fn storage(mut self, storage: StorageChain) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Handler invoked when the session expires
    pub fn events(mut self, events: Arc<dyn SessionEvents>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the client; rehydrates the session from storage
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = ClientBuilder::new().user_agent(
            self.user_agent
                .unwrap_or_else(|| "videotube-client/0.1.0".to_string()),
        );
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(self.timeout);
        }
        let client = builder.build()?;

        let storage = self.storage.unwrap_or_else(default_storage);
        let session = SessionStore::new(base_url.clone(), storage, client.clone());
        session.initialize();

        Ok(ApiClient {
            client,
            base_url,
            session,
            events: self.events.unwrap_or_else(|| Arc::new(NoopEvents)),
        })
    }
}

fn default_storage() -> StorageChain {
    #[cfg(target_arch = "wasm32")]
    {
        StorageChain::browser()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        StorageChain::in_memory()
    }
}
