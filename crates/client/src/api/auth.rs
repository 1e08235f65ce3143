//! Authentication API client methods

use reqwest::Method;
use videotube_core::types::{AuthPayload, LoginRequest, RegisterRequest, User};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Authenticate and persist the returned credentials
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthPayload, ClientError> {
        self.session().login(credentials).await
    }

    /// Create an account; does not log in
    pub async fn register(&self, body: &RegisterRequest) -> Result<User, ClientError> {
        let request = self.request(Method::POST, "/auth/register").json(body);
        self.execute(request).await
    }

    /// Best-effort server-side invalidation; local state is always cleared
    pub async fn logout(&self) {
        let request = self.request(Method::POST, "/auth/logout");
        if let Err(err) = self.execute::<serde_json::Value>(request).await {
            tracing::debug!(%err, "server-side logout failed, clearing local state anyway");
        }
        self.session().logout();
    }

    /// Fetch the profile for the current bearer credential
    pub async fn me(&self) -> Result<User, ClientError> {
        let request = self.request(Method::GET, "/auth/me");
        self.execute(request).await
    }
}
