//! User and channel client methods

use reqwest::Method;
use videotube_core::types::{ChannelProfile, UpdateAccountRequest, User, Video};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// A channel page by username, with subscription counts relative to the
    /// caller
    pub async fn channel_profile(&self, username: &str) -> Result<ChannelProfile, ClientError> {
        let request = self.request(Method::GET, &format!("/users/c/{username}"));
        self.execute(request).await
    }

    /// The caller's watch history, most recent first
    pub async fn watch_history(&self) -> Result<Vec<Video>, ClientError> {
        let request = self.request(Method::GET, "/users/watch-history");
        self.execute(request).await
    }

    /// Drop one video from the caller's watch history
    pub async fn remove_from_watch_history(&self, video_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/users/watch-history/{video_id}"));
        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }

    /// Update account details; the refreshed profile is stored on the session
    pub async fn update_account(&self, body: &UpdateAccountRequest) -> Result<User, ClientError> {
        let request = self
            .request(Method::PATCH, "/users/update-account")
            .json(body);
        let user: User = self.execute(request).await?;
        self.session().set_user(user.clone());
        Ok(user)
    }
}
