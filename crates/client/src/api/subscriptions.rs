//! Subscription client methods

use reqwest::Method;
use videotube_core::types::{Subscription, SubscriptionToggle};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Subscribe to or unsubscribe from a channel
    pub async fn toggle_subscription(
        &self,
        channel_id: &str,
    ) -> Result<SubscriptionToggle, ClientError> {
        let request = self.request(Method::POST, &format!("/subscriptions/c/{channel_id}"));
        self.execute(request).await
    }

    /// Channels a user is subscribed to
    pub async fn subscribed_channels(&self, user_id: &str) -> Result<Vec<Subscription>, ClientError> {
        let request = self.request(Method::GET, &format!("/subscriptions/c/{user_id}"));
        self.execute(request).await
    }
}
