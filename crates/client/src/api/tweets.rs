//! Tweet client methods

use reqwest::Method;
use videotube_core::types::{Tweet, TweetBody};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Post a tweet
    pub async fn create_tweet(&self, content: &str) -> Result<Tweet, ClientError> {
        let request = self.request(Method::POST, "/tweets").json(&TweetBody {
            content: content.to_string(),
        });
        self.execute(request).await
    }

    /// All tweets by a user, newest first
    pub async fn user_tweets(&self, user_id: &str) -> Result<Vec<Tweet>, ClientError> {
        let request = self.request(Method::GET, &format!("/tweets/user/{user_id}"));
        self.execute(request).await
    }

    /// Delete an own tweet
    pub async fn delete_tweet(&self, tweet_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/tweets/{tweet_id}"));
        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}
