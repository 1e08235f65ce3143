//! Like toggle client methods

use reqwest::Method;
use videotube_core::types::LikeToggle;

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Toggle the caller's like on a video
    pub async fn toggle_video_like(&self, video_id: &str) -> Result<LikeToggle, ClientError> {
        let request = self.request(Method::POST, &format!("/likes/toggle/v/{video_id}"));
        self.execute(request).await
    }

    /// Toggle the caller's like on a comment
    pub async fn toggle_comment_like(&self, comment_id: &str) -> Result<LikeToggle, ClientError> {
        let request = self.request(Method::POST, &format!("/likes/toggle/c/{comment_id}"));
        self.execute(request).await
    }

    /// Toggle the caller's like on a tweet
    pub async fn toggle_tweet_like(&self, tweet_id: &str) -> Result<LikeToggle, ClientError> {
        let request = self.request(Method::POST, &format!("/likes/toggle/t/{tweet_id}"));
        self.execute(request).await
    }
}
