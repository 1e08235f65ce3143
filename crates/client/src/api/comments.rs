//! Comment client methods

use reqwest::Method;
use videotube_core::types::{Comment, CommentBody, Page};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Comments on a video, paginated
    pub async fn video_comments(
        &self,
        video_id: &str,
        page: u32,
    ) -> Result<Page<Comment>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/comments/{video_id}"))
            .query(&[("page", page.to_string())]);
        self.execute(request).await
    }

    /// Add a comment to a video
    pub async fn add_comment(&self, video_id: &str, content: &str) -> Result<Comment, ClientError> {
        let request = self
            .request(Method::POST, &format!("/comments/{video_id}"))
            .json(&CommentBody {
                content: content.to_string(),
            });
        self.execute(request).await
    }

    /// Edit an own comment
    pub async fn update_comment(
        &self,
        comment_id: &str,
        content: &str,
    ) -> Result<Comment, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/comments/c/{comment_id}"))
            .json(&CommentBody {
                content: content.to_string(),
            });
        self.execute(request).await
    }

    /// Delete an own comment
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/comments/c/{comment_id}"));
        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}
