//! Video catalog client methods

use reqwest::Method;
use videotube_core::types::{Page, Video, VideoMetadataRequest};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// List published videos, paginated, optionally filtered by a search query
    pub async fn list_videos(
        &self,
        page: u32,
        query: Option<&str>,
    ) -> Result<Page<Video>, ClientError> {
        let mut request = self
            .request(Method::GET, "/videos")
            .query(&[("page", page.to_string())]);
        if let Some(query) = query {
            request = request.query(&[("query", query)]);
        }
        self.execute(request).await
    }

    /// Video with populated owner and like/view details; counts a view
    pub async fn video_details(&self, video_id: &str) -> Result<Video, ClientError> {
        let request = self.request(Method::GET, &format!("/videos/{video_id}/details"));
        self.execute(request).await
    }

    /// Register a video already uploaded to the media host with the catalog
    pub async fn publish_video_metadata(
        &self,
        metadata: &VideoMetadataRequest,
    ) -> Result<Video, ClientError> {
        let request = self.request(Method::POST, "/videos/metadata").json(metadata);
        self.execute(request).await
    }

    /// Flip a video between published and draft
    pub async fn toggle_publish(&self, video_id: &str) -> Result<Video, ClientError> {
        let request = self.request(Method::PATCH, &format!("/videos/toggle/publish/{video_id}"));
        self.execute(request).await
    }

    /// Delete a video and its media
    pub async fn delete_video(&self, video_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/videos/{video_id}"));
        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}
