//! Creator dashboard client methods

use reqwest::Method;
use videotube_core::types::{ChannelStats, Video};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Aggregate stats for the caller's channel
    pub async fn channel_stats(&self) -> Result<ChannelStats, ClientError> {
        let request = self.request(Method::GET, "/dashboard/stats");
        self.execute(request).await
    }

    /// Every video on the caller's channel, drafts included
    pub async fn channel_videos(&self) -> Result<Vec<Video>, ClientError> {
        let request = self.request(Method::GET, "/dashboard/videos");
        self.execute(request).await
    }
}
