//! Playlist client methods

use reqwest::Method;
use videotube_core::types::{CreatePlaylistRequest, Playlist};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Create an empty playlist
    pub async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Playlist, ClientError> {
        let request = self
            .request(Method::POST, "/playlist")
            .json(&CreatePlaylistRequest {
                name: name.to_string(),
                description: description.to_string(),
            });
        self.execute(request).await
    }

    /// A playlist with its videos populated
    pub async fn playlist(&self, playlist_id: &str) -> Result<Playlist, ClientError> {
        let request = self.request(Method::GET, &format!("/playlist/{playlist_id}"));
        self.execute(request).await
    }

    /// All playlists owned by a user
    pub async fn user_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, ClientError> {
        let request = self.request(Method::GET, &format!("/playlist/user/{user_id}"));
        self.execute(request).await
    }

    /// Add a video to a playlist
    pub async fn add_video_to_playlist(
        &self,
        video_id: &str,
        playlist_id: &str,
    ) -> Result<Playlist, ClientError> {
        let request = self.request(Method::PATCH, &format!("/playlist/add/{video_id}/{playlist_id}"));
        self.execute(request).await
    }

    /// Remove a video from a playlist
    pub async fn remove_video_from_playlist(
        &self,
        video_id: &str,
        playlist_id: &str,
    ) -> Result<Playlist, ClientError> {
        let request = self.request(
            Method::PATCH,
            &format!("/playlist/remove/{video_id}/{playlist_id}"),
        );
        self.execute(request).await
    }

    /// Delete a playlist
    pub async fn delete_playlist(&self, playlist_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/playlist/{playlist_id}"));
        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}
