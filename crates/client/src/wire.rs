//! Shared response decoding
//!
//! All response bodies pass through here so envelope validation happens in
//! exactly one place.

use serde::de::DeserializeOwned;
use videotube_core::{ApiEnvelope, ApiErrorBody};

use crate::error::ClientError;

/// Decode a response through the envelope schema.
///
/// Success statuses must carry a well-formed [`ApiEnvelope`]; anything else
/// is rejected as a shape error rather than silently producing defaults.
/// Error statuses map through [`ClientError::from_status`] with the server's
/// message when one is present.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        let body = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|err| {
            tracing::error!(%err, "response body did not match the envelope schema");
            ClientError::UnexpectedShape(err.to_string())
        })?;
        envelope
            .into_data()
            .map_err(|err| ClientError::UnexpectedShape(err.to_string()))
    } else {
        let message = error_message(response).await;
        Err(ClientError::from_status(status, message))
    }
}

/// Best-effort extraction of the server's error message
pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if !body.is_empty() => body,
        Err(_) => status.to_string(),
    }
}
