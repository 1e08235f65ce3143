//! API response envelope
//!
//! Every VideoTube endpoint wraps its payload in a common envelope. Instead
//! of optional-chaining through loosely typed JSON, the envelope is a defined
//! schema validated once at the network boundary; callers only ever see the
//! typed payload.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Success envelope returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub status_code: u16,
    pub data: T,
    #[serde(default)]
    pub message: String,
    pub success: bool,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, rejecting envelopes that flag failure
    pub fn into_data(self) -> Result<T, CoreError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(CoreError::invalid_shape(format!(
                "envelope flagged failure on a 2xx response: {}",
                self.message
            )))
        }
    }
}

/// Error body returned on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status_code: u16,
    pub message: String,
    #[serde(default)]
    pub success: bool,
}
