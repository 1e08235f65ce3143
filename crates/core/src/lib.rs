//! VideoTube core types and utilities

pub mod envelope;
pub mod error;
pub mod types;

pub use envelope::{ApiEnvelope, ApiErrorBody};
pub use error::{CoreError, CoreResult};
