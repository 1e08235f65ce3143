//! Typed endpoint methods, grouped by resource
//!
//! Every method builds a request through [`crate::ApiClient::request`] and
//! dispatches it through the pipeline, so all of them inherit bearer
//! injection and refresh-and-replay.

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;
