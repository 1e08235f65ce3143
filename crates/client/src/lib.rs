//! VideoTube API client
//!
//! The two moving parts are the [`SessionStore`] (authentication state with
//! multi-backend credential persistence and the token refresh protocol) and
//! the [`ApiClient`] request pipeline (bearer injection plus a single
//! transparent refresh-and-replay cycle on 401). Typed endpoint methods for
//! the rest of the API live under [`api`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod jwt;
pub mod session;
pub mod storage;
mod wire;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::ClientError;
pub use events::{NoopEvents, SessionEvents};
pub use session::{Session, SessionStore, TokenPair};
pub use storage::{CredentialStorage, MemoryStorage, StorageChain, StorageError};

#[cfg(target_arch = "wasm32")]
pub use events::RedirectToLogin;
