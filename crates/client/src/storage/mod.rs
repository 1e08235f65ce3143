//! Credential persistence
//!
//! Credentials are mirrored across several storage backends so that an
//! environment where one backend is restricted (private browsing, disabled
//! cookies, storage quota) still leaves a readable copy somewhere. Writes fan
//! out to every backend, reads take the first hit in priority order, and a
//! single backend failing never aborts the others.

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::{CookieStorage, LocalStorageBackend, SessionStorageBackend};
pub use memory::MemoryStorage;

use std::sync::Arc;
use thiserror::Error;

/// A single backend's read or write failure
#[derive(Debug, Error)]
#[error("storage backend {backend} failed: {message}")]
pub struct StorageError {
    pub backend: &'static str,
    pub message: String,
}

impl StorageError {
    pub fn new(backend: &'static str, message: impl Into<String>) -> Self {
        Self {
            backend,
            message: message.into(),
        }
    }
}

/// One place credentials can be mirrored to
pub trait CredentialStorage: Send + Sync {
    /// Short name used in logs
    fn label(&self) -> &'static str;

    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: CredentialStorage + ?Sized> CredentialStorage for Arc<T> {
    fn label(&self) -> &'static str {
        (**self).label()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Ordered fan-out over every configured backend
pub struct StorageChain {
    backends: Vec<Box<dyn CredentialStorage>>,
}

impl StorageChain {
    /// Backends in read priority order
    pub fn new(backends: Vec<Box<dyn CredentialStorage>>) -> Self {
        Self { backends }
    }

    /// Single in-process backend, the default outside the browser
    pub fn in_memory() -> Self {
        Self::new(vec![Box::new(MemoryStorage::new("memory"))])
    }

    /// localStorage, sessionStorage and a cookie fallback, in that priority order
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(vec![
            Box::new(browser::LocalStorageBackend),
            Box::new(browser::SessionStorageBackend),
            Box::new(browser::CookieStorage),
        ])
    }

    /// First present value wins, in backend priority order
    pub fn read(&self, key: &str) -> Option<String> {
        for backend in &self.backends {
            match backend.get(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%err, key, "credential read failed, trying next backend");
                }
            }
        }
        None
    }

    /// Write to every backend; individual failures are logged, not propagated
    pub fn write(&self, key: &str, value: &str) {
        for backend in &self.backends {
            if let Err(err) = backend.set(key, value) {
                tracing::warn!(%err, key, "credential write failed");
            }
        }
    }

    /// Remove the key from every backend
    pub fn clear(&self, key: &str) {
        for backend in &self.backends {
            if let Err(err) = backend.remove(key) {
                tracing::warn!(%err, key, "credential removal failed");
            }
        }
    }
}
