//! Browser-backed credential storage
//!
//! Each backend fetches its handle from `window` per call rather than holding
//! one, so a backend that the browser restricts mid-session reports a
//! [`StorageError`] instead of going stale.

use wasm_bindgen::JsCast;

use super::{CredentialStorage, StorageError};
use crate::config::ClientConfig;

fn web_storage(
    label: &'static str,
    pick: impl Fn(&web_sys::Window) -> Result<Option<web_sys::Storage>, wasm_bindgen::JsValue>,
) -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|window| pick(&window).ok().flatten())
        .ok_or_else(|| StorageError::new(label, "unavailable"))
}

fn js_err(label: &'static str, err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::new(label, format!("{err:?}"))
}

/// Durable backend (`window.localStorage`)
pub struct LocalStorageBackend;

impl CredentialStorage for LocalStorageBackend {
    fn label(&self) -> &'static str {
        "localStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = web_storage(self.label(), |w| w.local_storage())?;
        storage.get_item(key).map_err(|e| js_err(self.label(), e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = web_storage(self.label(), |w| w.local_storage())?;
        storage
            .set_item(key, value)
            .map_err(|e| js_err(self.label(), e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = web_storage(self.label(), |w| w.local_storage())?;
        storage.remove_item(key).map_err(|e| js_err(self.label(), e))
    }
}

/// Tab-scoped backend (`window.sessionStorage`)
pub struct SessionStorageBackend;

impl CredentialStorage for SessionStorageBackend {
    fn label(&self) -> &'static str {
        "sessionStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = web_storage(self.label(), |w| w.session_storage())?;
        storage.get_item(key).map_err(|e| js_err(self.label(), e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = web_storage(self.label(), |w| w.session_storage())?;
        storage
            .set_item(key, value)
            .map_err(|e| js_err(self.label(), e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = web_storage(self.label(), |w| w.session_storage())?;
        storage.remove_item(key).map_err(|e| js_err(self.label(), e))
    }
}

/// Cookie fallback for environments where web storage is blocked entirely
pub struct CookieStorage;

impl CookieStorage {
    fn document(&self) -> Result<web_sys::HtmlDocument, StorageError> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
            .ok_or_else(|| StorageError::new(self.label(), "document unavailable"))
    }

    fn https(&self) -> bool {
        web_sys::window()
            .and_then(|window| window.location().protocol().ok())
            .is_some_and(|protocol| protocol == "https:")
    }
}

impl CredentialStorage for CookieStorage {
    fn label(&self) -> &'static str {
        "cookie"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cookies = self
            .document()?
            .cookie()
            .map_err(|e| js_err(self.label(), e))?;
        let prefix = format!("{key}=");
        Ok(cookies
            .split("; ")
            .find_map(|entry| entry.strip_prefix(&prefix))
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let secure = if self.https() { "; Secure" } else { "" };
        let cookie = format!(
            "{key}={value}; path=/; SameSite=Strict{secure}; max-age={}",
            ClientConfig::COOKIE_MAX_AGE_SECS
        );
        self.document()?
            .set_cookie(&cookie)
            .map_err(|e| js_err(self.label(), e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let cookie = format!("{key}=; expires=Thu, 01 Jan 1970 00:00:00 UTC; path=/;");
        self.document()?
            .set_cookie(&cookie)
            .map_err(|e| js_err(self.label(), e))
    }
}
