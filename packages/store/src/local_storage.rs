//! # Browser `localStorage` token store
//!
//! [`LocalStorageStore`] is the [`TokenStore`] implementation used on the **web
//! platform**. The token lives under a single key (default [`TOKEN_KEY`]) in the
//! origin's `localStorage`, so it survives reloads and is shared between tabs.
//!
//! ## Error handling
//!
//! No trait method fails. Reads that hit an error return `None`; writes that hit one
//! log a warning and leave storage as it was. Storage can be unavailable in private
//! browsing, full, or disabled by the user; that degrades to "logged out".

use web_sys::Storage;

use crate::token::{TokenStore, TOKEN_KEY};

/// `localStorage`-backed TokenStore for the web platform.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    /// Create a store using the default `"token"` key.
    pub fn new() -> Self {
        Self::with_key(TOKEN_KEY)
    }

    /// Create a store under a custom key.
    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok()?
    }

    fn save(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable; token not persisted");
            return;
        };
        if let Err(e) = storage.set_item(&self.key, token) {
            tracing::warn!("Failed to write token to localStorage: {:?}", e);
        }
    }

    fn clear(&self) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable; token not cleared");
            return;
        };
        if let Err(e) = storage.remove_item(&self.key) {
            tracing::warn!("Failed to remove token from localStorage: {:?}", e);
        }
    }
}
