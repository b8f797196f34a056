//! Browser `sessionStorage` / `localStorage` access.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes hydrate-only web-sys glue behind `KeyValueStore` so the session
//! logic never touches the DOM directly. Outside the browser every read misses
//! and every write is dropped.

use crate::state::session::{KeyValueStore, Session};

/// Which browser storage area to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageScope {
    Session,
    Local,
}

/// `KeyValueStore` backed by `window.sessionStorage` or `window.localStorage`.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    scope: StorageScope,
}

impl BrowserStorage {
    pub fn new(scope: StorageScope) -> Self {
        Self { scope }
    }

    #[cfg(feature = "hydrate")]
    fn storage(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self.scope {
            StorageScope::Session => window.session_storage().ok().flatten(),
            StorageScope::Local => window.local_storage().ok().flatten(),
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            self.storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.scope, key);
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = self.storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("storage write failed for {key}");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = self.storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Session bound to the browser's storage areas.
pub type BrowserSession = Session<BrowserStorage, BrowserStorage>;

/// Open the browser session.
pub fn browser_session() -> BrowserSession {
    Session::new(BrowserStorage::new(StorageScope::Session), BrowserStorage::new(StorageScope::Local))
}
