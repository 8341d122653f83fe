//! Durable Token Storage
//!
//! Key-value storage that survives a page reload.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use log::warn;

pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Errors are logged and read as "absent".
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local_storage() -> Option<web_sys::Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!("localStorage unavailable: {e:?}");
                None
            }
        }
    }

    pub fn is_available() -> bool {
        Self::local_storage().is_some()
    }
}

impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::local_storage() {
            if let Err(e) = storage.set_item(key, value) {
                warn!("Failed to persist {key}: {e:?}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            if let Err(e) = storage.remove_item(key) {
                warn!("Failed to remove {key}: {e:?}");
            }
        }
    }
}

/// In-process map; lost on reload
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}
