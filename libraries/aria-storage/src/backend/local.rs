use aria_core::{AriaError, KeyValueStore, Result};
use gloo_storage::{LocalStorage, Storage};

/// Browser `localStorage` backend
///
/// Values are stored as the raw JSON strings handed in by the stores, so the
/// persisted layout stays readable by any other code using the same keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| AriaError::storage(format!("localStorage read failed: {e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| AriaError::storage(format!("localStorage write failed: {e:?}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| AriaError::storage(format!("localStorage delete failed: {e:?}")))
    }
}
