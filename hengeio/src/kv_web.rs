use anyhow::{anyhow, Result};

use crate::KeyValueStore;

/// The browser's `window.localStorage`. Every call looks the storage up again, so a store
/// constructed before the page finished loading still works later.
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> LocalStorage {
        LocalStorage
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window?"))?;
        window
            .local_storage()
            .map_err(|err| {
                anyhow!(err
                    .as_string()
                    .unwrap_or_else(|| "local_storage failed".to_string()))
            })?
            .ok_or_else(|| anyhow!("no local_storage?"))
    }
}

impl Default for LocalStorage {
    fn default() -> LocalStorage {
        LocalStorage::new()
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(|err| {
            anyhow!(err
                .as_string()
                .unwrap_or_else(|| format!("get_item({}) failed", key)))
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // Quota errors land here
        self.storage()?.set_item(key, value).map_err(|err| {
            anyhow!(err
                .as_string()
                .unwrap_or_else(|| format!("set_item({}) failed", key)))
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(|err| {
            anyhow!(err
                .as_string()
                .unwrap_or_else(|| format!("remove_item({}) failed", key)))
        })
    }
}
