use std::collections::BTreeMap;

use anyhow::Result;

/// A flat store of string values under string keys, modeled on the browser's `localStorage`.
/// Keys are expected to be made of ASCII letters, digits, and underscores; callers sanitize
/// anything else away before it gets here.
pub trait KeyValueStore {
    /// `Ok(None)` means the key isn't present. `Err` means the store itself failed.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Keeps everything in memory and forgets it when dropped. Useful for tests and for running
/// without anywhere to persist.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get_item("a").unwrap(), None);

        store.set_item("a", "1").unwrap();
        store.set_item("a", "2").unwrap();
        assert_eq!(store.get_item("a").unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);

        store.remove_item("a").unwrap();
        store.remove_item("never_there").unwrap();
        assert!(store.is_empty());
    }
}
