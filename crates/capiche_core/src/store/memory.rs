//! In-process key-value store.

use std::collections::BTreeMap;

use super::{validate_key, KeyValueStore, StoreResult};

/// Map-backed store; contents live as long as the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn set_get_remove_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        assert!(store.remove_item("k").unwrap());
        assert!(!store.remove_item("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn blank_key_is_rejected() {
        let mut store = MemoryStore::new();
        let err = store.set_item("  ", "v").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
