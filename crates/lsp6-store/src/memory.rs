//! In-memory implementation of the store traits.
//!
//! Used by tests and by embedders that keep the data store in process.
//! Same semantics as SQLite, no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use lsp6_core::DataKey;

use crate::error::{Result, StoreError};
use crate::traits::{DataStore, DataStoreMut};

/// In-memory store implementation.
///
/// Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<DataKey, Bytes>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (DataKey, V)>,
        V: Into<Bytes>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .filter(|(_, v): &(DataKey, Bytes)| !v.is_empty())
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether no key is set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DataStore for MemoryStore {
    fn get_data(&self, key: &DataKey) -> Result<Bytes> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let value = inner.get(key).cloned().unwrap_or_default();
        tracing::trace!(key = %key, len = value.len(), "memory store read");
        Ok(value)
    }
}

impl DataStoreMut for MemoryStore {
    fn set_data(&self, key: &DataKey, value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if value.is_empty() {
            inner.remove(key);
        } else {
            inner.insert(*key, Bytes::copy_from_slice(value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> DataKey {
        DataKey::from_bytes([b; 32])
    }

    #[test]
    fn test_unset_key_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.get_data(&key(1)).unwrap().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set_data(&key(1), b"hello").unwrap();

        assert_eq!(store.get_data(&key(1)).unwrap(), Bytes::from_static(b"hello"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_value_removes() {
        let store = MemoryStore::new();
        store.set_data(&key(1), b"hello").unwrap();
        store.set_data(&key(1), b"").unwrap();

        assert!(store.is_empty());
        assert!(store.get_data(&key(1)).unwrap().is_empty());
    }

    #[test]
    fn test_batch_roundtrip() {
        let store = MemoryStore::new();
        let keys = [key(1), key(2)];
        let values = [Bytes::from_static(b"a"), Bytes::from_static(b"b")];
        store.set_data_batch(&keys, &values).unwrap();

        assert_eq!(store.get_data_batch(&keys).unwrap(), values.to_vec());
    }

    #[test]
    fn test_batch_length_mismatch() {
        let store = MemoryStore::new();
        let result = store.set_data_batch(&[key(1), key(2)], &[Bytes::from_static(b"a")]);

        assert!(matches!(
            result,
            Err(StoreError::LengthMismatch { keys: 2, values: 1 })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_with_entries_skips_empty() {
        let store = MemoryStore::with_entries([(key(1), vec![1u8]), (key(2), vec![])]);
        assert_eq!(store.len(), 1);
    }
}
