//! Store traits: the abstract interface to an ERC725Y data store.
//!
//! Verification only ever reads ([`DataStore`]). Writes ([`DataStoreMut`])
//! are performed by the caller after verification succeeds.

use bytes::Bytes;
use lsp6_core::DataKey;

use crate::error::{Result, StoreError};

/// Read access to an ERC725Y key/value store.
///
/// An unset key reads as an empty value.
pub trait DataStore {
    /// Get the value stored under `key`.
    fn get_data(&self, key: &DataKey) -> Result<Bytes>;

    /// Get the values stored under several keys, in order.
    fn get_data_batch(&self, keys: &[DataKey]) -> Result<Vec<Bytes>> {
        keys.iter().map(|key| self.get_data(key)).collect()
    }
}

/// Write access to an ERC725Y key/value store.
///
/// Setting an empty value removes the key.
pub trait DataStoreMut: DataStore {
    /// Store `value` under `key`.
    fn set_data(&self, key: &DataKey, value: &[u8]) -> Result<()>;

    /// Store several key/value pairs, in order.
    fn set_data_batch(&self, keys: &[DataKey], values: &[Bytes]) -> Result<()> {
        if keys.len() != values.len() {
            return Err(StoreError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        for (key, value) in keys.iter().zip(values) {
            self.set_data(key, value)?;
        }
        Ok(())
    }
}

impl<S: DataStore + ?Sized> DataStore for &S {
    fn get_data(&self, key: &DataKey) -> Result<Bytes> {
        (**self).get_data(key)
    }
}

impl<S: DataStore + ?Sized> DataStore for std::sync::Arc<S> {
    fn get_data(&self, key: &DataKey) -> Result<Bytes> {
        (**self).get_data(key)
    }
}

impl<S: DataStoreMut + ?Sized> DataStoreMut for std::sync::Arc<S> {
    fn set_data(&self, key: &DataKey, value: &[u8]) -> Result<()> {
        (**self).set_data(key, value)
    }
}
