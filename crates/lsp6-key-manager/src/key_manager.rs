//! The KeyManager: verified writes to an ERC725Y data store.
//!
//! Every write goes through the same path: load the caller's permission
//! bitfield, verify the request against the current store state, then
//! persist it. A denied request leaves the store untouched.

use std::sync::Arc;

use bytes::Bytes;
use lsp6_core::{
    allowed_calls_key, allowed_data_keys_key, decode_allowed_calls, decode_compact_array,
    permissions_key, Address, AllowedCall, DataKey, Permission,
};
use lsp6_perms::{verify_set_data, verify_set_data_batch};
use lsp6_store::DataStoreMut;
use serde::{Deserialize, Serialize};

use crate::error::{KeyManagerError, Result};

/// Configuration for the KeyManager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyManagerConfig {
    /// Verify requests without writing them to the store.
    pub verify_only: bool,
    /// Log accepted requests, not just denials.
    pub trace_decisions: bool,
}

/// Guards an ERC725Y data store behind LSP6 permission checks.
pub struct KeyManager<S: DataStoreMut> {
    store: Arc<S>,
    config: KeyManagerConfig,
}

impl<S: DataStoreMut> KeyManager<S> {
    /// Create a new key manager over `store`.
    pub fn new(store: S, config: KeyManagerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &KeyManagerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Permission bitfield stored for `controller`.
    pub fn permissions_of(&self, controller: &Address) -> Result<Permission> {
        let stored = self.store.get_data(&permissions_key(controller))?;
        Ok(Permission::from_stored(&stored))
    }

    /// Entries of `controller`'s allowed data keys list.
    pub fn allowed_data_keys_of(&self, controller: &Address) -> Result<Vec<Bytes>> {
        let stored = self.store.get_data(&allowed_data_keys_key(controller))?;
        let entries = decode_compact_array(&stored)?;
        Ok(entries
            .into_iter()
            .map(|entry| stored.slice_ref(entry))
            .collect())
    }

    /// Entries of `controller`'s allowed calls list.
    pub fn allowed_calls_of(&self, controller: &Address) -> Result<Vec<AllowedCall>> {
        let stored = self.store.get_data(&allowed_calls_key(controller))?;
        Ok(decode_allowed_calls(&stored)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Write `value` under `key` on behalf of `controller`.
    pub fn set_data(&self, controller: &Address, key: &DataKey, value: &[u8]) -> Result<()> {
        let granted = self.granted_permissions(controller)?;

        if let Err(err) = verify_set_data(&*self.store, controller, granted, key, value) {
            tracing::warn!(%controller, %key, error = %err, "setData denied");
            return Err(err.into());
        }

        if self.config.trace_decisions {
            tracing::debug!(%controller, %key, "setData authorised");
        }

        if !self.config.verify_only {
            self.store.set_data(key, value)?;
        }
        Ok(())
    }

    /// Write several key/value pairs on behalf of `controller`.
    ///
    /// The batch is all-or-nothing: nothing is written unless every entry
    /// is authorised.
    pub fn set_data_batch(
        &self,
        controller: &Address,
        keys: &[DataKey],
        values: &[Bytes],
    ) -> Result<()> {
        let granted = self.granted_permissions(controller)?;

        if let Err(err) = verify_set_data_batch(&*self.store, controller, granted, keys, values) {
            tracing::warn!(%controller, keys = keys.len(), error = %err, "setData batch denied");
            return Err(err.into());
        }

        if self.config.trace_decisions {
            tracing::debug!(%controller, keys = keys.len(), "setData batch authorised");
        }

        if !self.config.verify_only {
            self.store.set_data_batch(keys, values)?;
        }
        Ok(())
    }

    fn granted_permissions(&self, controller: &Address) -> Result<Permission> {
        let granted = self.permissions_of(controller)?;
        if granted.is_zero() {
            tracing::warn!(%controller, "caller has no permissions");
            return Err(KeyManagerError::NoPermissionsSet {
                controller: *controller,
            });
        }
        Ok(granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp6_core::encode_compact_array;
    use lsp6_perms::VerifyError;
    use lsp6_store::{DataStore, MemoryStore};

    fn owner() -> Address {
        Address::from_bytes([0x0a; 20])
    }

    fn generic_key(first: u8) -> DataKey {
        let mut bytes = [0x11; 32];
        bytes[0] = first;
        DataKey::from_bytes(bytes)
    }

    fn manager_with(granted: Permission, config: KeyManagerConfig) -> KeyManager<MemoryStore> {
        let store = MemoryStore::new();
        store.set_data(&permissions_key(&owner()), &granted.0).unwrap();
        KeyManager::new(store, config)
    }

    #[test]
    fn test_no_permissions_set() {
        let manager = KeyManager::new(MemoryStore::new(), KeyManagerConfig::default());
        let result = manager.set_data(&owner(), &generic_key(0xa0), b"v");
        assert!(matches!(
            result,
            Err(KeyManagerError::NoPermissionsSet { controller }) if controller == owner()
        ));
    }

    #[test]
    fn test_explicit_zero_permissions() {
        let manager = manager_with(Permission::NONE, KeyManagerConfig::default());
        let result = manager.set_data_batch(&owner(), &[generic_key(0xa0)], &[Bytes::from_static(b"v")]);
        assert!(matches!(result, Err(KeyManagerError::NoPermissionsSet { .. })));
    }

    #[test]
    fn test_authorised_write_persists() {
        let manager = manager_with(Permission::SUPER_SETDATA, KeyManagerConfig::default());
        let key = generic_key(0xa0);
        manager.set_data(&owner(), &key, b"hello").unwrap();
        assert_eq!(manager.store().get_data(&key).unwrap().as_ref(), b"hello");
    }

    #[test]
    fn test_denied_write_leaves_store_untouched() {
        let manager = manager_with(Permission::SETDATA, KeyManagerConfig::default());
        let key = generic_key(0xa0);
        let result = manager.set_data(&owner(), &key, b"hello");
        assert!(matches!(
            result.as_ref().err().and_then(KeyManagerError::as_verify),
            Some(VerifyError::NoKeysAllowed { .. })
        ));
        assert!(manager.store().get_data(&key).unwrap().is_empty());
    }

    #[test]
    fn test_verify_only_skips_write() {
        let config = KeyManagerConfig {
            verify_only: true,
            ..Default::default()
        };
        let manager = manager_with(Permission::SUPER_SETDATA, config);
        let key = generic_key(0xa0);
        manager.set_data(&owner(), &key, b"hello").unwrap();
        assert!(manager.store().get_data(&key).unwrap().is_empty());
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let manager = manager_with(Permission::SETDATA, KeyManagerConfig::default());
        let allowlist = encode_compact_array([[0xa0u8]]).unwrap();
        manager
            .store()
            .set_data(&allowed_data_keys_key(&owner()), &allowlist)
            .unwrap();

        let keys = [generic_key(0xa0), generic_key(0xb0)];
        let values = [Bytes::from_static(b"1"), Bytes::from_static(b"2")];
        assert!(manager.set_data_batch(&owner(), &keys, &values).is_err());
        assert!(manager.store().get_data(&keys[0]).unwrap().is_empty());
    }

    #[test]
    fn test_read_helpers() {
        let manager = manager_with(
            Permission::SETDATA | Permission::CALL,
            KeyManagerConfig::default(),
        );
        let allowlist = encode_compact_array([vec![0xa0u8], vec![0xbb; 32]]).unwrap();
        manager
            .store()
            .set_data(&allowed_data_keys_key(&owner()), &allowlist)
            .unwrap();

        assert_eq!(
            manager.permissions_of(&owner()).unwrap(),
            Permission::SETDATA | Permission::CALL
        );
        let entries = manager.allowed_data_keys_of(&owner()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].as_ref(), &[0xa0]);
        assert_eq!(entries[1].as_ref(), &[0xbb; 32]);
        assert!(manager.allowed_calls_of(&owner()).unwrap().is_empty());
    }

    #[test]
    fn test_config_default() {
        let config = KeyManagerConfig::default();
        assert!(!config.verify_only);
        assert!(!config.trace_decisions);
    }
}
