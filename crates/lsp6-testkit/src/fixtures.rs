//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a shared store with one or more
//! registered controllers.

use std::sync::Arc;

use bytes::Bytes;
use lsp6_core::keys::PERMISSIONS_ARRAY_KEY;
use lsp6_core::{
    allowed_calls_key, allowed_data_keys_key, encode_allowed_calls, encode_compact_array,
    permissions_array_index_key, permissions_key, Address, AllowedCall, DataKey, Permission,
};
use lsp6_perms::decode_stored_array_length;
use lsp6_store::{DataStore, DataStoreMut, MemoryStore};

/// A controller seeded directly into a memory store.
///
/// Writes made through the fixture bypass verification; they set up the
/// state a test then verifies against.
pub struct ControllerFixture {
    pub controller: Address,
    pub store: Arc<MemoryStore>,
}

impl ControllerFixture {
    /// Create a fixture with its own empty store.
    pub fn new(seed: u8) -> Self {
        Self::with_store(seed, Arc::new(MemoryStore::new()))
    }

    /// Create a fixture over a shared store.
    pub fn with_store(seed: u8, store: Arc<MemoryStore>) -> Self {
        Self {
            controller: Address::from_bytes([seed; 20]),
            store,
        }
    }

    /// Store `permission` as this controller's bitfield.
    pub fn grant(&self, permission: Permission) -> &Self {
        self.put(&permissions_key(&self.controller), permission.as_bytes());
        self
    }

    /// Store `prefixes` as this controller's allowed data keys list.
    pub fn allow_keys<E: AsRef<[u8]>>(&self, prefixes: &[E]) -> &Self {
        let Ok(encoded) = encode_compact_array(prefixes) else {
            panic!("allowlist entry longer than u16::MAX");
        };
        self.put(&allowed_data_keys_key(&self.controller), &encoded);
        self
    }

    /// Store raw bytes as this controller's allowed data keys list.
    pub fn allow_keys_raw(&self, raw: &[u8]) -> &Self {
        self.put(&allowed_data_keys_key(&self.controller), raw);
        self
    }

    /// Store `calls` as this controller's allowed calls list.
    pub fn allow_calls(&self, calls: &[AllowedCall]) -> &Self {
        self.put(&allowed_calls_key(&self.controller), &encode_allowed_calls(calls));
        self
    }

    /// Append this controller to `AddressPermissions[]`.
    pub fn register(&self) -> &Self {
        let length = decode_stored_array_length(&self.get(&PERMISSIONS_ARRAY_KEY));
        self.put(
            &permissions_array_index_key(length),
            self.controller.as_bytes(),
        );
        self.put(&PERMISSIONS_ARRAY_KEY, &(length + 1).to_be_bytes());
        self
    }

    /// Current value under `key`.
    pub fn get(&self, key: &DataKey) -> Bytes {
        match self.store.get_data(key) {
            Ok(value) => value,
            Err(err) => panic!("memory store read failed: {err}"),
        }
    }

    fn put(&self, key: &DataKey, value: &[u8]) {
        if let Err(err) = self.store.set_data(key, value) {
            panic!("memory store write failed: {err}");
        }
    }
}

/// Create several controllers over one shared store.
///
/// Controller `i` has address `[i + 1; 20]` and is registered in
/// `AddressPermissions[]` at index `i`.
pub fn multi_controller_fixtures(count: usize) -> Vec<ControllerFixture> {
    let store = Arc::new(MemoryStore::new());
    (0..count)
        .map(|i| {
            let fixture = ControllerFixture::with_store(i as u8 + 1, Arc::clone(&store));
            fixture.register();
            fixture
        })
        .collect()
}
