//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lsp6_core::keys::{
    ADDRESS_PERMISSIONS_PREFIX, EXTENSION_PREFIX, PERMISSIONS_ARRAY_PREFIX,
    UNIVERSAL_RECEIVER_DELEGATE_PREFIX,
};
use lsp6_core::{Address, DataKey, Permission, MAX_DATA_KEY_ENTRY_LEN};

/// Generate a random Address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate a random DataKey.
pub fn data_key() -> impl Strategy<Value = DataKey> {
    any::<[u8; 32]>().prop_map(DataKey::from_bytes)
}

/// Generate a DataKey outside every reserved namespace.
pub fn generic_data_key() -> impl Strategy<Value = DataKey> {
    data_key().prop_filter("reserved key prefix", |key| {
        ![
            &PERMISSIONS_ARRAY_PREFIX[..],
            &ADDRESS_PERMISSIONS_PREFIX[..],
            &UNIVERSAL_RECEIVER_DELEGATE_PREFIX[..],
            &EXTENSION_PREFIX[..],
        ]
        .iter()
        .any(|prefix| key.starts_with(prefix))
    })
}

/// Generate a single named permission.
pub fn named_permission() -> impl Strategy<Value = Permission> {
    (0u32..22).prop_map(|bit| Permission::from_u64(1 << bit))
}

/// Generate an arbitrary combination of named permissions.
pub fn permission() -> impl Strategy<Value = Permission> {
    prop::collection::vec(named_permission(), 0..6).prop_map(Permission::combine)
}

/// Generate a valid allowlist entry (1 to 32 bytes).
pub fn allowlist_entry() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=MAX_DATA_KEY_ENTRY_LEN)
}

/// Generate a list of valid allowlist entries.
pub fn allowlist(max_entries: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(allowlist_entry(), 1..=max_entries.max(1))
}

/// Generate value bytes of specified max length.
pub fn value(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for a batch of generic writes.
#[derive(Debug, Clone)]
pub struct GenericBatch {
    pub keys: Vec<DataKey>,
    pub values: Vec<Vec<u8>>,
}

impl Arbitrary for GenericBatch {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::collection::vec((generic_data_key(), value(64)), 1..8)
            .prop_map(|pairs| {
                let (keys, values) = pairs.into_iter().unzip();
                GenericBatch { keys, values }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp6_core::{encode_compact_array, is_valid_allowed_data_keys, KeyCategory};

    proptest! {
        #[test]
        fn test_generic_keys_classify_as_generic(key in generic_data_key()) {
            prop_assert_eq!(key.category(), KeyCategory::Generic);
        }

        #[test]
        fn test_generated_allowlists_are_valid(entries in allowlist(8)) {
            let encoded = encode_compact_array(&entries).unwrap();
            prop_assert!(is_valid_allowed_data_keys(&encoded));
        }

        #[test]
        fn test_named_permission_has_one_bit(permission in named_permission()) {
            prop_assert_eq!(permission.names().len(), 1);
        }

        #[test]
        fn test_batch_is_parallel(batch: GenericBatch) {
            prop_assert_eq!(batch.keys.len(), batch.values.len());
        }
    }
}
