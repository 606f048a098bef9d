//! Key classification: which permission does a write require?
//!
//! A key's leading bytes decide its category. Structural categories then
//! read the currently stored value to tell an ADD (slot is empty) from an
//! EDIT/CHANGE (slot already holds something).

use lsp6_core::{
    is_valid_allowed_calls, is_valid_allowed_data_keys, DataKey, KeyCategory, Permission,
    ADDRESS_LEN,
};
use lsp6_store::DataStore;

use crate::error::{Result, VerifyError};

/// Byte width of the `AddressPermissions[]` length value (`uint128`).
pub const ARRAY_LENGTH_LEN: usize = 16;

/// Permission a single write requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredPermission {
    /// Ordinary application data: SETDATA plus the allowlist, or SUPER_SETDATA.
    SetData,
    /// A write to the permission system itself: exactly this bit, no override.
    Structural(Permission),
}

impl RequiredPermission {
    /// The permission bit behind this requirement.
    pub fn permission(&self) -> Permission {
        match self {
            RequiredPermission::SetData => Permission::SETDATA,
            RequiredPermission::Structural(p) => *p,
        }
    }

    /// Whether this is a generic write subject to allowlist filtering.
    pub fn is_generic(&self) -> bool {
        matches!(self, RequiredPermission::SetData)
    }
}

/// Decide the permission required to write `value` under `key`.
///
/// Reads at most one value from `store` (the current value of `key`), and
/// only for structural keys.
pub fn classify<S: DataStore + ?Sized>(
    store: &S,
    key: &DataKey,
    value: &[u8],
) -> Result<RequiredPermission> {
    let category = key.category();

    let required = match category {
        KeyCategory::Generic => RequiredPermission::SetData,

        KeyCategory::PermissionsArrayLength => {
            let new_length = decode_array_length(value)?;
            let current_length = decode_stored_array_length(&store.get_data(key)?);
            if new_length > current_length {
                RequiredPermission::Structural(Permission::ADDCONTROLLER)
            } else {
                RequiredPermission::Structural(Permission::EDITPERMISSIONS)
            }
        }

        KeyCategory::PermissionsArrayIndex => {
            if !value.is_empty() && value.len() != ADDRESS_LEN {
                return Err(VerifyError::NotAnAddress {
                    key: *key,
                    value: value.to_vec().into(),
                });
            }
            add_or_edit(store.get_data(key)?.is_empty())
        }

        KeyCategory::ControllerPermissions(_) => {
            let current = Permission::from_stored(&store.get_data(key)?);
            add_or_edit(current.is_zero())
        }

        KeyCategory::AllowedCalls(_) => {
            if !is_valid_allowed_calls(value) {
                return Err(VerifyError::InvalidEncodedAllowedCalls {
                    value: value.to_vec().into(),
                });
            }
            add_or_edit(store.get_data(key)?.is_empty())
        }

        KeyCategory::AllowedDataKeys(_) => {
            if !is_valid_allowed_data_keys(value) {
                return Err(VerifyError::InvalidEncodedAllowedERC725YDataKeys {
                    value: value.to_vec().into(),
                });
            }
            add_or_edit(store.get_data(key)?.is_empty())
        }

        KeyCategory::UnrecognizedPermissionKey => {
            return Err(VerifyError::UnrecognizedPermissionKey { key: *key });
        }

        KeyCategory::UniversalReceiverDelegate => {
            if store.get_data(key)?.is_empty() {
                RequiredPermission::Structural(Permission::ADDUNIVERSALRECEIVERDELEGATE)
            } else {
                RequiredPermission::Structural(Permission::CHANGEUNIVERSALRECEIVERDELEGATE)
            }
        }

        KeyCategory::Extension => {
            if store.get_data(key)?.is_empty() {
                RequiredPermission::Structural(Permission::ADDEXTENSIONS)
            } else {
                RequiredPermission::Structural(Permission::CHANGEEXTENSIONS)
            }
        }
    };

    tracing::debug!(
        key = %key,
        ?category,
        required = %required.permission(),
        "classified data key"
    );

    Ok(required)
}

fn add_or_edit(slot_is_empty: bool) -> RequiredPermission {
    if slot_is_empty {
        RequiredPermission::Structural(Permission::ADDCONTROLLER)
    } else {
        RequiredPermission::Structural(Permission::EDITPERMISSIONS)
    }
}

/// Decode a new `AddressPermissions[]` value. Empty reads as zero.
pub fn decode_array_length(value: &[u8]) -> Result<u128> {
    match value.len() {
        0 => Ok(0),
        ARRAY_LENGTH_LEN => {
            let mut be = [0u8; ARRAY_LENGTH_LEN];
            be.copy_from_slice(value);
            Ok(u128::from_be_bytes(be))
        }
        _ => Err(VerifyError::InvalidArrayLengthValue {
            value: value.to_vec().into(),
        }),
    }
}

/// Decode the stored `AddressPermissions[]` value as a `bytes16` cast would:
/// the first 16 bytes, right-padded with zeros.
pub fn decode_stored_array_length(stored: &[u8]) -> u128 {
    let mut be = [0u8; ARRAY_LENGTH_LEN];
    let n = stored.len().min(ARRAY_LENGTH_LEN);
    be[..n].copy_from_slice(&stored[..n]);
    u128::from_be_bytes(be)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp6_core::keys::{ADDRESS_PERMISSIONS_PREFIX, PERMISSIONS_ARRAY_KEY, UNIVERSAL_RECEIVER_DELEGATE_KEY};
    use lsp6_core::{
        allowed_calls_key, allowed_data_keys_key, encode_allowed_calls, encode_compact_array,
        extension_key, permissions_array_index_key, permissions_key, receiver_delegate_key,
        Address, AllowedCall,
    };
    use lsp6_store::{DataStoreMut, MemoryStore};

    fn controller() -> Address {
        Address::from_bytes([0xca; 20])
    }

    fn length(n: u128) -> Vec<u8> {
        n.to_be_bytes().to_vec()
    }

    fn structural(p: Permission) -> RequiredPermission {
        RequiredPermission::Structural(p)
    }

    #[test]
    fn test_generic_key_requires_setdata() {
        let store = MemoryStore::new();
        let key = DataKey::from_bytes([0xa0; 32]);

        let required = classify(&store, &key, b"anything").unwrap();
        assert_eq!(required, RequiredPermission::SetData);
        assert!(required.is_generic());
        assert_eq!(required.permission(), Permission::SETDATA);
    }

    #[test]
    fn test_unrecognized_permission_key() {
        let store = MemoryStore::new();
        let key = DataKey::from_parts(&ADDRESS_PERMISSIONS_PREFIX, &[0x12; 26]).unwrap();

        let result = classify(&store, &key, &[]);
        assert!(matches!(
            result,
            Err(VerifyError::UnrecognizedPermissionKey { key: k }) if k == key
        ));
    }

    #[test]
    fn test_array_length_grow_is_add() {
        let store = MemoryStore::new();
        store.set_data(&PERMISSIONS_ARRAY_KEY, &length(3)).unwrap();

        let required = classify(&store, &PERMISSIONS_ARRAY_KEY, &length(5)).unwrap();
        assert_eq!(required, structural(Permission::ADDCONTROLLER));
    }

    #[test]
    fn test_array_length_shrink_is_edit() {
        let store = MemoryStore::new();
        store.set_data(&PERMISSIONS_ARRAY_KEY, &length(3)).unwrap();

        let required = classify(&store, &PERMISSIONS_ARRAY_KEY, &length(2)).unwrap();
        assert_eq!(required, structural(Permission::EDITPERMISSIONS));

        let same = classify(&store, &PERMISSIONS_ARRAY_KEY, &length(3)).unwrap();
        assert_eq!(same, structural(Permission::EDITPERMISSIONS));
    }

    #[test]
    fn test_array_length_from_unset() {
        let store = MemoryStore::new();

        let required = classify(&store, &PERMISSIONS_ARRAY_KEY, &length(1)).unwrap();
        assert_eq!(required, structural(Permission::ADDCONTROLLER));

        let cleared = classify(&store, &PERMISSIONS_ARRAY_KEY, &[]).unwrap();
        assert_eq!(cleared, structural(Permission::EDITPERMISSIONS));
    }

    #[test]
    fn test_array_length_bad_width() {
        let store = MemoryStore::new();

        let result = classify(&store, &PERMISSIONS_ARRAY_KEY, &[0u8; 32]);
        assert!(matches!(
            result,
            Err(VerifyError::InvalidArrayLengthValue { .. })
        ));
    }

    #[test]
    fn test_array_index_value_lengths() {
        let store = MemoryStore::new();
        let key = permissions_array_index_key(0);

        for bad in [19usize, 21, 1, 32] {
            let result = classify(&store, &key, &vec![0xaa; bad]);
            assert!(
                matches!(result, Err(VerifyError::NotAnAddress { .. })),
                "length {} accepted",
                bad
            );
        }

        assert!(classify(&store, &key, &[]).is_ok());
        assert!(classify(&store, &key, &[0xaa; 20]).is_ok());
    }

    #[test]
    fn test_array_index_new_slot_vs_existing() {
        let store = MemoryStore::new();
        let key = permissions_array_index_key(2);

        let new_slot = classify(&store, &key, controller().as_bytes()).unwrap();
        assert_eq!(new_slot, structural(Permission::ADDCONTROLLER));

        store.set_data(&key, &[0x01; 20]).unwrap();
        let existing = classify(&store, &key, controller().as_bytes()).unwrap();
        assert_eq!(existing, structural(Permission::EDITPERMISSIONS));

        let removal = classify(&store, &key, &[]).unwrap();
        assert_eq!(removal, structural(Permission::EDITPERMISSIONS));
    }

    #[test]
    fn test_controller_permissions_zero_is_add() {
        let store = MemoryStore::new();
        let key = permissions_key(&controller());
        let value = Permission::SETDATA.0;

        assert_eq!(
            classify(&store, &key, &value).unwrap(),
            structural(Permission::ADDCONTROLLER)
        );

        store.set_data(&key, &[0u8; 32]).unwrap();
        assert_eq!(
            classify(&store, &key, &value).unwrap(),
            structural(Permission::ADDCONTROLLER)
        );

        store.set_data(&key, &Permission::CALL.0).unwrap();
        assert_eq!(
            classify(&store, &key, &value).unwrap(),
            structural(Permission::EDITPERMISSIONS)
        );
    }

    #[test]
    fn test_allowed_calls_validation() {
        let store = MemoryStore::new();
        let key = allowed_calls_key(&controller());
        let call = AllowedCall::new([0xff; 4], Address::from_bytes([0x01; 20]), [0xff; 4]);
        let valid = encode_allowed_calls(&[call]);

        assert_eq!(
            classify(&store, &key, &valid).unwrap(),
            structural(Permission::ADDCONTROLLER)
        );

        store.set_data(&key, &valid).unwrap();
        assert_eq!(
            classify(&store, &key, &valid).unwrap(),
            structural(Permission::EDITPERMISSIONS)
        );

        let invalid = encode_compact_array([vec![0u8; 20]]).unwrap();
        assert!(matches!(
            classify(&store, &key, &invalid),
            Err(VerifyError::InvalidEncodedAllowedCalls { .. })
        ));
    }

    #[test]
    fn test_allowed_data_keys_validation() {
        let store = MemoryStore::new();
        let key = allowed_data_keys_key(&controller());
        let valid = encode_compact_array([vec![0xa0u8; 6], vec![0xb0; 32]]).unwrap();

        assert_eq!(
            classify(&store, &key, &valid).unwrap(),
            structural(Permission::ADDCONTROLLER)
        );

        store.set_data(&key, &valid).unwrap();
        assert_eq!(
            classify(&store, &key, &[]).unwrap(),
            structural(Permission::EDITPERMISSIONS)
        );

        let mut trailing = valid.clone();
        trailing.push(0xff);
        assert!(matches!(
            classify(&store, &key, &trailing),
            Err(VerifyError::InvalidEncodedAllowedERC725YDataKeys { .. })
        ));
    }

    #[test]
    fn test_receiver_delegate_add_vs_change() {
        let store = MemoryStore::new();
        let typed = receiver_delegate_key(&[0x77; 32]);

        for key in [UNIVERSAL_RECEIVER_DELEGATE_KEY, typed] {
            assert_eq!(
                classify(&store, &key, &[0x01; 20]).unwrap(),
                structural(Permission::ADDUNIVERSALRECEIVERDELEGATE)
            );
            store.set_data(&key, &[0x01; 20]).unwrap();
            assert_eq!(
                classify(&store, &key, &[0x02; 20]).unwrap(),
                structural(Permission::CHANGEUNIVERSALRECEIVERDELEGATE)
            );
        }
    }

    #[test]
    fn test_extension_add_vs_change() {
        let store = MemoryStore::new();
        let key = extension_key([0x12, 0x34, 0x56, 0x78]);

        assert_eq!(
            classify(&store, &key, &[0x01; 20]).unwrap(),
            structural(Permission::ADDEXTENSIONS)
        );
        store.set_data(&key, &[0x01; 20]).unwrap();
        assert_eq!(
            classify(&store, &key, &[]).unwrap(),
            structural(Permission::CHANGEEXTENSIONS)
        );
    }

    #[test]
    fn test_decode_stored_array_length_is_lenient() {
        assert_eq!(decode_stored_array_length(&[]), 0);
        assert_eq!(decode_stored_array_length(&length(7)), 7);

        let mut long = length(9);
        long.extend_from_slice(&[0xff; 16]);
        assert_eq!(decode_stored_array_length(&long), 9);
    }
}
