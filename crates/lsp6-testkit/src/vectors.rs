//! Key and permission vectors for deterministic verification.
//!
//! Each vector pins a builder's output to the exact bytes deployed stores
//! use, so a layout regression shows up as a hex mismatch.

use lsp6_core::{
    allowed_calls_key, allowed_data_keys_key, extension_key, permissions_array_index_key,
    permissions_key, receiver_delegate_key, Address, DataKey, KeyCategory, Permission,
};

/// Controller address used by the vectors.
pub const VECTOR_CONTROLLER: Address = Address::from_bytes([
    0xca, 0xfe, 0xca, 0xfe, 0xca, 0xfe, 0xca, 0xfe, 0xca, 0xfe, 0xca, 0xfe, 0xca, 0xfe, 0xca, 0xfe,
    0xca, 0xfe, 0xca, 0xfe,
]);

/// A data key vector.
#[derive(Debug, Clone)]
pub struct KeyVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The key produced by the builder.
    pub key: DataKey,
    /// Expected category of the key.
    pub category: KeyCategory,
    /// Expected key (hex, 0x-prefixed).
    pub expected_hex: &'static str,
}

/// A permission bitfield vector.
#[derive(Debug, Clone)]
pub struct PermissionVector {
    pub name: &'static str,
    pub permission: Permission,
    pub expected_hex: &'static str,
}

/// Get all data key vectors.
pub fn all_vectors() -> Vec<KeyVector> {
    vec![
        KeyVector {
            name: "AddressPermissions:Permissions:<controller>",
            key: permissions_key(&VECTOR_CONTROLLER),
            category: KeyCategory::ControllerPermissions(VECTOR_CONTROLLER),
            expected_hex: "0x4b80742de2bf82acb3630000cafecafecafecafecafecafecafecafecafecafe",
        },
        KeyVector {
            name: "AddressPermissions:AllowedCalls:<controller>",
            key: allowed_calls_key(&VECTOR_CONTROLLER),
            category: KeyCategory::AllowedCalls(VECTOR_CONTROLLER),
            expected_hex: "0x4b80742de2bf393a64c70000cafecafecafecafecafecafecafecafecafecafe",
        },
        KeyVector {
            name: "AddressPermissions:AllowedERC725YDataKeys:<controller>",
            key: allowed_data_keys_key(&VECTOR_CONTROLLER),
            category: KeyCategory::AllowedDataKeys(VECTOR_CONTROLLER),
            expected_hex: "0x4b80742de2bf866c29110000cafecafecafecafecafecafecafecafecafecafe",
        },
        KeyVector {
            name: "AddressPermissions[3]",
            key: permissions_array_index_key(3),
            category: KeyCategory::PermissionsArrayIndex,
            expected_hex: "0xdf30dba06db6a30e65354d9a64c6098600000000000000000000000000000003",
        },
        KeyVector {
            name: "LSP1UniversalReceiverDelegate:<typeId>",
            key: receiver_delegate_key(&[0xaa; 32]),
            category: KeyCategory::UniversalReceiverDelegate,
            expected_hex: "0x0cfc51aec37c55a4d0b10000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        },
        KeyVector {
            name: "LSP17Extension:transfer(address,uint256)",
            key: extension_key([0xa9, 0x05, 0x9c, 0xbb]),
            category: KeyCategory::Extension,
            expected_hex: "0xcee78b4094da860110960000a9059cbb00000000000000000000000000000000",
        },
    ]
}

/// Get all permission vectors.
pub fn permission_vectors() -> Vec<PermissionVector> {
    vec![
        PermissionVector {
            name: "ALL_PERMISSIONS",
            permission: Permission::ALL_PERMISSIONS,
            expected_hex: "0x00000000000000000000000000000000000000000000000000000000003f3f7f",
        },
        PermissionVector {
            name: "SETDATA | CALL",
            permission: Permission::SETDATA | Permission::CALL,
            expected_hex: "0x0000000000000000000000000000000000000000000000000000000000040800",
        },
    ]
}

/// Verify all key vectors against their expected encodings.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hex = v.key.to_hex();
            let matches = hex == v.expected_hex && v.key.category() == v.category;
            (v.name.to_string(), matches, hex)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_vectors_match() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "Vector '{}' produced {}", name, hex);
        }
    }

    #[test]
    fn test_permission_vectors_match() {
        for vector in permission_vectors() {
            assert_eq!(
                vector.permission.to_hex(),
                vector.expected_hex,
                "Vector '{}' mismatch",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_parse_back() {
        for vector in all_vectors() {
            let parsed = DataKey::from_hex(vector.expected_hex).unwrap();
            assert_eq!(parsed, vector.key, "Vector '{}' did not parse back", vector.name);
        }
    }
}
