//! Reserved ERC725Y data keys and their structural classification.
//!
//! Every constant in this module is part of the on-chain storage layout
//! (LSP2 key encodings) and must match deployed stores bit for bit.
//!
//! Classification is an ordered rule table: the first rule whose prefix
//! matches the key decides its tier, and a tier may then dispatch on a
//! longer sub-prefix.

use crate::types::{Address, DataKey, ADDRESS_LEN, DATA_KEY_LEN};

/// `AddressPermissions[]`: holds the number of controllers as a `uint128`.
pub const PERMISSIONS_ARRAY_KEY: DataKey = DataKey([
    0xdf, 0x30, 0xdb, 0xa0, 0x6d, 0xb6, 0xa3, 0x0e, 0x65, 0x35, 0x4d, 0x9a, 0x64, 0xc6, 0x09, 0x86,
    0x1f, 0x08, 0x95, 0x45, 0xca, 0x58, 0xc6, 0xb4, 0xdb, 0xe3, 0x1a, 0x5f, 0x33, 0x8c, 0xb0, 0xe3,
]);

/// `AddressPermissions[index]`: first half of the array key, followed by a `uint128` index.
pub const PERMISSIONS_ARRAY_PREFIX: [u8; 16] = [
    0xdf, 0x30, 0xdb, 0xa0, 0x6d, 0xb6, 0xa3, 0x0e, 0x65, 0x35, 0x4d, 0x9a, 0x64, 0xc6, 0x09, 0x86,
];

/// `AddressPermissions:*`: the reserved namespace for per-controller data.
pub const ADDRESS_PERMISSIONS_PREFIX: [u8; 6] = [0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf];

/// `AddressPermissions:Permissions:<address>`
pub const PERMISSIONS_PREFIX: [u8; 12] = [
    0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf, 0x82, 0xac, 0xb3, 0x63, 0x00, 0x00,
];

/// `AddressPermissions:AllowedCalls:<address>`
pub const ALLOWED_CALLS_PREFIX: [u8; 12] = [
    0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf, 0x39, 0x3a, 0x64, 0xc7, 0x00, 0x00,
];

/// `AddressPermissions:AllowedERC725YDataKeys:<address>`
pub const ALLOWED_DATA_KEYS_PREFIX: [u8; 12] = [
    0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf, 0x86, 0x6c, 0x29, 0x11, 0x00, 0x00,
];

/// `LSP1UniversalReceiverDelegate`: the default receiver delegate.
pub const UNIVERSAL_RECEIVER_DELEGATE_KEY: DataKey = DataKey([
    0x0c, 0xfc, 0x51, 0xae, 0xc3, 0x7c, 0x55, 0xa4, 0xd0, 0xb1, 0xa6, 0x5c, 0x62, 0x55, 0xc4, 0xbf,
    0x2f, 0xbd, 0xf6, 0x27, 0x7f, 0x3c, 0xc0, 0x73, 0x0c, 0x45, 0xb8, 0x28, 0xb6, 0xdb, 0x8b, 0x47,
]);

/// `LSP1UniversalReceiverDelegate:<typeId>`
pub const UNIVERSAL_RECEIVER_DELEGATE_PREFIX: [u8; 10] =
    [0x0c, 0xfc, 0x51, 0xae, 0xc3, 0x7c, 0x55, 0xa4, 0xd0, 0xb1];

/// `LSP17Extension:<selector>`
pub const EXTENSION_PREFIX: [u8; 10] = [0xce, 0xe7, 0x8b, 0x40, 0x94, 0xda, 0x86, 0x01, 0x10, 0x96];

/// Structural tag of a data key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// `AddressPermissions[]` length key.
    PermissionsArrayLength,
    /// `AddressPermissions[index]` element key.
    PermissionsArrayIndex,
    /// `AddressPermissions:Permissions:<controller>`
    ControllerPermissions(Address),
    /// `AddressPermissions:AllowedCalls:<controller>`
    AllowedCalls(Address),
    /// `AddressPermissions:AllowedERC725YDataKeys:<controller>`
    AllowedDataKeys(Address),
    /// Inside the `AddressPermissions:` namespace but not a known sub-key.
    UnrecognizedPermissionKey,
    /// Default receiver delegate key, or a typed `<typeId>` mapping.
    UniversalReceiverDelegate,
    /// `LSP17Extension:<selector>` mapping.
    Extension,
    /// Ordinary application data.
    Generic,
}

impl KeyCategory {
    /// Whether writing this key touches the permission system itself.
    pub fn is_structural(&self) -> bool {
        !matches!(self, KeyCategory::Generic)
    }
}

#[derive(Clone, Copy)]
enum Tier {
    PermissionsArray,
    AddressPermissions,
    UniversalReceiverDelegate,
    Extension,
}

/// Top-level rules, evaluated in order.
const TIER_RULES: &[(&[u8], Tier)] = &[
    (&PERMISSIONS_ARRAY_PREFIX, Tier::PermissionsArray),
    (&ADDRESS_PERMISSIONS_PREFIX, Tier::AddressPermissions),
    (&UNIVERSAL_RECEIVER_DELEGATE_PREFIX, Tier::UniversalReceiverDelegate),
    (&EXTENSION_PREFIX, Tier::Extension),
];

/// Sub-rules for the `AddressPermissions:` namespace.
const ADDRESS_PERMISSIONS_RULES: &[(&[u8], fn(Address) -> KeyCategory)] = &[
    (&PERMISSIONS_PREFIX, KeyCategory::ControllerPermissions),
    (&ALLOWED_CALLS_PREFIX, KeyCategory::AllowedCalls),
    (&ALLOWED_DATA_KEYS_PREFIX, KeyCategory::AllowedDataKeys),
];

impl DataKey {
    /// Classify this key by its leading bytes.
    pub fn category(&self) -> KeyCategory {
        let tier = TIER_RULES
            .iter()
            .find(|(prefix, _)| self.starts_with(prefix))
            .map(|(_, tier)| *tier);

        match tier {
            Some(Tier::PermissionsArray) => {
                if *self == PERMISSIONS_ARRAY_KEY {
                    KeyCategory::PermissionsArrayLength
                } else {
                    KeyCategory::PermissionsArrayIndex
                }
            }
            Some(Tier::AddressPermissions) => ADDRESS_PERMISSIONS_RULES
                .iter()
                .find(|(prefix, _)| self.starts_with(prefix))
                .map(|(_, make)| make(self.address_suffix()))
                .unwrap_or(KeyCategory::UnrecognizedPermissionKey),
            Some(Tier::UniversalReceiverDelegate) => KeyCategory::UniversalReceiverDelegate,
            Some(Tier::Extension) => KeyCategory::Extension,
            None => KeyCategory::Generic,
        }
    }
}

fn controller_key(prefix: &[u8; 12], controller: &Address) -> DataKey {
    let mut bytes = [0u8; DATA_KEY_LEN];
    bytes[..12].copy_from_slice(prefix);
    bytes[12..].copy_from_slice(controller.as_bytes());
    DataKey(bytes)
}

/// `AddressPermissions:Permissions:<controller>`
pub fn permissions_key(controller: &Address) -> DataKey {
    controller_key(&PERMISSIONS_PREFIX, controller)
}

/// `AddressPermissions:AllowedCalls:<controller>`
pub fn allowed_calls_key(controller: &Address) -> DataKey {
    controller_key(&ALLOWED_CALLS_PREFIX, controller)
}

/// `AddressPermissions:AllowedERC725YDataKeys:<controller>`
pub fn allowed_data_keys_key(controller: &Address) -> DataKey {
    controller_key(&ALLOWED_DATA_KEYS_PREFIX, controller)
}

/// `AddressPermissions[index]`
pub fn permissions_array_index_key(index: u128) -> DataKey {
    let mut bytes = [0u8; DATA_KEY_LEN];
    bytes[..16].copy_from_slice(&PERMISSIONS_ARRAY_PREFIX);
    bytes[16..].copy_from_slice(&index.to_be_bytes());
    DataKey(bytes)
}

/// `LSP1UniversalReceiverDelegate:<typeId>`
///
/// LSP2 mapping: 10-byte prefix, two zero bytes, first 20 bytes of the type id.
pub fn receiver_delegate_key(type_id: &[u8; 32]) -> DataKey {
    let mut bytes = [0u8; DATA_KEY_LEN];
    bytes[..10].copy_from_slice(&UNIVERSAL_RECEIVER_DELEGATE_PREFIX);
    bytes[12..].copy_from_slice(&type_id[..ADDRESS_LEN]);
    DataKey(bytes)
}

/// `LSP17Extension:<selector>`
///
/// LSP2 mapping: 10-byte prefix, two zero bytes, selector, zero padding.
pub fn extension_key(selector: [u8; 4]) -> DataKey {
    let mut bytes = [0u8; DATA_KEY_LEN];
    bytes[..10].copy_from_slice(&EXTENSION_PREFIX);
    bytes[12..16].copy_from_slice(&selector);
    DataKey(bytes)
}
