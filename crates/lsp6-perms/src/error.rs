//! Error types for setData verification.
//!
//! Every variant is a terminal denial: the whole request (single or batch)
//! is rejected and the variant is surfaced verbatim to the caller.

use bytes::Bytes;
use thiserror::Error;

use lsp6_core::{Address, DataKey, Permission};
use lsp6_store::StoreError;

/// Reasons a setData request is denied.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Key is in the `AddressPermissions:` namespace but is no known sub-key.
    #[error("unrecognized permission key: {key}")]
    UnrecognizedPermissionKey { key: DataKey },

    /// `AddressPermissions[index]` value is neither empty nor an address.
    #[error("value for {key} must be empty or a 20-byte address, got 0x{}", hex::encode(.value))]
    NotAnAddress { key: DataKey, value: Bytes },

    /// `AddressPermissions[]` value is neither empty nor a 16-byte length.
    #[error("array length value must be empty or 16 bytes, got 0x{}", hex::encode(.value))]
    InvalidArrayLengthValue { value: Bytes },

    /// Value written under `AllowedCalls` is not a compact array of 28-byte entries.
    #[error("invalid encoded allowed calls: 0x{}", hex::encode(.value))]
    InvalidEncodedAllowedCalls { value: Bytes },

    /// Allowed data keys list is not a compact array of 1..=32 byte entries.
    #[error("invalid encoded allowed ERC725Y data keys: 0x{}", hex::encode(.value))]
    InvalidEncodedAllowedERC725YDataKeys { value: Bytes },

    /// Controller has an empty allowlist and attempted a generic write.
    #[error("no ERC725Y data keys allowed for {controller}")]
    NoKeysAllowed { controller: Address },

    /// Key is not covered by any entry of the controller's allowlist.
    #[error("{controller} is not allowed to set data key {key}")]
    NotAllowedKey { controller: Address, key: DataKey },

    /// Controller lacks the permission required for the write.
    #[error("{controller} is not authorised for {required}")]
    NotAuthorised {
        controller: Address,
        required: Permission,
    },

    /// Batch request with differently sized key and value lists.
    #[error("keys/values length mismatch: {keys} keys, {values} values")]
    KeysValuesLengthMismatch { keys: usize, values: usize },

    /// Reading current state from the data store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl VerifyError {
    /// Name of the missing permission, for `NotAuthorised` denials.
    pub fn permission_name(&self) -> Option<String> {
        match self {
            VerifyError::NotAuthorised { required, .. } => Some(required.name()),
            _ => None,
        }
    }
}

/// Result type for verification.
pub type Result<T> = std::result::Result<T, VerifyError>;
