//! # LSP6 Core
//!
//! Pure primitives for verifying writes to an ERC725Y data store on behalf
//! of an LSP6 key manager: data keys, permission bitfields, and the compact
//! array encoding used for allowlists.
//!
//! This crate contains no I/O and no storage. It is pure computation over
//! fixed-width byte words.
//!
//! ## Key Types
//!
//! - [`DataKey`] - A 32-byte ERC725Y key
//! - [`Address`] - A 20-byte controller address
//! - [`Permission`] - A 32-byte permission bitfield
//! - [`KeyCategory`] - Structural tag of a data key
//! - [`CompactCursor`] - Bounds-checked reader over a compact array
//!
//! ## Wire Format
//!
//! Key prefixes in [`keys`] and permission bits in [`Permission`] are part of
//! the on-chain storage layout and interoperate with deployed stores.

pub mod compact;
pub mod error;
pub mod keys;
pub mod permission;
pub mod types;

pub use compact::{
    decode_allowed_calls, decode_compact_array, encode_allowed_calls, encode_compact_array,
    is_valid_allowed_calls, is_valid_allowed_data_keys, prefix_mask, right_pad, AllowedCall,
    CompactCursor, ALLOWED_CALL_LEN, LENGTH_PREFIX_LEN, MAX_DATA_KEY_ENTRY_LEN,
};
pub use error::{CoreError, Result};
pub use keys::{
    allowed_calls_key, allowed_data_keys_key, extension_key, permissions_array_index_key,
    permissions_key, receiver_delegate_key, KeyCategory,
};
pub use permission::Permission;
pub use types::{Address, DataKey, ADDRESS_LEN, DATA_KEY_LEN};
