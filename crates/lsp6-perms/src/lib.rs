//! # LSP6 Permissions
//!
//! Permission resolution for writes to an ERC725Y data store on behalf of a
//! controller of an LSP6 key manager.
//!
//! ## Overview
//!
//! A write request runs through three stages, in order:
//!
//! 1. **Classifier** ([`classify`]): maps a data key to the permission its
//!    write requires. Structural keys (controller permissions, allowlists,
//!    receiver delegates, extensions) read the current value to choose
//!    between ADD and EDIT/CHANGE.
//! 2. **Gate** ([`require_permission`]): checks the controller's bitfield.
//!    SUPER_SETDATA exempts generic writes from the next stage.
//! 3. **Matcher** ([`match_single`], [`match_batch`]): checks generic keys
//!    against the controller's `AllowedERC725YDataKeys` compact array.
//!
//! [`verify_set_data`] and [`verify_set_data_batch`] chain the three.
//!
//! ## Usage
//!
//! ```rust
//! use lsp6_core::{allowed_data_keys_key, encode_compact_array, Address, DataKey, Permission};
//! use lsp6_perms::verify_set_data;
//! use lsp6_store::{DataStoreMut, MemoryStore};
//!
//! let controller = Address::from_bytes([0xca; 20]);
//! let store = MemoryStore::new();
//!
//! // Allow every key starting with 0xa0.
//! let allowlist = encode_compact_array([[0xa0u8]]).unwrap();
//! store.set_data(&allowed_data_keys_key(&controller), &allowlist).unwrap();
//!
//! let key = DataKey::from_bytes([0xa0; 32]);
//! verify_set_data(&store, &controller, Permission::SETDATA, &key, b"value").unwrap();
//! ```

pub mod classifier;
pub mod error;
pub mod gate;
pub mod matcher;
pub mod verify;

pub use classifier::{
    classify, decode_array_length, decode_stored_array_length, RequiredPermission,
    ARRAY_LENGTH_LEN,
};
pub use error::{Result, VerifyError};
pub use gate::{has_super_setdata, require_permission};
pub use matcher::{match_batch, match_single};
pub use verify::{verify_set_data, verify_set_data_batch};
