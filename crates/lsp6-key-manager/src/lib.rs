//! # LSP6 Key Manager
//!
//! The unified API for guarded writes to an ERC725Y data store: controllers
//! hold permission bitfields and allowlists, and every `setData` request is
//! verified against them before it reaches the store.
//!
//! ## Overview
//!
//! - **Data keys**: 32-byte keys whose prefix decides which permission a
//!   write needs
//! - **Permissions**: a bitfield per controller, stored under
//!   `AddressPermissions:Permissions:<controller>`
//! - **Allowlists**: compact arrays of key prefixes restricting generic writes
//! - **Stores**: in-memory or SQLite-backed ERC725Y key/value storage
//!
//! ## Usage
//!
//! ```rust
//! use lsp6_key_manager::{KeyManager, KeyManagerConfig};
//! use lsp6_key_manager::core::{permissions_key, Address, DataKey, Permission};
//! use lsp6_key_manager::store::{DataStoreMut, MemoryStore};
//!
//! let owner = Address::from_bytes([0x0a; 20]);
//! let store = MemoryStore::new();
//! store
//!     .set_data(&permissions_key(&owner), Permission::ALL_PERMISSIONS.as_bytes())
//!     .unwrap();
//!
//! let manager = KeyManager::new(store, KeyManagerConfig::default());
//!
//! // Grant a new controller SETDATA.
//! let controller = Address::from_bytes([0xca; 20]);
//! manager
//!     .set_data(&owner, &permissions_key(&controller), Permission::SETDATA.as_bytes())
//!     .unwrap();
//!
//! // Owner writes an arbitrary key.
//! let key = DataKey::from_bytes([0xa0; 32]);
//! manager.set_data(&owner, &key, b"profile").unwrap();
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `lsp6_key_manager::core` - Keys, permissions, compact arrays
//! - `lsp6_key_manager::store` - Storage abstraction and SQLite
//! - `lsp6_key_manager::perms` - Classification and verification

pub mod error;
pub mod key_manager;

// Re-export component crates
pub use lsp6_core as core;
pub use lsp6_perms as perms;
pub use lsp6_store as store;

// Re-export main types for convenience
pub use error::{KeyManagerError, Result};
pub use key_manager::{KeyManager, KeyManagerConfig};

// Re-export commonly used core types
pub use lsp6_core::{Address, AllowedCall, DataKey, KeyCategory, Permission};
pub use lsp6_perms::VerifyError;
