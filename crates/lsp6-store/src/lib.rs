//! # LSP6 Store
//!
//! Storage abstraction for the ERC725Y data store that an LSP6 key manager
//! guards. Verification reads through [`DataStore`]; the key manager writes
//! through [`DataStoreMut`] once a request has been authorised.
//!
//! ## Key Types
//!
//! - [`DataStore`] - Read access (`get_data`)
//! - [`DataStoreMut`] - Write access (`set_data`)
//! - [`MemoryStore`] - In-memory storage for tests and embedding
//! - [`SqliteStore`] - SQLite-based persistent storage
//!
//! ## Usage
//!
//! ```rust
//! use lsp6_core::DataKey;
//! use lsp6_store::{DataStore, DataStoreMut, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let key = DataKey::from_bytes([0xa0; 32]);
//!
//! store.set_data(&key, b"hello").unwrap();
//! assert_eq!(store.get_data(&key).unwrap().as_ref(), b"hello");
//! ```
//!
//! ## Design Notes
//!
//! - **Unset reads as empty**: `get_data` never returns "not found".
//! - **Empty writes delete**: storing an empty value removes the key.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{DataStore, DataStoreMut};
