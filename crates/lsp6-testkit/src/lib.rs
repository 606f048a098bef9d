//! # LSP6 Testkit
//!
//! Testing utilities for the LSP6 crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Key vectors**: Builder outputs pinned to their deployed byte layout
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Controllers seeded into a memory store
//!
//! ## Key Vectors
//!
//! ```rust
//! use lsp6_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hex}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lsp6_testkit::generators::{allowlist, generic_data_key};
//!
//! proptest! {
//!     #[test]
//!     fn super_setdata_writes_anything(key in generic_data_key()) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use lsp6_core::Permission;
//! use lsp6_testkit::fixtures::ControllerFixture;
//!
//! let fixture = ControllerFixture::new(0xca);
//! fixture.grant(Permission::SETDATA).allow_keys(&[vec![0xa0u8]]);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_controller_fixtures, ControllerFixture};
pub use generators::GenericBatch;
pub use vectors::{all_vectors, permission_vectors, verify_all_vectors, KeyVector, PermissionVector};
