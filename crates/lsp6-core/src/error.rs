//! Error types for the LSP6 core primitives.

use thiserror::Error;

/// Errors from parsing keys, addresses, permissions and compact arrays.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("compact array truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("compact array entry of {0} bytes does not fit a 2-byte length prefix")]
    EntryTooLong(usize),

    #[error("invalid allowed call entry: expected 28 bytes, got {0}")]
    InvalidAllowedCall(usize),

    #[error("unknown permission name: {0}")]
    UnknownPermission(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
