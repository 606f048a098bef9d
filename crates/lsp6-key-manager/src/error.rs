//! Error types for the key manager.

use lsp6_core::{Address, CoreError};
use lsp6_perms::VerifyError;
use lsp6_store::StoreError;
use thiserror::Error;

/// Errors that can occur during key manager operations.
#[derive(Debug, Error)]
pub enum KeyManagerError {
    /// The request was denied by verification.
    #[error("verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A stored value could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] CoreError),

    /// The caller holds no permissions at all.
    #[error("no permissions set for {controller}")]
    NoPermissionsSet { controller: Address },
}

impl KeyManagerError {
    /// The verification denial behind this error, if any.
    pub fn as_verify(&self) -> Option<&VerifyError> {
        match self {
            KeyManagerError::Verify(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for key manager operations.
pub type Result<T> = std::result::Result<T, KeyManagerError>;
