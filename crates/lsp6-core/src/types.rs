//! Strong type definitions for LSP6 verification.
//!
//! Addresses and data keys are fixed-width newtypes so a 20-byte controller
//! can never be passed where a 32-byte ERC725Y key is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Length of an ERC725Y data key.
pub const DATA_KEY_LEN: usize = 32;

/// Length of an account address.
pub const ADDRESS_LEN: usize = 20;

/// Decode a hex string (with or without `0x`) into a fixed-width array.
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CoreError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(trimmed)?;
    if bytes.len() != N {
        return Err(CoreError::InvalidLength {
            expected: N,
            got: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// A 20-byte account address identifying a controller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Convert to a `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from hex, `0x` prefix optional.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_fixed(s).map(Self)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; ADDRESS_LEN] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            expected: ADDRESS_LEN,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

/// A 32-byte ERC725Y data key.
///
/// The leading bytes of a key carry its structural tag (see
/// [`KeyCategory`](crate::keys::KeyCategory)); everything else is opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataKey(pub [u8; DATA_KEY_LEN]);

impl DataKey {
    /// The all-zero key.
    pub const ZERO: Self = Self([0u8; DATA_KEY_LEN]);

    /// Create a data key from raw bytes.
    pub const fn from_bytes(bytes: [u8; DATA_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DATA_KEY_LEN] {
        &self.0
    }

    /// Build a key from a prefix followed by a suffix, zero-filling the rest.
    ///
    /// Returns `None` if the parts together exceed 32 bytes.
    pub fn from_parts(prefix: &[u8], suffix: &[u8]) -> Option<Self> {
        if prefix.len() + suffix.len() > DATA_KEY_LEN {
            return None;
        }
        let mut bytes = [0u8; DATA_KEY_LEN];
        bytes[..prefix.len()].copy_from_slice(prefix);
        bytes[prefix.len()..prefix.len() + suffix.len()].copy_from_slice(suffix);
        Some(Self(bytes))
    }

    /// Whether the key begins with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }

    /// The trailing 20 bytes, interpreted as an address.
    ///
    /// Meaningful for `<12-byte prefix><address>` keys.
    pub fn address_suffix(&self) -> Address {
        let mut addr = [0u8; ADDRESS_LEN];
        addr.copy_from_slice(&self.0[DATA_KEY_LEN - ADDRESS_LEN..]);
        Address(addr)
    }

    /// Byte-wise AND with a mask.
    pub fn masked(&self, mask: &[u8; DATA_KEY_LEN]) -> Self {
        let mut out = [0u8; DATA_KEY_LEN];
        for (o, (k, m)) in out.iter_mut().zip(self.0.iter().zip(mask.iter())) {
            *o = k & m;
        }
        Self(out)
    }

    /// Convert to a `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from hex, `0x` prefix optional.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_fixed(s).map(Self)
    }
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataKey({})", self.to_hex())
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for DataKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for DataKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DATA_KEY_LEN]> for DataKey {
    fn from(bytes: [u8; DATA_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for DataKey {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DATA_KEY_LEN] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            expected: DATA_KEY_LEN,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}
