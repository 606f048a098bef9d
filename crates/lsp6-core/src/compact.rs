//! Compact byte arrays.
//!
//! A compact array is a concatenation of entries, each preceded by its
//! length as a 2-byte big-endian integer:
//!
//! ```text
//! [ len0 (2) | entry0 (len0) | len1 (2) | entry1 (len1) | ... ]
//! ```
//!
//! Allowlists stored under `AllowedCalls` and `AllowedERC725YDataKeys` use
//! this encoding. A well-formed array is consumed exactly: no truncated
//! length, no truncated entry, no trailing bytes.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::{Address, DATA_KEY_LEN};

/// Size of the length prefix in front of every entry.
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Size of an encoded allowed call: standard (4) + address (20) + selector (4).
pub const ALLOWED_CALL_LEN: usize = 28;

/// Largest allowed data key entry (an exact 32-byte key).
pub const MAX_DATA_KEY_ENTRY_LEN: usize = DATA_KEY_LEN;

/// Bounds-checked reader over a compact array.
///
/// Iterating yields each entry in order. The iterator stops after the first
/// error, so a malformed tail is reported once and never read past.
#[derive(Debug, Clone)]
pub struct CompactCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> CompactCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            failed: false,
        }
    }

    /// Current read position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Read the next 2-byte big-endian length prefix.
    pub fn read_length(&mut self) -> Result<u16> {
        let raw = self.take(LENGTH_PREFIX_LEN)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }

    /// Read the next `len` bytes.
    pub fn read_entry(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.bytes.len() - self.offset;
        if len > available {
            return Err(CoreError::Truncated {
                offset: self.offset,
                needed: len,
                available,
            });
        }
        let out = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }
}

impl<'a> Iterator for CompactCursor<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_exhausted() {
            return None;
        }
        let entry = self
            .read_length()
            .and_then(|len| self.read_entry(len as usize));
        if entry.is_err() {
            self.failed = true;
        }
        Some(entry)
    }
}

/// Encode entries as a compact array.
pub fn encode_compact_array<I, E>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = E>,
    E: AsRef<[u8]>,
{
    let mut buf = Vec::new();
    for entry in entries {
        let entry = entry.as_ref();
        let len = u16::try_from(entry.len()).map_err(|_| CoreError::EntryTooLong(entry.len()))?;
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(entry);
    }
    Ok(buf)
}

/// Decode a compact array into its entries.
pub fn decode_compact_array(bytes: &[u8]) -> Result<Vec<&[u8]>> {
    CompactCursor::new(bytes).collect()
}

/// Whether `bytes` is a well-formed compact array of 28-byte allowed calls.
///
/// The empty array is valid.
pub fn is_valid_allowed_calls(bytes: &[u8]) -> bool {
    CompactCursor::new(bytes).all(|entry| matches!(entry, Ok(e) if e.len() == ALLOWED_CALL_LEN))
}

/// Whether `bytes` is a well-formed compact array of data key prefixes.
///
/// Every entry must be 1 to 32 bytes long. The empty array is valid.
pub fn is_valid_allowed_data_keys(bytes: &[u8]) -> bool {
    CompactCursor::new(bytes).all(|entry| {
        matches!(entry, Ok(e) if !e.is_empty() && e.len() <= MAX_DATA_KEY_ENTRY_LEN)
    })
}

/// One entry of an `AllowedCalls` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowedCall {
    /// Interface id the target must support (`0xffffffff` for any).
    pub standard: [u8; 4],
    /// Target contract (`0xffff…ff` for any).
    pub address: Address,
    /// Function selector (`0xffffffff` for any).
    pub selector: [u8; 4],
}

impl AllowedCall {
    pub fn new(standard: [u8; 4], address: Address, selector: [u8; 4]) -> Self {
        Self {
            standard,
            address,
            selector,
        }
    }

    /// Packed 28-byte encoding.
    pub fn encode(&self) -> [u8; ALLOWED_CALL_LEN] {
        let mut out = [0u8; ALLOWED_CALL_LEN];
        out[..4].copy_from_slice(&self.standard);
        out[4..24].copy_from_slice(self.address.as_bytes());
        out[24..].copy_from_slice(&self.selector);
        out
    }

    /// Decode a packed 28-byte entry.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ALLOWED_CALL_LEN {
            return Err(CoreError::InvalidAllowedCall(bytes.len()));
        }
        let mut standard = [0u8; 4];
        let mut selector = [0u8; 4];
        standard.copy_from_slice(&bytes[..4]);
        selector.copy_from_slice(&bytes[24..]);
        Ok(Self {
            standard,
            address: Address::try_from(&bytes[4..24])?,
            selector,
        })
    }
}

/// Encode a list of allowed calls as a compact array.
pub fn encode_allowed_calls(calls: &[AllowedCall]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(calls.len() * (LENGTH_PREFIX_LEN + ALLOWED_CALL_LEN));
    for call in calls {
        buf.extend_from_slice(&(ALLOWED_CALL_LEN as u16).to_be_bytes());
        buf.extend_from_slice(&call.encode());
    }
    buf
}

/// Decode a compact array of allowed calls.
pub fn decode_allowed_calls(bytes: &[u8]) -> Result<Vec<AllowedCall>> {
    CompactCursor::new(bytes)
        .map(|entry| entry.and_then(AllowedCall::decode))
        .collect()
}

/// Mask whose first `len` bytes are `0xff` and the rest zero.
///
/// `len` is clamped to 32.
pub fn prefix_mask(len: usize) -> [u8; DATA_KEY_LEN] {
    let mut mask = [0u8; DATA_KEY_LEN];
    let len = len.min(DATA_KEY_LEN);
    mask[..len].fill(0xff);
    mask
}

/// Place an entry in the high-order bytes of a 32-byte word.
///
/// Bytes beyond the 32nd are ignored.
pub fn right_pad(entry: &[u8]) -> [u8; DATA_KEY_LEN] {
    let mut word = [0u8; DATA_KEY_LEN];
    let len = entry.len().min(DATA_KEY_LEN);
    word[..len].copy_from_slice(&entry[..len]);
    word
}
