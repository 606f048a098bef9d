//! Allowlist matching over compact arrays of data key prefixes.
//!
//! An allowed entry of length `L` grants every key that shares its first `L`
//! bytes: the key and the entry are both masked to their leading `L` bytes
//! and compared. A 32-byte entry is an exact match.
//!
//! Entries are parsed lazily while walking the list, so a malformed entry is
//! only reported if matching actually reaches it.

use bytes::Bytes;
use lsp6_core::{prefix_mask, right_pad, Address, CompactCursor, DataKey, DATA_KEY_LEN};

use crate::error::{Result, VerifyError};

/// One parsed allowlist entry: the mask and the masked allowed word.
#[derive(Debug, Clone, Copy)]
struct AllowedPrefix {
    mask: [u8; DATA_KEY_LEN],
    word: DataKey,
}

impl AllowedPrefix {
    fn new(entry: &[u8]) -> Self {
        let mask = prefix_mask(entry.len());
        Self {
            mask,
            word: DataKey::from_bytes(right_pad(entry)).masked(&mask),
        }
    }

    fn matches(&self, key: &DataKey) -> bool {
        key.masked(&self.mask) == self.word
    }
}

/// Walks an allowlist one entry at a time.
struct AllowedEntries<'a> {
    raw: &'a [u8],
    cursor: CompactCursor<'a>,
}

impl<'a> AllowedEntries<'a> {
    fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            cursor: CompactCursor::new(raw),
        }
    }

    fn invalid(&self) -> VerifyError {
        VerifyError::InvalidEncodedAllowedERC725YDataKeys {
            value: Bytes::copy_from_slice(self.raw),
        }
    }

    /// Next entry, `None` once the list is consumed.
    fn next_prefix(&mut self) -> Option<Result<AllowedPrefix>> {
        if self.cursor.is_exhausted() {
            return None;
        }
        let entry = match self.cursor.next()? {
            Ok(entry) => entry,
            Err(_) => return Some(Err(self.invalid())),
        };
        if entry.is_empty() || entry.len() > DATA_KEY_LEN {
            return Some(Err(self.invalid()));
        }
        Some(Ok(AllowedPrefix::new(entry)))
    }
}

/// Verify a single generic key against a controller's allowlist.
pub fn match_single(controller: &Address, allowed: &[u8], key: &DataKey) -> Result<()> {
    if allowed.is_empty() {
        return Err(VerifyError::NoKeysAllowed {
            controller: *controller,
        });
    }

    let mut entries = AllowedEntries::new(allowed);
    while let Some(prefix) = entries.next_prefix() {
        if prefix?.matches(key) {
            tracing::debug!(controller = %controller, key = %key, "data key allowed");
            return Ok(());
        }
    }

    Err(VerifyError::NotAllowedKey {
        controller: *controller,
        key: *key,
    })
}

/// Verify several generic keys against a controller's allowlist.
///
/// Stops walking the allowlist as soon as every key is covered. If the list
/// runs out first, the error names the first uncovered key in input order.
pub fn match_batch(controller: &Address, allowed: &[u8], keys: &[DataKey]) -> Result<()> {
    if keys.is_empty() {
        return Ok(());
    }
    if allowed.is_empty() {
        return Err(VerifyError::NoKeysAllowed {
            controller: *controller,
        });
    }

    let mut satisfied = vec![false; keys.len()];
    let mut remaining = keys.len();

    let mut entries = AllowedEntries::new(allowed);
    while let Some(prefix) = entries.next_prefix() {
        let prefix = prefix?;
        for (key, done) in keys.iter().zip(satisfied.iter_mut()) {
            if !*done && prefix.matches(key) {
                *done = true;
                remaining -= 1;
            }
        }
        if remaining == 0 {
            tracing::debug!(controller = %controller, count = keys.len(), "all data keys allowed");
            return Ok(());
        }
    }

    let first_unmatched = keys
        .iter()
        .zip(&satisfied)
        .find(|(_, done)| !**done)
        .map(|(key, _)| *key)
        .unwrap_or(keys[0]);

    Err(VerifyError::NotAllowedKey {
        controller: *controller,
        key: first_unmatched,
    })
}
