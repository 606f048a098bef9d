//! LSP6 permission bitfields.
//!
//! A controller's permissions are stored as a single 32-byte big-endian
//! bitfield under `AddressPermissions:Permissions:<controller>`. Each named
//! permission is exactly one bit; the values are part of the on-chain wire
//! format and must never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::decode_fixed;

/// A 32-byte permission bitfield.
///
/// Holds either a single named permission or any combination of them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Permission(pub [u8; 32]);

impl Permission {
    pub const NONE: Self = Self::from_u64(0);

    pub const CHANGEOWNER: Self = Self::from_u64(0x01);
    pub const ADDCONTROLLER: Self = Self::from_u64(0x02);
    pub const EDITPERMISSIONS: Self = Self::from_u64(0x04);
    pub const ADDEXTENSIONS: Self = Self::from_u64(0x08);
    pub const CHANGEEXTENSIONS: Self = Self::from_u64(0x10);
    pub const ADDUNIVERSALRECEIVERDELEGATE: Self = Self::from_u64(0x20);
    pub const CHANGEUNIVERSALRECEIVERDELEGATE: Self = Self::from_u64(0x40);
    pub const REENTRANCY: Self = Self::from_u64(0x80);
    pub const SUPER_TRANSFERVALUE: Self = Self::from_u64(0x100);
    pub const TRANSFERVALUE: Self = Self::from_u64(0x200);
    pub const SUPER_CALL: Self = Self::from_u64(0x400);
    pub const CALL: Self = Self::from_u64(0x800);
    pub const SUPER_STATICCALL: Self = Self::from_u64(0x1000);
    pub const STATICCALL: Self = Self::from_u64(0x2000);
    pub const SUPER_DELEGATECALL: Self = Self::from_u64(0x4000);
    pub const DELEGATECALL: Self = Self::from_u64(0x8000);
    pub const DEPLOY: Self = Self::from_u64(0x10000);
    pub const SUPER_SETDATA: Self = Self::from_u64(0x20000);
    pub const SETDATA: Self = Self::from_u64(0x40000);
    pub const ENCRYPT: Self = Self::from_u64(0x80000);
    pub const DECRYPT: Self = Self::from_u64(0x100000);
    pub const SIGN: Self = Self::from_u64(0x200000);

    /// Every named permission except REENTRANCY, SUPER_DELEGATECALL and DELEGATECALL.
    pub const ALL_PERMISSIONS: Self = Self::from_u64(0x3f3f7f);

    /// Build a bitfield whose low 8 bytes hold `value`.
    pub const fn from_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Decode a stored value.
    ///
    /// Values shorter than 32 bytes are right-padded with zeros and longer
    /// values are truncated, matching a `bytes32` cast of the stored bytes.
    pub fn from_stored(value: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        let n = value.len().min(32);
        bytes[..n].copy_from_slice(&value[..n]);
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether no bit is set.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Whether every bit of `required` is set in `self`.
    pub fn has(&self, required: Permission) -> bool {
        (*self & required) == required
    }

    /// Union of a set of permissions.
    pub fn combine<I: IntoIterator<Item = Permission>>(permissions: I) -> Self {
        permissions.into_iter().fold(Self::NONE, |acc, p| acc | p)
    }

    /// Canonical name of a single named permission.
    ///
    /// Combined or unassigned bitfields render as hex.
    pub fn name(&self) -> String {
        NAMED_PERMISSIONS
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| self.to_hex())
    }

    /// Names of every named permission set in this bitfield, lowest bit first.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_set().map(|(_, name)| name).collect()
    }

    /// Named permissions set in this bitfield, lowest bit first.
    pub fn iter_set(&self) -> impl Iterator<Item = (Permission, &'static str)> + '_ {
        NAMED_PERMISSIONS
            .iter()
            .copied()
            .filter(move |(p, _)| self.has(*p))
    }

    /// Look up a permission by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_PERMISSIONS
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(p, _)| *p)
    }

    /// Convert to a `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

const NAMED_PERMISSIONS: &[(Permission, &str)] = &[
    (Permission::CHANGEOWNER, "CHANGEOWNER"),
    (Permission::ADDCONTROLLER, "ADDCONTROLLER"),
    (Permission::EDITPERMISSIONS, "EDITPERMISSIONS"),
    (Permission::ADDEXTENSIONS, "ADDEXTENSIONS"),
    (Permission::CHANGEEXTENSIONS, "CHANGEEXTENSIONS"),
    (Permission::ADDUNIVERSALRECEIVERDELEGATE, "ADDUNIVERSALRECEIVERDELEGATE"),
    (Permission::CHANGEUNIVERSALRECEIVERDELEGATE, "CHANGEUNIVERSALRECEIVERDELEGATE"),
    (Permission::REENTRANCY, "REENTRANCY"),
    (Permission::SUPER_TRANSFERVALUE, "SUPER_TRANSFERVALUE"),
    (Permission::TRANSFERVALUE, "TRANSFERVALUE"),
    (Permission::SUPER_CALL, "SUPER_CALL"),
    (Permission::CALL, "CALL"),
    (Permission::SUPER_STATICCALL, "SUPER_STATICCALL"),
    (Permission::STATICCALL, "STATICCALL"),
    (Permission::SUPER_DELEGATECALL, "SUPER_DELEGATECALL"),
    (Permission::DELEGATECALL, "DELEGATECALL"),
    (Permission::DEPLOY, "DEPLOY"),
    (Permission::SUPER_SETDATA, "SUPER_SETDATA"),
    (Permission::SETDATA, "SETDATA"),
    (Permission::ENCRYPT, "ENCRYPT"),
    (Permission::DECRYPT, "DECRYPT"),
    (Permission::SIGN, "SIGN"),
];

impl BitOr for Permission {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o |= r;
        }
        Self(out)
    }
}

impl BitOrAssign for Permission {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitAnd for Permission {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o &= r;
        }
        Self(out)
    }
}

impl Not for Permission {
    type Output = Self;

    fn not(self) -> Self {
        let mut out = self.0;
        for o in out.iter_mut() {
            *o = !*o;
        }
        Self(out)
    }
}

impl fmt::Debug for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "Permission({})", self.to_hex())
        } else {
            write!(f, "Permission({})", names.join(" | "))
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    /// Accepts either a canonical name (`"SETDATA"`) or a 32-byte hex bitfield.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(p) = Self::from_name(s) {
            return Ok(p);
        }
        if s.starts_with("0x") {
            return decode_fixed(s).map(Self);
        }
        Err(CoreError::UnknownPermission(s.to_string()))
    }
}
