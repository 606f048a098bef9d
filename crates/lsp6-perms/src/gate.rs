//! Permission gate: does a controller hold the bit a write requires?

use lsp6_core::{Address, Permission};

use crate::error::{Result, VerifyError};

/// Require every bit of `required` to be set in `granted`.
///
/// There is no override here; SUPER_SETDATA is handled by the caller before
/// the allowlist is ever consulted.
pub fn require_permission(
    controller: &Address,
    granted: Permission,
    required: Permission,
) -> Result<()> {
    if granted.has(required) {
        return Ok(());
    }
    tracing::debug!(
        controller = %controller,
        required = %required,
        "controller lacks required permission"
    );
    Err(VerifyError::NotAuthorised {
        controller: *controller,
        required,
    })
}

/// Whether `granted` exempts generic writes from SETDATA and the allowlist.
pub fn has_super_setdata(granted: Permission) -> bool {
    granted.has(Permission::SUPER_SETDATA)
}
