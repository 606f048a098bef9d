//! setData verification: classify, gate, then match the allowlist.
//!
//! Structural writes need exactly the bit the classifier resolved. Generic
//! writes need SETDATA and must be covered by the controller's
//! `AllowedERC725YDataKeys` list, unless the controller holds SUPER_SETDATA.
//!
//! Nothing here writes to the store. A caller may persist the request only
//! after verification returns `Ok`.

use lsp6_core::{allowed_data_keys_key, Address, DataKey, Permission};
use lsp6_store::DataStore;

use crate::classifier::{classify, RequiredPermission};
use crate::error::{Result, VerifyError};
use crate::gate::{has_super_setdata, require_permission};
use crate::matcher::{match_batch, match_single};

/// Verify that `controller`, holding `granted`, may write `value` under `key`.
pub fn verify_set_data<S: DataStore + ?Sized>(
    store: &S,
    controller: &Address,
    granted: Permission,
    key: &DataKey,
    value: &[u8],
) -> Result<()> {
    match classify(store, key, value)? {
        RequiredPermission::Structural(required) => {
            require_permission(controller, granted, required)
        }
        RequiredPermission::SetData => {
            if has_super_setdata(granted) {
                return Ok(());
            }
            require_permission(controller, granted, Permission::SETDATA)?;
            let allowed = store.get_data(&allowed_data_keys_key(controller))?;
            match_single(controller, &allowed, key)
        }
    }
}

/// Verify a batch of writes. `keys` and `values` are parallel.
///
/// Every entry is classified in input order. A missing structural
/// permission fails immediately; generic entries are collected and checked
/// against SETDATA and the allowlist once, after the whole batch has been
/// classified.
pub fn verify_set_data_batch<S, V>(
    store: &S,
    controller: &Address,
    granted: Permission,
    keys: &[DataKey],
    values: &[V],
) -> Result<()>
where
    S: DataStore + ?Sized,
    V: AsRef<[u8]>,
{
    if keys.len() != values.len() {
        return Err(VerifyError::KeysValuesLengthMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }

    let mut generic_keys = Vec::new();
    for (key, value) in keys.iter().zip(values) {
        match classify(store, key, value.as_ref())? {
            RequiredPermission::Structural(required) => {
                require_permission(controller, granted, required)?;
            }
            RequiredPermission::SetData => generic_keys.push(*key),
        }
    }

    if generic_keys.is_empty() || has_super_setdata(granted) {
        return Ok(());
    }

    require_permission(controller, granted, Permission::SETDATA)?;
    let allowed = store.get_data(&allowed_data_keys_key(controller))?;
    match_batch(controller, &allowed, &generic_keys)
}
