//! Key manager over SQLite, and configuration loading.

use bytes::Bytes;
use lsp6_key_manager::core::{allowed_data_keys_key, encode_compact_array, permissions_key};
use lsp6_key_manager::store::{DataStore, DataStoreMut, SqliteStore};
use lsp6_key_manager::{Address, DataKey, KeyManager, KeyManagerConfig, KeyManagerError, Permission};

fn owner() -> Address {
    Address::from_bytes([0x0a; 20])
}

fn seeded_store(path: &std::path::Path) -> SqliteStore {
    let store = SqliteStore::open(path).unwrap();
    store
        .set_data(&permissions_key(&owner()), Permission::SETDATA.as_bytes())
        .unwrap();
    let allowlist = encode_compact_array([vec![0xa0u8]]).unwrap();
    store
        .set_data(&allowed_data_keys_key(&owner()), &allowlist)
        .unwrap();
    store
}

#[test]
fn writes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let key = DataKey::from_bytes([0xa0; 32]);

    {
        let km = KeyManager::new(seeded_store(&path), KeyManagerConfig::default());
        km.set_data(&owner(), &key, b"persisted").unwrap();
    }

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.get_data(&key).unwrap().as_ref(), b"persisted");

    let km = KeyManager::new(reopened, KeyManagerConfig::default());
    assert_eq!(km.permissions_of(&owner()).unwrap(), Permission::SETDATA);
}

#[test]
fn denied_batch_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let km = KeyManager::new(seeded_store(&path), KeyManagerConfig::default());

    let allowed = DataKey::from_bytes([0xa0; 32]);
    let denied = DataKey::from_bytes([0xb0; 32]);
    let result = km.set_data_batch(
        &owner(),
        &[allowed, denied],
        &[Bytes::from_static(b"1"), Bytes::from_static(b"2")],
    );

    assert!(matches!(result, Err(KeyManagerError::Verify(_))));
    assert!(km.store().get_data(&allowed).unwrap().is_empty());
}

#[test]
fn config_from_json() {
    let config: KeyManagerConfig =
        serde_json::from_str(r#"{ "verify_only": true, "trace_decisions": true }"#).unwrap();
    assert!(config.verify_only);
    assert!(config.trace_decisions);

    // Missing fields take their defaults.
    let partial: KeyManagerConfig = serde_json::from_str(r#"{ "verify_only": true }"#).unwrap();
    assert!(!partial.trace_decisions);

    let json = serde_json::to_string(&KeyManagerConfig::default()).unwrap();
    let recovered: KeyManagerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, KeyManagerConfig::default());
}

#[test]
fn verify_only_config_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let config: KeyManagerConfig = serde_json::from_str(r#"{ "verify_only": true }"#).unwrap();
    let km = KeyManager::new(seeded_store(&dir.path().join("store.db")), config);

    let key = DataKey::from_bytes([0xa0; 32]);
    km.set_data(&owner(), &key, b"dry run").unwrap();
    assert!(km.store().get_data(&key).unwrap().is_empty());
}

#[test]
fn stored_permissions_render_as_hex() {
    let store = SqliteStore::open_memory().unwrap();
    let granted = Permission::SETDATA | Permission::CALL;
    store
        .set_data(&permissions_key(&owner()), granted.as_bytes())
        .unwrap();

    let stored = store.get_data(&permissions_key(&owner())).unwrap();
    assert_eq!(hex::encode(&stored[29..]), "040800");
}
