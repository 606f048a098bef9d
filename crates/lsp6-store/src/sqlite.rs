//! SQLite implementation of the store traits.
//!
//! Persistent backend for an ERC725Y data store. Uses rusqlite with bundled
//! SQLite; the connection sits behind a mutex so the store is `Sync`.

use std::path::Path;
use std::sync::Mutex;

use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use lsp6_core::DataKey;

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{DataStore, DataStoreMut};

/// SQLite-based store implementation.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut conn)
    }
}

fn write_entry(conn: &Connection, key: &DataKey, value: &[u8], now: i64) -> Result<()> {
    if value.is_empty() {
        conn.execute(
            "DELETE FROM data WHERE data_key = ?1",
            params![key.as_bytes().as_slice()],
        )?;
    } else {
        conn.execute(
            "INSERT INTO data (data_key, data_value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(data_key) DO UPDATE SET data_value = excluded.data_value,
                                                 updated_at = excluded.updated_at",
            params![key.as_bytes().as_slice(), value, now],
        )?;
    }
    Ok(())
}

impl DataStore for SqliteStore {
    fn get_data(&self, key: &DataKey) -> Result<Bytes> {
        self.with_conn(|conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT data_value FROM data WHERE data_key = ?1",
                    params![key.as_bytes().as_slice()],
                    |row| row.get(0),
                )
                .optional()?;
            tracing::trace!(key = %key, found = value.is_some(), "sqlite store read");
            Ok(value.map(Bytes::from).unwrap_or_default())
        })
    }
}

impl DataStoreMut for SqliteStore {
    fn set_data(&self, key: &DataKey, value: &[u8]) -> Result<()> {
        self.with_conn(|conn| write_entry(conn, key, value, now_millis()))
    }

    /// Writes the whole batch in one transaction.
    fn set_data_batch(&self, keys: &[DataKey], values: &[Bytes]) -> Result<()> {
        if keys.len() != values.len() {
            return Err(StoreError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let now = now_millis();
            for (key, value) in keys.iter().zip(values) {
                write_entry(&tx, key, value, now)?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> DataKey {
        DataKey::from_bytes([b; 32])
    }

    #[test]
    fn test_unset_key_reads_empty() {
        let store = SqliteStore::open_memory().unwrap();
        assert!(store.get_data(&key(1)).unwrap().is_empty());
    }

    #[test]
    fn test_set_overwrite_and_delete() {
        let store = SqliteStore::open_memory().unwrap();

        store.set_data(&key(1), b"first").unwrap();
        store.set_data(&key(1), b"second").unwrap();
        assert_eq!(store.get_data(&key(1)).unwrap(), Bytes::from_static(b"second"));

        store.set_data(&key(1), b"").unwrap();
        assert!(store.get_data(&key(1)).unwrap().is_empty());
    }

    #[test]
    fn test_batch_write() {
        let store = SqliteStore::open_memory().unwrap();
        let keys = [key(1), key(2), key(3)];
        let values = [
            Bytes::from_static(b"a"),
            Bytes::from_static(b"b"),
            Bytes::from_static(b"c"),
        ];
        store.set_data_batch(&keys, &values).unwrap();

        assert_eq!(store.get_data_batch(&keys).unwrap(), values.to_vec());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set_data(&key(7), &[0xde, 0xad]).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get_data(&key(7)).unwrap().as_ref(), &[0xde, 0xad]);
    }
}
