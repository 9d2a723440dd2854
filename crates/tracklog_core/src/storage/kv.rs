//! SQLite key-value storage backend.
//!
//! # Responsibility
//! - Persist the record collection and settings as JSON documents in the
//!   `kv` table, one document per key.
//!
//! # Invariants
//! - Keys are versioned (`tracklog:data:v1`); a payload shape change means a
//!   new key, not silent reinterpretation.
//! - Undecodable stored JSON is treated as absent, with a warning event.

use super::{Storage, StorageResult};
use crate::model::record::Record;
use crate::model::settings::Settings;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;

const RECORDS_KEY: &str = "tracklog:data:v1";
const SETTINGS_KEY: &str = "tracklog:settings:v1";

/// Key-value storage over an open SQLite connection.
///
/// The connection must come from [`crate::db::open_db`] or
/// [`crate::db::open_db_in_memory`] so the schema is in place.
pub struct SqliteKvStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                // Corrupt payloads degrade to absence; the session starts
                // from defaults instead of failing to open.
                warn!("event=kv_read module=storage status=corrupt key={key} error={err}");
                Ok(None)
            }
        }
    }

    fn write_key(&self, key: &str, payload: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }
}

impl Storage for SqliteKvStorage<'_> {
    fn load_records(&self) -> StorageResult<Option<Vec<Record>>> {
        self.read_key(RECORDS_KEY)
    }

    fn save_records(&self, records: &[Record]) -> StorageResult<()> {
        let payload = serde_json::to_string(records)?;
        self.write_key(RECORDS_KEY, &payload)
    }

    fn load_settings(&self) -> StorageResult<Settings> {
        Ok(self.read_key(SETTINGS_KEY)?.unwrap_or_default())
    }

    fn save_settings(&self, settings: &Settings) -> StorageResult<()> {
        let payload = serde_json::to_string(settings)?;
        self.write_key(SETTINGS_KEY, &payload)
    }
}
