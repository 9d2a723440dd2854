//! Persistence collaborator contracts.
//!
//! # Responsibility
//! - Define the durability seam the record store writes through.
//! - Isolate storage medium details from session orchestration.
//!
//! # Invariants
//! - Corrupt or missing persisted payloads degrade to absence/defaults,
//!   never to a propagated parse error.
//! - Transport failures (the medium itself broke) are still surfaced.

use crate::db::DbError;
use crate::model::record::Record;
use crate::model::settings::Settings;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod memory;

pub use kv::SqliteKvStorage;
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error for persistence transport and payload encoding.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode payload: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Durability collaborator invoked synchronously after every successful
/// store mutation.
pub trait Storage {
    /// Loads the persisted collection; `Ok(None)` when absent or corrupt.
    fn load_records(&self) -> StorageResult<Option<Vec<Record>>>;

    /// Persists the full collection, replacing any previous payload.
    fn save_records(&self, records: &[Record]) -> StorageResult<()>;

    /// Loads persisted settings; defaults when absent or corrupt.
    fn load_settings(&self) -> StorageResult<Settings>;

    /// Persists settings, replacing any previous payload.
    fn save_settings(&self, settings: &Settings) -> StorageResult<()>;
}
