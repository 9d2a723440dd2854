//! Record store: validated mutations over one session's collection.
//!
//! # Responsibility
//! - Apply upsert/delete/import/settings mutations with all-or-nothing
//!   semantics.
//! - Produce export payloads and run first-run seeding.
//!
//! # Invariants
//! - Every record in `records` passed validation when it was written.
//! - `id` values are unique; upsert matches existing ids exactly.
//! - New records are prepended (newest first); updates keep their position.
//! - Bulk import replaces the collection atomically or not at all.

use crate::model::record::{Record, RecordDraft, RecordId};
use crate::model::settings::Settings;
use crate::stats::{summarize, Summary};
use crate::storage::{Storage, StorageError};
use crate::validate::validate_record;
use chrono::Utc;
use log::info;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed application name used for export file naming.
pub const APP_NAME: &str = "tracklog";

/// Download name for exported collections: `tracklog-export.json`.
pub fn export_file_name() -> String {
    format!("{APP_NAME}-export.json")
}

/// Error for single-record mutations.
#[derive(Debug)]
pub enum StoreError {
    /// The candidate failed validation; the collection is unchanged.
    Rejected(Vec<String>),
    /// The durability write-through failed.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(errors) => write!(f, "record rejected: {}", errors.join(" | ")),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// One offending import element, keyed by its resulting id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportIssue {
    pub id: RecordId,
    pub errors: Vec<String>,
}

/// Error for bulk import, keeping structural failures distinct from
/// per-record validation failures.
#[derive(Debug)]
pub enum ImportError {
    /// The payload is not a sequential structure at all.
    NotACollection,
    /// The payload did not parse or its elements were not decodable.
    InvalidData(String),
    /// One or more elements failed validation; nothing was applied.
    Rejected(Vec<ImportIssue>),
    /// The durability write-through failed after acceptance.
    Storage(StorageError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACollection => write!(f, "import payload is not a collection"),
            Self::InvalidData(message) => write!(f, "invalid import data: {message}"),
            Self::Rejected(issues) => {
                write!(f, "import rejected: {} invalid record(s)", issues.len())
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for ImportError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Session-owned collection with validated mutations and write-through
/// persistence.
///
/// One store instance is one session context; there are no module-level
/// singletons and no sharing between sessions.
pub struct RecordStore<S: Storage> {
    storage: S,
    records: Vec<Record>,
    settings: Settings,
}

impl<S: Storage> RecordStore<S> {
    /// Opens a session from persisted state.
    ///
    /// Absent or corrupt payloads start the session empty / with default
    /// settings rather than failing.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let records = storage.load_records()?.unwrap_or_default();
        let settings = storage.load_settings()?;
        info!(
            "event=store_open module=store status=ok records={}",
            records.len()
        );
        Ok(Self {
            storage,
            records,
            settings,
        })
    }

    /// The collection, insertion-ordered with newest records first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Finds one record by exact id.
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == *id)
    }

    /// Validates and applies one create-or-update mutation.
    ///
    /// A draft updates an existing record iff its id matches exactly;
    /// otherwise it becomes a new record at the front of the collection.
    /// On update the original `created_at` and position are preserved.
    /// Rejection leaves the collection untouched.
    pub fn upsert(&mut self, draft: RecordDraft) -> Result<Record, StoreError> {
        let mut candidate = draft.coerce_for_upsert(Utc::now());

        let existing_at = self
            .records
            .iter()
            .position(|record| record.id == candidate.record.id);
        if let Some(index) = existing_at {
            candidate.record.created_at = self.records[index].created_at;
        }

        let errors = validate_record(&candidate);
        if !errors.is_empty() {
            info!(
                "event=record_upsert module=store status=rejected errors={}",
                errors.len()
            );
            return Err(StoreError::Rejected(errors));
        }

        let record = candidate.record;
        match existing_at {
            Some(index) => self.records[index] = record.clone(),
            None => self.records.insert(0, record.clone()),
        }
        self.storage.save_records(&self.records)?;
        info!(
            "event=record_upsert module=store status=ok mode={} id={}",
            if existing_at.is_some() {
                "update"
            } else {
                "create"
            },
            record.id
        );
        Ok(record)
    }

    /// Removes the record with the given id.
    ///
    /// Returns whether a record was removed; an absent id is a no-op, not an
    /// error. Saves either way so storage always reflects the collection.
    pub fn delete(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        let before = self.records.len();
        self.records.retain(|record| record.id != *id);
        let removed = self.records.len() != before;
        self.storage.save_records(&self.records)?;
        info!("event=record_delete module=store status=ok removed={removed} id={id}");
        Ok(removed)
    }

    /// Atomically replaces the collection from a parsed import payload.
    ///
    /// Every element is coerced with import defaults and validated; if any
    /// fail, the whole import is rejected with per-record issues and the
    /// current collection stays as it was. Returns the imported count.
    pub fn import_all(&mut self, payload: Value) -> Result<usize, ImportError> {
        let Value::Array(elements) = payload else {
            return Err(ImportError::NotACollection);
        };

        let now = Utc::now();
        let mut incoming = Vec::with_capacity(elements.len());
        let mut issues = Vec::new();

        for element in elements {
            let draft: RecordDraft = serde_json::from_value(element)
                .map_err(|err| ImportError::InvalidData(err.to_string()))?;
            let candidate = draft.coerce_for_import(now);
            let mut errors = validate_record(&candidate);
            if incoming
                .iter()
                .any(|accepted: &Record| accepted.id == candidate.record.id)
            {
                errors.push("Duplicate id in import.".to_string());
            }
            if errors.is_empty() {
                incoming.push(candidate.record);
            } else {
                issues.push(ImportIssue {
                    id: candidate.record.id,
                    errors,
                });
            }
        }

        if !issues.is_empty() {
            info!(
                "event=import module=store status=rejected invalid={} total={}",
                issues.len(),
                incoming.len() + issues.len()
            );
            return Err(ImportError::Rejected(issues));
        }

        self.records = incoming;
        self.storage.save_records(&self.records)?;
        info!(
            "event=import module=store status=ok records={}",
            self.records.len()
        );
        Ok(self.records.len())
    }

    /// Parses raw text and imports it.
    ///
    /// A parse failure is reported as `InvalidData`, distinct from the
    /// per-record validation batch.
    pub fn import_text(&mut self, raw: &str) -> Result<usize, ImportError> {
        let payload: Value =
            serde_json::from_str(raw).map_err(|err| ImportError::InvalidData(err.to_string()))?;
        self.import_all(payload)
    }

    /// Pretty-printed JSON of the full collection, ready for download as
    /// [`export_file_name`].
    pub fn export_json(&self) -> Result<Vec<u8>, StorageError> {
        let payload = serde_json::to_vec_pretty(&self.records)?;
        Ok(payload)
    }

    /// Replaces the session settings and persists them.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), StoreError> {
        self.settings = settings;
        self.storage.save_settings(&self.settings)?;
        info!("event=settings_save module=store status=ok");
        Ok(())
    }

    /// First-run bootstrap: imports the bundled seed only when the session
    /// has no records yet. Returns whether seeding happened.
    pub fn seed_if_empty(&mut self, seed_json: &str) -> Result<bool, ImportError> {
        if !self.records.is_empty() {
            return Ok(false);
        }
        let count = self.import_text(seed_json)?;
        info!("event=seed module=store status=ok records={count}");
        Ok(true)
    }

    /// Summary statistics over the current collection.
    pub fn summary(&self) -> Summary {
        summarize(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::export_file_name;

    #[test]
    fn export_name_follows_app_convention() {
        assert_eq!(export_file_name(), "tracklog-export.json");
    }
}
