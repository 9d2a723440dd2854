//! In-memory storage backend for tests and ephemeral sessions.

use super::{Storage, StorageResult};
use crate::model::record::Record;
use crate::model::settings::Settings;
use std::cell::RefCell;
use std::rc::Rc;

/// Storage that keeps payloads in process memory.
///
/// Clones share the same underlying cell, so a test can keep a handle and
/// inspect what a store persisted. Single-threaded by design, matching the
/// core concurrency model.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemoryCell>,
}

#[derive(Debug, Default)]
struct MemoryCell {
    records: RefCell<Option<Vec<Record>>>,
    settings: RefCell<Option<Settings>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last persisted collection, if any.
    pub fn persisted_records(&self) -> Option<Vec<Record>> {
        self.inner.records.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load_records(&self) -> StorageResult<Option<Vec<Record>>> {
        Ok(self.inner.records.borrow().clone())
    }

    fn save_records(&self, records: &[Record]) -> StorageResult<()> {
        *self.inner.records.borrow_mut() = Some(records.to_vec());
        Ok(())
    }

    fn load_settings(&self) -> StorageResult<Settings> {
        Ok(self.inner.settings.borrow().clone().unwrap_or_default())
    }

    fn save_settings(&self, settings: &Settings) -> StorageResult<()> {
        *self.inner.settings.borrow_mut() = Some(settings.clone());
        Ok(())
    }
}
