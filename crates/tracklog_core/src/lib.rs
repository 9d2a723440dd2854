//! Core domain logic for Tracklog, a personal record-tracking tool.
//! This crate is the single source of truth for business invariants:
//! record admissibility, pattern search with safe highlighting, session
//! store semantics and aggregation.

pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod stats;
pub mod storage;
pub mod store;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{DurationInput, Record, RecordCandidate, RecordDraft, RecordId};
pub use model::settings::Settings;
pub use search::order::{sorted_view, SortKey};
pub use search::pattern::{
    compile_pattern, escape_markup, filter_records, highlight, record_matches,
};
pub use stats::{remaining_budget, summarize, trend, Summary};
pub use storage::{MemoryStorage, SqliteKvStorage, Storage, StorageError};
pub use store::record_store::{
    export_file_name, ImportError, ImportIssue, RecordStore, StoreError, APP_NAME,
};
pub use validate::{has_adjacent_duplicate_word, normalize_title, validate_record};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
