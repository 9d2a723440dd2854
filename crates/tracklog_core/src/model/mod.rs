//! Domain model for tracked records and user preferences.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape shared by store, search and aggregation.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - A `Record` held by a store has passed validation at write time.

pub mod record;
pub mod settings;
