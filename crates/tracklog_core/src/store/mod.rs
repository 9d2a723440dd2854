//! Session-owned record store orchestration.
//!
//! # Responsibility
//! - Own one collection + one settings value per session context.
//! - Route every mutation through coercion, validation and write-through
//!   persistence.
//!
//! # Invariants
//! - Rejected mutations leave the collection untouched.
//! - Every accepted mutation synchronously saves through the storage seam.

pub mod record_store;
