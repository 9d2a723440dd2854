//! User-driven pattern search entry points.
//!
//! # Responsibility
//! - Compile user search expressions into matchers.
//! - Filter records and produce markup-safe highlighted output.
//!
//! # Invariants
//! - Invalid expressions degrade to "no filter", never to an error.
//! - Highlighted output never contains unescaped record text.

pub mod order;
pub mod pattern;
