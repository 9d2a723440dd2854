//! Record domain model and draft coercion.
//!
//! # Responsibility
//! - Define the canonical record entity shared by store/search/stats.
//! - Coerce lenient draft payloads into validation-ready candidates.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - Coercion is explicit and total: one step per field, before validation,
//!   never ambient type juggling.
//! - `created_at` is set once at creation; `updated_at` moves on every
//!   accepted mutation.

use crate::validate::normalize_title;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable opaque identifier for a record.
///
/// Generated ids are UUID v4 strings, but imported collections may carry
/// foreign id schemes, so the inner representation stays opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a fresh globally unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing external id verbatim.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical tracked activity entry.
///
/// Field names serialize camelCase (`createdAt`, `updatedAt`) so exported
/// collections stay importable across app versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable id used for upsert identity and import error reporting.
    pub id: RecordId,
    /// Normalized title: non-empty, single internal spaces, trimmed ends.
    pub title: String,
    /// Calendar date in `YYYY-MM-DD` shape (shape-checked, not calendar-checked).
    pub date: String,
    /// Non-negative duration in the configured units.
    pub duration: f64,
    /// One or more alphabetic words joined by single spaces or hyphens.
    pub tag: String,
    /// Free text, may be empty.
    #[serde(default)]
    pub notes: String,
    /// Set once at first creation, preserved across updates.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every accepted mutation.
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Canonical text form of the duration, as used by validation and search.
    ///
    /// Whole values render without a fractional part (`95`, not `95.0`).
    pub fn duration_text(&self) -> String {
        format_duration(self.duration)
    }
}

/// Renders a numeric duration in its shortest text form.
pub fn format_duration(value: f64) -> String {
    format!("{value}")
}

/// Duration field input: JSON number or text, resolved by one coerce step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Number(f64),
    Text(String),
}

impl From<f64> for DurationInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DurationInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DurationInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Lenient candidate payload for upsert and import paths.
///
/// All fields are optional; defaulting rules differ between the edit form
/// path ([`RecordDraft::coerce_for_upsert`]) and bulk import
/// ([`RecordDraft::coerce_for_import`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub duration: Option<DurationInput>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validation-ready candidate produced by draft coercion.
///
/// Keeps the duration's original text form alongside the numeric value, so
/// validation can reject shapes like `01.5` that numeric coercion would hide.
#[derive(Debug, Clone)]
pub struct RecordCandidate {
    pub record: Record,
    pub duration_text: String,
}

impl RecordDraft {
    /// Coerces an edit-form payload into a candidate.
    ///
    /// # Contract
    /// - Missing tag stays empty and is left for validation to reject.
    /// - `updated_at` is always the supplied `now`.
    pub fn coerce_for_upsert(self, now: DateTime<Utc>) -> RecordCandidate {
        self.coerce(now, "", true)
    }

    /// Coerces a bulk-import element into a candidate.
    ///
    /// # Contract
    /// - Missing tag defaults to `other`.
    /// - Present timestamps are kept; absent ones default to `now`.
    pub fn coerce_for_import(self, now: DateTime<Utc>) -> RecordCandidate {
        self.coerce(now, "other", false)
    }

    fn coerce(self, now: DateTime<Utc>, default_tag: &str, stamp_update: bool) -> RecordCandidate {
        let duration_text = match self.duration {
            Some(DurationInput::Text(text)) => text,
            Some(DurationInput::Number(value)) => format_duration(value),
            None => "0".to_string(),
        };
        // Parse failure leaves 0.0; validation rejects the text form anyway.
        let duration = duration_text.parse::<f64>().unwrap_or(0.0);

        let record = Record {
            id: self.id.unwrap_or_else(RecordId::generate),
            title: normalize_title(self.title.as_deref().unwrap_or("")),
            date: self.date.unwrap_or_default(),
            duration,
            tag: self.tag.unwrap_or_else(|| default_tag.to_string()),
            notes: self.notes.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: if stamp_update {
                now
            } else {
                self.updated_at.unwrap_or(now)
            },
        };

        RecordCandidate {
            record,
            duration_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn upsert_coercion_normalizes_title_and_stamps_update() {
        let draft = RecordDraft {
            title: Some("  Math   HW ".to_string()),
            date: Some("2024-02-01".to_string()),
            duration: Some("45".into()),
            tag: Some("school".to_string()),
            ..RecordDraft::default()
        };
        let candidate = draft.coerce_for_upsert(at_noon());
        assert_eq!(candidate.record.title, "Math HW");
        assert_eq!(candidate.record.notes, "");
        assert_eq!(candidate.record.updated_at, at_noon());
        assert_eq!(candidate.duration_text, "45");
        assert_eq!(candidate.record.duration, 45.0);
    }

    #[test]
    fn import_coercion_defaults_tag_to_other() {
        let candidate = RecordDraft::default().coerce_for_import(at_noon());
        assert_eq!(candidate.record.tag, "other");
        assert_eq!(candidate.duration_text, "0");
    }

    #[test]
    fn numeric_duration_renders_shortest_text() {
        assert_eq!(format_duration(95.0), "95");
        assert_eq!(format_duration(1.5), "1.5");
        assert_eq!(format_duration(0.0), "0");
    }
}
