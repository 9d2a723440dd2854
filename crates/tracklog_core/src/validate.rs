//! Record admissibility rules.
//!
//! # Responsibility
//! - Normalize titles and decide whether a candidate record is admissible.
//! - Collect every field violation instead of short-circuiting.
//!
//! # Invariants
//! - Validation is a pure function of its input.
//! - Patterns are anchored `^...$`; callers must not relax them.
//! - Date checking is shape-only: `2024-02-30` passes here by design and the
//!   trend layer simply skips dates that do not exist on the calendar.

use crate::model::record::RecordCandidate;
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S(?:.*\S)?$").expect("valid title regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9]\d*)(\.\d{1,2})?$").expect("valid duration regex"));
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Collapses internal whitespace runs to single spaces and trims the ends.
///
/// Idempotent: normalizing an already-normalized title is a no-op.
pub fn normalize_title(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw, " ").trim().to_string()
}

/// Returns whether `text` contains the same word twice in a row
/// (case-insensitive), separated only by whitespace.
///
/// Equivalent to the backreference pattern `\b(\w+)\s+\1\b`; the regex crate
/// has no backreferences, so this scans `\w+` tokens and checks that the gap
/// between two equal neighbors is pure whitespace.
pub fn has_adjacent_duplicate_word(text: &str) -> bool {
    let mut previous: Option<(usize, &str)> = None;
    for hit in WORD_RE.find_iter(text) {
        if let Some((prev_end, prev_word)) = previous {
            let gap = &text[prev_end..hit.start()];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && prev_word.to_lowercase() == hit.as_str().to_lowercase()
            {
                return true;
            }
        }
        previous = Some((hit.end(), hit.as_str()));
    }
    false
}

/// Checks one candidate against every field rule.
///
/// Returns human-readable violations; an empty list means the candidate is
/// admissible. Callers must treat any non-empty result as a rejection of the
/// whole record.
pub fn validate_record(candidate: &RecordCandidate) -> Vec<String> {
    let record = &candidate.record;
    let mut errors = Vec::new();

    // Re-checks the normalized title against the boundary-whitespace shape,
    // so a broken normalization step cannot smuggle in bad titles.
    if !TITLE_RE.is_match(&record.title) {
        errors.push("Title must be non-empty with no leading or trailing spaces.".to_string());
    }
    if has_adjacent_duplicate_word(&record.title) {
        errors.push("Title has duplicate adjacent words.".to_string());
    }
    if !DATE_RE.is_match(&record.date) {
        errors.push("Date must be YYYY-MM-DD.".to_string());
    }
    if !DURATION_RE.is_match(&candidate.duration_text) {
        errors.push("Duration must be a non-negative number with up to 2 decimals.".to_string());
    }
    if !TAG_RE.is_match(&record.tag) {
        errors.push("Tag must be letters separated by single spaces or hyphens.".to_string());
    }

    errors
}
