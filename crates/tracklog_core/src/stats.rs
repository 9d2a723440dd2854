//! Aggregation over a record collection.
//!
//! # Responsibility
//! - Summarize count, total duration and dominant tag.
//! - Bucket durations per calendar day for trend presentation.
//!
//! # Invariants
//! - Tag ties resolve to the first-encountered tag in collection order.
//! - Trend bucket `i` holds the total for the day `i` days before the
//!   reference day; bucket 0 is the reference day itself.
//! - Dates that pass shape validation but do not exist on the calendar
//!   (e.g. `2024-02-30`) are skipped by the trend rather than guessed.

use crate::model::record::Record;
use chrono::NaiveDate;

/// Summary statistics over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of records.
    pub count: usize,
    /// Sum of all durations.
    pub total_duration: f64,
    /// Most frequent tag; `None` is the empty-collection sentinel.
    pub top_tag: Option<String>,
}

/// Computes count, duration total and the dominant tag.
pub fn summarize(records: &[Record]) -> Summary {
    let total_duration = records.iter().map(|r| r.duration).sum();

    // Counted in first-encounter order so ties resolve deterministically.
    let mut tag_counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match tag_counts.iter_mut().find(|(tag, _)| *tag == record.tag) {
            Some(entry) => entry.1 += 1,
            None => tag_counts.push((&record.tag, 1)),
        }
    }

    let mut top: Option<(&str, usize)> = None;
    for &(tag, count) in &tag_counts {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((tag, count));
        }
    }

    Summary {
        count: records.len(),
        total_duration,
        top_tag: top.map(|(tag, _)| tag.to_string()),
    }
}

/// Buckets total duration per calendar day over the trailing window.
///
/// Bucket `i` = total duration dated `i` days before `reference` (newest
/// first). Records outside the window, or with dates that do not parse as
/// real calendar days, are excluded. Time of day plays no role.
pub fn trend(records: &[Record], reference: NaiveDate, window_days: usize) -> Vec<f64> {
    let mut buckets = vec![0.0; window_days];
    for record in records {
        let Ok(day) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
            continue;
        };
        let offset = (reference - day).num_days();
        if offset >= 0 && (offset as usize) < window_days {
            buckets[offset as usize] += record.duration;
        }
    }
    buckets
}

/// Remaining budget against a configured cap; negative means overage.
pub fn remaining_budget(cap: f64, total_duration: f64) -> f64 {
    cap - total_duration
}
