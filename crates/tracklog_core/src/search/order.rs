//! List-view ordering of records.

use crate::model::record::Record;
use std::cmp::Ordering;

/// Sort key selected by the presentation layer.
///
/// Date and title compare lexically (dates are `YYYY-MM-DD`, so lexical is
/// chronological); duration compares numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateAsc,
    DateDesc,
    TitleAsc,
    TitleDesc,
    DurationAsc,
    DurationDesc,
}

/// Returns the collection reordered by the given key.
///
/// The sort is stable, so equal keys keep their collection order
/// (newest first).
pub fn sorted_view<'a>(records: &'a [Record], key: SortKey) -> Vec<&'a Record> {
    let mut view: Vec<&Record> = records.iter().collect();
    view.sort_by(|a, b| match key {
        SortKey::DateAsc => a.date.cmp(&b.date),
        SortKey::DateDesc => b.date.cmp(&a.date),
        SortKey::TitleAsc => a.title.cmp(&b.title),
        SortKey::TitleDesc => b.title.cmp(&a.title),
        SortKey::DurationAsc => compare_durations(a, b),
        SortKey::DurationDesc => compare_durations(b, a),
    });
    view
}

fn compare_durations(a: &Record, b: &Record) -> Ordering {
    a.duration.partial_cmp(&b.duration).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::{sorted_view, SortKey};
    use crate::model::record::{Record, RecordId};
    use chrono::Utc;

    fn record(title: &str, date: &str, duration: f64) -> Record {
        let now = Utc::now();
        Record {
            id: RecordId::generate(),
            title: title.to_string(),
            date: date.to_string(),
            duration,
            tag: "study".to_string(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn sorts_by_each_key() {
        let records = vec![
            record("Beta", "2024-01-02", 20.0),
            record("Alpha", "2024-01-03", 10.0),
            record("Gamma", "2024-01-01", 30.0),
        ];

        let by_date: Vec<_> = sorted_view(&records, SortKey::DateAsc)
            .iter()
            .map(|r| r.date.as_str())
            .collect();
        assert_eq!(by_date, ["2024-01-01", "2024-01-02", "2024-01-03"]);

        let by_title: Vec<_> = sorted_view(&records, SortKey::TitleDesc)
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(by_title, ["Gamma", "Beta", "Alpha"]);

        let by_duration: Vec<_> = sorted_view(&records, SortKey::DurationAsc)
            .iter()
            .map(|r| r.duration)
            .collect();
        assert_eq!(by_duration, [10.0, 20.0, 30.0]);
    }
}
