use chrono::Utc;
use tracklog_core::{validate_record, RecordDraft};

fn draft(title: &str, date: &str, duration: &str, tag: &str) -> RecordDraft {
    RecordDraft {
        title: Some(title.to_string()),
        date: Some(date.to_string()),
        duration: Some(duration.into()),
        tag: Some(tag.to_string()),
        ..RecordDraft::default()
    }
}

fn errors_for(title: &str, date: &str, duration: &str, tag: &str) -> Vec<String> {
    let candidate = draft(title, date, duration, tag).coerce_for_upsert(Utc::now());
    validate_record(&candidate)
}

#[test]
fn fully_valid_record_has_no_errors() {
    assert!(errors_for("Math HW", "2024-02-01", "45", "school").is_empty());
}

#[test]
fn single_character_title_is_valid() {
    assert!(errors_for("x", "2024-02-01", "45", "school").is_empty());
}

#[test]
fn valid_duration_shapes_are_accepted() {
    for duration in ["0", "5", "30", "95", "1.5", "0.25", "120.75"] {
        let errors = errors_for("Reading", "2024-02-01", duration, "study");
        assert!(errors.is_empty(), "duration {duration:?} got {errors:?}");
    }
}

#[test]
fn leading_zero_durations_are_rejected() {
    for duration in ["01", "01.5", "007", "00"] {
        let errors = errors_for("Reading", "2024-02-01", duration, "study");
        assert!(
            errors.iter().any(|e| e.contains("Duration")),
            "duration {duration:?} got {errors:?}"
        );
    }
}

#[test]
fn malformed_durations_are_rejected() {
    for duration in ["-5", "1.234", "1.", ".5", "abc", "1,5"] {
        let errors = errors_for("Reading", "2024-02-01", duration, "study");
        assert!(
            errors.iter().any(|e| e.contains("Duration")),
            "duration {duration:?} got {errors:?}"
        );
    }
}

#[test]
fn duplicate_adjacent_words_in_title_are_rejected() {
    let errors = errors_for("gym gym", "2024-02-01", "30", "gym");
    assert!(errors.iter().any(|e| e.contains("duplicate")));
    assert!(errors_for("gym class", "2024-02-01", "30", "gym").is_empty());
}

#[test]
fn title_is_normalized_before_checking() {
    // Raw boundary whitespace is fixed by normalization, not rejected.
    assert!(errors_for(" Math  HW ", "2024-02-01", "45", "school").is_empty());
}

#[test]
fn empty_title_is_rejected() {
    let errors = errors_for("   ", "2024-02-01", "45", "school");
    assert!(errors.iter().any(|e| e.contains("Title")));
}

#[test]
fn date_shape_is_enforced_but_not_calendar_validity() {
    // Feb 30 passes the digit-shape check by design.
    assert!(errors_for("Math HW", "2024-02-30", "45", "school").is_empty());

    for date in ["2024-13-01", "2024-00-10", "2024-01-32", "24-01-01", "2024/01/01", ""] {
        let errors = errors_for("Math HW", date, "45", "school");
        assert!(
            errors.iter().any(|e| e.contains("Date")),
            "date {date:?} got {errors:?}"
        );
    }
}

#[test]
fn tag_allows_single_space_or_hyphen_separators_only() {
    assert!(errors_for("Run", "2024-02-01", "30", "gym").is_empty());
    assert!(errors_for("Run", "2024-02-01", "30", "home work").is_empty());
    assert!(errors_for("Run", "2024-02-01", "30", "self-care").is_empty());

    for tag in ["foo  bar", "foo--bar", "tag1", "a_b", "", " lead", "trail "] {
        let errors = errors_for("Run", "2024-02-01", "30", tag);
        assert!(
            errors.iter().any(|e| e.contains("Tag")),
            "tag {tag:?} got {errors:?}"
        );
    }
}

#[test]
fn all_violations_are_collected_not_short_circuited() {
    let errors = errors_for("the the", "bad", "01", "tag1");
    assert_eq!(errors.len(), 4);
}
