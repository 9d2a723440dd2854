use tracklog_core::{
    compile_pattern, filter_records, highlight, MemoryStorage, RecordDraft, RecordStore,
};

fn seeded_store() -> RecordStore<MemoryStorage> {
    let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
    for (title, date, duration, tag) in [
        ("Algebra problems", "2024-01-01", "30", "study"),
        ("Leg day", "2024-01-01", "45", "gym"),
        ("History notes", "2024-01-02", "20", "study"),
    ] {
        store
            .upsert(RecordDraft {
                title: Some(title.to_string()),
                date: Some(date.to_string()),
                duration: Some(duration.into()),
                tag: Some(tag.to_string()),
                ..RecordDraft::default()
            })
            .unwrap();
    }
    store
}

#[test]
fn anchored_case_insensitive_pattern_filters_by_tag() {
    let store = seeded_store();
    let matcher = compile_pattern("^stu", true).unwrap();
    let hits = filter_records(store.records(), Some(&matcher));
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|r| r.tag == "study"));
}

#[test]
fn pattern_matches_duration_text_form() {
    let store = seeded_store();
    let matcher = compile_pattern("^45$", false).unwrap();
    let hits = filter_records(store.records(), Some(&matcher));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].tag, "gym");
}

#[test]
fn none_matcher_passes_everything() {
    let store = seeded_store();
    assert_eq!(filter_records(store.records(), None).len(), 3);
}

#[test]
fn invalid_expression_degrades_to_no_filter() {
    assert!(compile_pattern("[unclosed", true).is_none());
    assert!(compile_pattern("", true).is_none());
}

#[test]
fn highlight_wraps_matches_and_escapes_the_rest() {
    let matcher = compile_pattern("notes", true).unwrap();
    let marked = highlight("History <notes> & \"quotes\"", Some(&matcher));
    assert_eq!(
        marked,
        "History &lt;<mark>notes</mark>&gt; &amp; &quot;quotes&quot;"
    );
}

#[test]
fn highlight_never_emits_raw_markup_characters() {
    let hostile = r#"<script>alert('&"><')</script>"#;
    let re = compile_pattern("script", false).unwrap();
    for matcher in [None, Some(&re)] {
        let marked = highlight(hostile, matcher);
        let stripped = marked.replace("<mark>", "").replace("</mark>", "");
        assert!(!stripped.contains('<'), "raw < in {marked:?}");
        assert!(!stripped.contains('>'), "raw > in {marked:?}");
        assert!(!stripped.contains('"'), "raw \" in {marked:?}");
        assert!(!stripped.contains('\''), "raw ' in {marked:?}");
        for (i, _) in stripped.match_indices('&') {
            let rest = &stripped[i..];
            assert!(
                rest.starts_with("&amp;")
                    || rest.starts_with("&lt;")
                    || rest.starts_with("&gt;")
                    || rest.starts_with("&quot;")
                    || rest.starts_with("&#39;"),
                "raw & in {marked:?}"
            );
        }
    }
}

#[test]
fn zero_width_matches_advance_without_looping() {
    let matcher = compile_pattern("x*", false).unwrap();
    let marked = highlight("ab", Some(&matcher));
    assert_eq!(marked, "<mark></mark>a<mark></mark>b<mark></mark>");
}

#[test]
fn repeated_matches_are_all_marked() {
    let matcher = compile_pattern("an", false).unwrap();
    assert_eq!(
        highlight("banana", Some(&matcher)),
        "b<mark>an</mark><mark>an</mark>a"
    );
}
