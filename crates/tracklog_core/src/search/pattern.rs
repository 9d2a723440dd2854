//! Regex compilation, record filtering and safe highlighting.
//!
//! # Responsibility
//! - Turn search-as-you-type input into an optional matcher.
//! - Apply a matcher across record fields.
//! - Fuse match marking and markup escaping into one pass.
//!
//! # Invariants
//! - Empty or unparsable expressions yield `None` (fail open, no filter),
//!   because incomplete expressions are normal while the user is typing.
//! - `highlight` escapes every character outside the fixed marker tags; raw
//!   `& < > " '` from record content never reaches the output.
//! - Zero-width matches advance by one character, never looping.

use crate::model::record::Record;
use regex::{Regex, RegexBuilder};

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Compiles a user expression into a matcher.
///
/// Returns `None` for empty input or syntax errors; callers treat `None` as
/// "no filter applied".
pub fn compile_pattern(expression: &str, case_insensitive: bool) -> Option<Regex> {
    if expression.is_empty() {
        return None;
    }
    RegexBuilder::new(expression)
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// Returns whether the matcher hits any searchable field of a record.
///
/// Searchable fields: title, tag, notes and the duration text form.
pub fn record_matches(record: &Record, matcher: &Regex) -> bool {
    matcher.is_match(&record.title)
        || matcher.is_match(&record.tag)
        || matcher.is_match(&record.notes)
        || matcher.is_match(&record.duration_text())
}

/// Filters records down to those the matcher hits.
///
/// A `None` matcher passes everything through unchanged.
pub fn filter_records<'a>(records: &'a [Record], matcher: Option<&Regex>) -> Vec<&'a Record> {
    match matcher {
        None => records.iter().collect(),
        Some(re) => records.iter().filter(|r| record_matches(r, re)).collect(),
    }
}

/// Escapes text for embedding in a markup context.
///
/// The five characters `& < > " '` become their entity equivalents; all other
/// characters pass through untouched.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Produces markup-safe text with every match wrapped in `<mark>` tags.
///
/// Walks the text left to right applying the matcher globally. Escaping and
/// marking happen in the same pass, so unescaped record text never reaches
/// the output, including the stretches between matches. With no matcher the
/// text is escaped as a whole.
pub fn highlight(text: &str, matcher: Option<&Regex>) -> String {
    let Some(re) = matcher else {
        return escape_markup(text);
    };

    let mut out = String::with_capacity(text.len() + MARK_OPEN.len() + MARK_CLOSE.len());
    let mut emitted = 0;
    let mut search_at = 0;

    while search_at <= text.len() {
        let Some(hit) = re.find_at(text, search_at) else {
            break;
        };
        out.push_str(&escape_markup(&text[emitted..hit.start()]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_markup(hit.as_str()));
        out.push_str(MARK_CLOSE);
        emitted = hit.end();

        if hit.is_empty() {
            // Zero-width match: step over one character so the scan makes
            // progress; the skipped character lands in the next escaped gap.
            match text[hit.end()..].chars().next() {
                Some(ch) => search_at = hit.end() + ch.len_utf8(),
                None => break,
            }
        } else {
            search_at = hit.end();
        }
    }

    out.push_str(&escape_markup(&text[emitted..]));
    out
}

#[cfg(test)]
mod tests {
    use super::{compile_pattern, escape_markup, highlight};

    #[test]
    fn empty_and_invalid_expressions_compile_to_none() {
        assert!(compile_pattern("", true).is_none());
        assert!(compile_pattern("(unclosed", true).is_none());
    }

    #[test]
    fn escape_covers_all_five_markup_characters() {
        assert_eq!(
            escape_markup(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn highlight_marks_every_occurrence() {
        let re = compile_pattern("ab", false).unwrap();
        assert_eq!(
            highlight("ab-ab", Some(&re)),
            "<mark>ab</mark>-<mark>ab</mark>"
        );
    }

    #[test]
    fn highlight_escapes_inside_and_outside_marks() {
        let re = compile_pattern("<b>", false).unwrap();
        assert_eq!(
            highlight("x<b>y", Some(&re)),
            "x<mark>&lt;b&gt;</mark>y"
        );
    }

    #[test]
    fn zero_width_match_terminates_and_keeps_text() {
        let re = compile_pattern("z*", false).unwrap();
        let marked = highlight("bb", Some(&re));
        assert_eq!(
            marked,
            "<mark></mark>b<mark></mark>b<mark></mark>"
        );
    }

    #[test]
    fn no_matcher_still_escapes() {
        assert_eq!(highlight("a<b", None), "a&lt;b");
    }
}
