//! Parsing helpers for label text extracted from the UI.
//!
//! Every helper returns `Option`: `None` means the expected token was not
//! present in the text at all, which is a different statement from a genuine
//! zero. Callers must not collapse the two.

use std::sync::OnceLock;

use regex::Regex;

fn count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\d,]+").expect("valid count regex"))
}

fn level_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"N\d+").expect("valid level regex"))
}

fn filter_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d+)\)").expect("valid filter count regex"))
}

/// First run of digits and thousands separators in `text`
/// (e.g. `"Канжи 1,234 за месяц"` → `"1,234"`).
#[must_use]
pub fn extract_count(text: &str) -> Option<String> {
    count_re()
        .find(text)
        .map(|m| m.as_str().to_string())
        .filter(|s| s.chars().any(|c| c.is_ascii_digit()))
}

/// JLPT level token (`N` followed by digits), e.g. `"N5"`
#[must_use]
pub fn extract_level(text: &str) -> Option<String> {
    level_re().find(text).map(|m| m.as_str().to_string())
}

/// Parenthesized integer suffix of a filter label (`"Все (12)"` → `12`).
///
/// `None` means the label carries no count suffix; `Some(0)` is a literal
/// `(0)`.
#[must_use]
pub fn extract_filter_count(text: &str) -> Option<u32> {
    filter_count_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
