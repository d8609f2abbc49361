//! Content formatting and quality gates applied when a submission is
//! promoted into the public collection.
//!
//! Formatting runs at approval time, not at submission time, so the raw
//! user voice is preserved until a moderator decides. The quality checks
//! run against the cleaned, pre-capitalization text, which makes the whole
//! pass a fixed point: formatting already-formatted content changes
//! nothing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A joke needs at least this many whitespace-delimited words.
pub const MIN_WORDS: usize = 3;

lazy_static! {
    static ref BANG_RUNS: Regex = Regex::new(r"!{2,}").unwrap();
    static ref QUESTION_RUNS: Regex = Regex::new(r"\?{2,}").unwrap();
    static ref DOT_RUNS: Regex = Regex::new(r"\.{3,}").unwrap();
}

/// Common English function words used to tell short jokes from keyboard
/// mashing. Two- and three-word strings containing none of these are
/// treated as gibberish.
const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "i", "you", "it", "my", "your", "we",
    "do", "did", "does", "to", "of", "in", "on", "at", "and", "or", "not", "no", "so", "what",
    "why", "how",
];

/// Rule violations reported by [`format_content`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FormatError {
    #[error("content is empty")]
    EmptyContent,
    #[error("formatted content is too short ({actual} chars, minimum {min})")]
    TooShort { min: usize, actual: usize },
    #[error("formatted content is too long ({actual} chars, maximum {max})")]
    TooLong { max: usize, actual: usize },
    #[error("content looks like low-quality filler: {0}")]
    LowQuality(String),
    #[error("content looks like gibberish")]
    Gibberish,
    #[error("content must contain at least {min} words")]
    TooFewWords { min: usize },
}

/// Result of a formatting pass.
///
/// `formatted` always carries the best-effort transformed text, valid or
/// not, so callers can show the reviewer what would have been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormatOutcome {
    pub formatted: String,
    pub errors: Vec<FormatError>,
}

impl FormatOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Normalizes raw submission text into display form and collects every
/// quality violation.
///
/// Transformation order: trim and collapse whitespace, collapse `!`/`?`
/// runs to a single character and 3+ dots to exactly `...`, capitalize the
/// first character, append a final `.` unless the text already ends in
/// `.`, `!` or `?`. Length bounds are `[min_len, max_len]` in characters,
/// checked on the formatted text. Violations accumulate; none of them
/// short-circuits except empty input.
pub fn format_content(raw: &str, min_len: usize, max_len: usize) -> FormatOutcome {
    let collapsed = raw.trim().split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return FormatOutcome {
            formatted: String::new(),
            errors: vec![FormatError::EmptyContent],
        };
    }

    let cleaned = BANG_RUNS.replace_all(&collapsed, "!");
    let cleaned = QUESTION_RUNS.replace_all(&cleaned, "?");
    let cleaned = DOT_RUNS.replace_all(&cleaned, "...").into_owned();

    let mut formatted = capitalize_first(&cleaned);
    if !formatted.ends_with(['.', '!', '?']) {
        formatted.push('.');
    }

    let mut errors = Vec::new();

    let len = formatted.chars().count();
    if len < min_len {
        errors.push(FormatError::TooShort {
            min: min_len,
            actual: len,
        });
    }
    if len > max_len {
        errors.push(FormatError::TooLong {
            max: max_len,
            actual: len,
        });
    }

    check_degenerate(&cleaned, &mut errors);

    if looks_like_gibberish(&cleaned) {
        errors.push(FormatError::Gibberish);
    }

    if cleaned.split_whitespace().count() < MIN_WORDS {
        errors.push(FormatError::TooFewWords { min: MIN_WORDS });
    }

    FormatOutcome { formatted, errors }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Degenerate shapes nobody would want on a new tab: pure punctuation, one
/// key held down, unpunctuated lowercase mumbling, shouting, digit strings.
fn check_degenerate(text: &str, errors: &mut Vec<FormatError>) {
    if !text.chars().any(char::is_alphanumeric) {
        errors.push(FormatError::LowQuality("no letters or digits".to_string()));
        return;
    }

    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        if text.chars().count() >= 11 && chars.all(|c| c == first) {
            errors.push(FormatError::LowQuality(
                "a single repeated character".to_string(),
            ));
        }
    }

    if text.chars().all(|c| c.is_ascii_lowercase() || c == ' ') {
        errors.push(FormatError::LowQuality(
            "no punctuation or capitalization".to_string(),
        ));
    }

    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if !letters.is_empty() && letters.iter().all(|c| c.is_uppercase()) {
        errors.push(FormatError::LowQuality("all uppercase".to_string()));
    }

    if text.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        errors.push(FormatError::LowQuality("digits only".to_string()));
    }
}

fn looks_like_gibberish(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if !(2..=3).contains(&words.len()) {
        return false;
    }
    if !words
        .iter()
        .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
    {
        return false;
    }
    !words.iter().any(|w| FUNCTION_WORDS.contains(w))
}
