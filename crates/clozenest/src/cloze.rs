//! Helpers for writing and numbering cloze deletions.
//!
//! # Example
//!
//! ```
//! use clozenest::cloze::{cloze, cloze_hint, next_index};
//!
//! assert_eq!(cloze(1, "Paris"), "{{c1::Paris}}");
//! assert_eq!(cloze_hint(1, "Paris", "capital city"), "{{c1::Paris::capital city}}");
//!
//! // Numbering continues after the highest index already present in a note.
//! let fields = ["{{c1::Paris}} is in {{c3::France}}", "extra"];
//! assert_eq!(next_index(fields), 4);
//! assert_eq!(cloze(next_index(fields), "Europe"), "{{c4::Europe}}");
//! ```

use crate::token::{Token, tokenize};

/// The opening marker `{{cN::` for `index`.
pub fn opener(index: u64) -> String {
    format!("{{{{c{}::", index)
}

/// Create a cloze deletion with the given index.
pub fn cloze(index: u64, text: &str) -> String {
    format!("{}{}}}}}", opener(index), text)
}

/// Create a cloze deletion with a hint.
///
/// ```
/// use clozenest::cloze::cloze_hint;
///
/// assert_eq!(cloze_hint(2, "1789", "year"), "{{c2::1789::year}}");
/// ```
pub fn cloze_hint(index: u64, text: &str, hint: &str) -> String {
    format!("{}{}::{}}}}}", opener(index), text, hint)
}

/// Whether `text` contains at least one cloze opener.
pub fn contains_cloze(text: &str) -> bool {
    tokenize(text).any(|t| matches!(t, Token::Opener { .. }))
}

/// The highest cloze index used across `texts`, if any opener is present.
pub fn highest_index<I, S>(texts: I) -> Option<u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .filter_map(|text| {
            tokenize(text.as_ref())
                .filter_map(|t| match t {
                    Token::Opener { index, .. } => Some(index),
                    _ => None,
                })
                .max()
        })
        .max()
}

/// The index a new cloze should get: one above the highest index present, and
/// never below 1.
pub fn next_index<I, S>(texts: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    highest_index(texts).map_or(1, |highest| highest.saturating_add(1).max(1))
}
