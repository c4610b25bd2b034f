//! Markup-only diff checker.
//!
//! Compares two versions of a field after removing all cloze markup from both.
//! Transforms are expected to move markup around but never to touch content,
//! so any remaining difference points at a bug.
//!
//! ```
//! use clozenest::check::{compare, Comparison};
//!
//! assert_eq!(compare("{{c1::Paris}}", "{{c2::{{c1::Paris}}}}"), Comparison::MarkupOnly);
//! assert!(!compare("{{c1::Paris}}", "{{c1::Rome}}").is_markup_only());
//! ```

use std::fmt;

use similar::TextDiff;

use crate::normalize::strip_markup;

/// Result of comparing two field versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// The texts differ in cloze markup only.
    MarkupOnly,
    /// The content differs.
    ContentChanged {
        /// Unified diff of the normalized texts.
        diff: String,
    },
}

impl Comparison {
    /// Whether only markup differs.
    pub fn is_markup_only(&self) -> bool {
        matches!(self, Comparison::MarkupOnly)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::MarkupOnly => f.write_str("No difference except for clozes."),
            Comparison::ContentChanged { .. } => {
                f.write_str("Content differs beyond just cloze markup!")
            }
        }
    }
}

/// Compare `before` and `after` ignoring cloze markup.
pub fn compare(before: &str, after: &str) -> Comparison {
    let before = strip_markup(before);
    let after = strip_markup(after);

    if before == after {
        return Comparison::MarkupOnly;
    }

    let diff = TextDiff::from_lines(before.as_str(), after.as_str())
        .unified_diff()
        .missing_newline_hint(false)
        .header("before (normalized)", "after (normalized)")
        .to_string();

    Comparison::ContentChanged { diff }
}
