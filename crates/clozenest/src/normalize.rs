//! Markup normalizers built on the shared bracket matcher.
//!
//! Each normalizer is a [`Policy`] plus a convenience function:
//!
//! | function | effect |
//! |---|---|
//! | [`collapse`] | nested chains collapse to their smallest index; chains above a threshold lose all markup |
//! | [`drop_duplicates`] | `{{c7::{{c7::x}}}}` becomes `{{c7::x}}` |
//! | [`clip_above`] | clozes with an index above a cutoff lose their markup, keeping content and hint text |
//! | [`strip_markup`] | every matched opener/closer is removed, content untouched |
//!
//! ```
//! use clozenest::normalize::collapse;
//!
//! assert_eq!(collapse("{{c1::{{c5::{{c6::{{c7::finite}}}}}}}}", 5), "{{c1::finite}}");
//! assert_eq!(collapse("{{c6::x}}", 5), "x");
//! ```

use std::borrow::Cow;

use crate::cloze::opener;
use crate::matcher::{Frame, Policy, evaluate};

/// Collapse nested clozes to their base (smallest) index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseToBase {
    /// Largest base index whose markup is kept.
    pub threshold: u64,
}

impl Policy for CollapseToBase {
    fn open(&self, index: u64, parent: Option<&Frame>) -> Frame {
        let base = parent.map_or(index, |p| p.base.min(index));
        Frame {
            index,
            base,
            write: base <= self.threshold && index == base,
        }
    }

    fn opener_text<'a>(&self, frame: &Frame, _raw: &'a str) -> Cow<'a, str> {
        Cow::Owned(opener(frame.base))
    }
}

/// Drop an opener that repeats the index of the cloze directly enclosing it.
///
/// Only a written parent counts: in a chain of three equal openers the middle
/// one is dropped and the innermost is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropDuplicate;

impl Policy for DropDuplicate {
    fn open(&self, index: u64, parent: Option<&Frame>) -> Frame {
        Frame {
            index,
            base: index,
            write: parent.is_none_or(|p| !(p.write && p.index == index)),
        }
    }

    fn close_suppressed(&self, _out: &mut String, _run_start: usize) {}
}

/// Remove the markup of clozes whose own index exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipAbove {
    /// Largest index whose markup is kept.
    pub max: u64,
}

impl Policy for ClipAbove {
    fn open(&self, index: u64, _parent: Option<&Frame>) -> Frame {
        Frame {
            index,
            base: index,
            write: index <= self.max,
        }
    }

    fn close_suppressed(&self, _out: &mut String, _run_start: usize) {}
}

/// Remove all matched markup, keeping every character of content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripMarkup;

impl Policy for StripMarkup {
    fn open(&self, index: u64, _parent: Option<&Frame>) -> Frame {
        Frame {
            index,
            base: index,
            write: false,
        }
    }

    fn close_suppressed(&self, _out: &mut String, _run_start: usize) {}
}

/// Collapse every nesting chain to its base index.
///
/// Only the opener whose index equals the chain's minimum keeps its markup,
/// rewritten to that minimum; the other levels lose their markup and any
/// trailing hints, but keep their text. When the minimum exceeds `threshold`
/// the whole chain degrades to plain text. Applying it twice changes nothing.
///
/// Removing markup can join stray braces on either side into a new opener or
/// closer, so the evaluation repeats until the text stops changing. Every pass
/// that changes the text also shortens it.
pub fn collapse(text: &str, threshold: u64) -> String {
    let policy = CollapseToBase { threshold };
    let mut current = evaluate(text, &policy);
    loop {
        let next = evaluate(&current, &policy);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Remove openers that repeat the index of their enclosing cloze.
///
/// The matching closer goes with the opener; text and hints are untouched.
/// A single pass: `{{c7::{{c7::{{c7::x}}}}}}` becomes `{{c7::{{c7::x}}}}`.
pub fn drop_duplicates(text: &str) -> String {
    evaluate(text, &DropDuplicate)
}

/// Remove the markup of clozes with an index above `max`.
///
/// Content and hint text of the removed clozes stay in place verbatim.
pub fn clip_above(text: &str, max: u64) -> String {
    evaluate(text, &ClipAbove { max })
}

/// Remove every matched opener and closer.
///
/// Stray closers are content and are kept. Two texts that differ only in cloze
/// markup strip to the same string.
pub fn strip_markup(text: &str) -> String {
    evaluate(text, &StripMarkup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_threshold_boundary() {
        assert_eq!(collapse("{{c5::x}}", 5), "{{c5::x}}");
        assert_eq!(collapse("{{c6::x}}", 5), "x");
        assert_eq!(collapse("{{c9::x}}", 9), "{{c9::x}}");
        assert_eq!(collapse("{{c10::x}}", 9), "x");
    }

    #[test]
    fn test_collapse_nested_chain() {
        assert_eq!(
            collapse("{{c1::{{c5::{{c6::{{c7::finite}}}}}}}}", 5),
            "{{c1::finite}}"
        );
    }

    #[test]
    fn test_collapse_drops_hints_of_removed_levels() {
        assert_eq!(collapse("{{c10::Hello::outer}}", 9), "Hello");
        assert_eq!(
            collapse("{{c2::{{c7::nested::h}}::outer}}", 9),
            "{{c2::nested::outer}}"
        );
    }

    #[test]
    fn test_collapse_keeps_hint_of_written_level() {
        assert_eq!(
            collapse("{{c3::{{c3::stuff::h1::h2}}}}", 9),
            "{{c3::{{c3::stuff::h1::h2}}}}"
        );
        assert_eq!(collapse("{{c2::Paris::city}}", 5), "{{c2::Paris::city}}");
    }

    #[test]
    fn test_collapse_smaller_inner_index_survives() {
        assert_eq!(collapse("{{c2::{{c1::x}}}}", 5), "{{c2::{{c1::x}}}}");
        assert_eq!(collapse("{{c7::a {{c1::b}}}}", 5), "a {{c1::b}}");
    }

    #[test]
    fn test_collapse_canonicalizes_digits() {
        assert_eq!(collapse("{{c03::x}}", 5), "{{c3::x}}");
    }

    #[test]
    fn test_collapse_keeps_stray_closers() {
        assert_eq!(collapse("}}abc", 5), "}}abc");
        assert_eq!(collapse("{{c8::a}} b}}", 5), "a b}}");
    }

    #[test]
    fn test_collapse_settles_when_braces_join() {
        let once = collapse("{{{c7::}}{c9::x}}", 5);
        assert_eq!(once, "x");
        assert_eq!(collapse(&once, 5), once);
    }

    #[test]
    fn test_collapse_guard_for_colon_hints() {
        assert_eq!(collapse("{{c8::text::h1:extra}}", 5), "text::h1:extra");
    }

    #[test]
    fn test_drop_duplicates() {
        assert_eq!(drop_duplicates("{{c7::{{c7::some text}}}}"), "{{c7::some text}}");
        assert_eq!(
            drop_duplicates("{{c7::{{c7::{{c7::x::h}}}}}}"),
            "{{c7::{{c7::x::h}}}}"
        );
        assert_eq!(
            drop_duplicates("{{c7::{{c7::{{c7::{{c7::x}}}}}}}}"),
            "{{c7::{{c7::x}}}}"
        );

        let huge = "{{c99999999999999999998::{{c99999999999999999999::x}}}}";
        assert_eq!(drop_duplicates(huge), huge);
        assert_eq!(
            drop_duplicates("{{c7::{{c3::{{c7::x}}}}}}"),
            "{{c7::{{c3::{{c7::x}}}}}}"
        );
        assert_eq!(drop_duplicates("{{c1::a}}}}"), "{{c1::a}}}}");
    }

    #[test]
    fn test_clip_above() {
        assert_eq!(clip_above("{{c10::Some Text}}", 9), "Some Text");
        assert_eq!(clip_above("{{c5::Keep Me}}", 9), "{{c5::Keep Me}}");
        assert_eq!(clip_above("{{c12::a::hint}}", 9), "a::hint");
        assert_eq!(
            clip_above("{{c12::a {{c2::b}}}} c", 9),
            "a {{c2::b}} c"
        );
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("{{c10::Hello}}"), "Hello");
        assert_eq!(
            strip_markup("Nested {{c5::abc {{c2::def}} ghi}}"),
            "Nested abc def ghi"
        );
        assert_eq!(strip_markup("}}abc"), "}}abc");
        assert_eq!(strip_markup("{{c1::Paris::capital}}"), "Paris::capital");
    }
}
