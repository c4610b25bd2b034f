//! Flat cloze extraction.
//!
//! The extractor reads every top-level cloze of each field with the
//! single-level grammar and groups the occurrences by index label, in the order
//! labels are first seen. A top-level cloze that contains another cloze cannot
//! be read this way and fails the whole extraction with
//! [`Error::MalformedCloze`].
//!
//! ```
//! use clozenest::extract::extract;
//!
//! let extraction = extract([(0, "{{c2::Paris::city}} and {{c1::Rome}}")]).unwrap();
//! assert_eq!(extraction.labels().collect::<Vec<_>>(), vec!["2", "1"]);
//! assert_eq!(extraction.hint_for("{{c2::Paris::city}}"), Some("city"));
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::syntax::{Cloze, Node, parse};

/// One top-level cloze found in a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClozeOccurrence {
    /// Position of the owning field within the note.
    pub field: usize,
    /// The index digits as written.
    pub label: String,
    /// The cloze exactly as written.
    pub raw: String,
    /// The text the rewriter searches for and wraps.
    ///
    /// Equal to `raw` when there is no hint. With a hint, lone `}` characters
    /// are dropped from the hint, so a hint containing one yields text that no
    /// longer occurs in the field.
    pub normalized: String,
    /// The hint with lone `}` characters dropped, if a separator was present.
    pub hint: Option<String>,
}

/// Occurrences grouped by label, plus the hint seen for each normalized span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    by_label: IndexMap<String, Vec<ClozeOccurrence>>,
    hints: HashMap<String, String>,
}

impl Extraction {
    /// Labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_label.keys().map(String::as_str)
    }

    /// All occurrences of `label`, in document order.
    pub fn occurrences(&self, label: &str) -> &[ClozeOccurrence] {
        self.by_label.get(label).map_or(&[], Vec::as_slice)
    }

    /// The hint last recorded for a normalized span. Empty when the span had
    /// no hint.
    pub fn hint_for(&self, normalized: &str) -> Option<&str> {
        self.hints.get(normalized).map(String::as_str)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Whether no cloze was found.
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    fn push(&mut self, occurrence: ClozeOccurrence) {
        self.hints.insert(
            occurrence.normalized.clone(),
            occurrence.hint.clone().unwrap_or_default(),
        );
        self.by_label
            .entry(occurrence.label.clone())
            .or_default()
            .push(occurrence);
    }
}

/// Extract the top-level clozes of `(field position, text)` pairs.
///
/// Exempt fields must be left out by the caller.
pub fn extract<'a, I>(fields: I) -> Result<Extraction>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut extraction = Extraction::default();

    for (field, text) in fields {
        for node in parse(text) {
            if let Node::Cloze(cloze) = node {
                extraction.push(occurrence(field, &cloze)?);
            }
        }
    }

    Ok(extraction)
}

fn occurrence(field: usize, cloze: &Cloze<'_>) -> Result<ClozeOccurrence> {
    if cloze.contains_nested() {
        return Err(Error::MalformedCloze {
            field,
            span: cloze.raw.to_string(),
        });
    }

    let hint = cloze.hint_text().map(|h| h.replace('}', ""));
    let normalized = match &hint {
        Some(hint) => format!(
            "{{{{c{}::{}::{}}}}}",
            cloze.label,
            cloze.question_text(),
            hint
        ),
        None => cloze.raw.to_string(),
    };

    Ok(ClozeOccurrence {
        field,
        label: cloze.label.to_string(),
        raw: cloze.raw.to_string(),
        normalized,
        hint,
    })
}
