//! Wrapping extracted clozes in synthesized outer clozes.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::cloze::{cloze, cloze_hint};
use crate::extract::Extraction;
use crate::note::{ExemptPolicy, Field};

/// How many matches of a span are wrapped per occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMode {
    /// Wrap the first match in the owning field.
    #[default]
    First,
    /// Wrap every match in the owning field.
    All,
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReplaceMode::First => "first",
            ReplaceMode::All => "all",
        })
    }
}

impl FromStr for ReplaceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(ReplaceMode::First),
            "all" => Ok(ReplaceMode::All),
            other => Err(format!("unknown replace mode '{other}', expected 'first' or 'all'")),
        }
    }
}

/// Wrap the occurrences of every combination member in a new cloze.
///
/// The combination at position `p` becomes index `p + extraction.len() + 1`.
/// Each distinct `(normalized span, field)` pair of a member label is wrapped
/// once per combination, reattaching the span's hint when it has a non-empty
/// one. Exempt fields are never written.
pub fn rewrite(
    fields: &mut [Field],
    extraction: &Extraction,
    combinations: &[Vec<String>],
    mode: ReplaceMode,
    exempt: &ExemptPolicy,
) {
    let existing = extraction.len();

    for (position, combination) in combinations.iter().enumerate() {
        let index = (position + existing + 1) as u64;

        for label in combination {
            let spans: IndexSet<(&str, usize)> = extraction
                .occurrences(label)
                .iter()
                .map(|occ| (occ.normalized.as_str(), occ.field))
                .collect();

            for (span, field_index) in spans {
                let Some(field) = fields.get_mut(field_index) else {
                    continue;
                };
                if exempt.is_exempt(&field.name) {
                    continue;
                }

                let replacement = match extraction.hint_for(span) {
                    Some(hint) if !hint.is_empty() => cloze_hint(index, span, hint),
                    _ => cloze(index, span),
                };

                field.value = match mode {
                    ReplaceMode::First => field.value.replacen(span, &replacement, 1),
                    ReplaceMode::All => field.value.replace(span, &replacement),
                };
            }
        }
    }
}
