//! Note fields and the field exemption policy.

use serde::{Deserialize, Serialize};

/// Default reserved substring: image occlusion fields hold shape markup that
/// must never be renumbered.
pub const DEFAULT_EXEMPT_SUBSTRING: &str = "Occlusion";

/// A named field of a note, in note-type order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The field name.
    pub name: String,
    /// The field value (HTML with cloze markup).
    pub value: String,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decides which fields are never transformed.
///
/// A field is exempt when its name contains any of the configured substrings
/// (case-sensitive).
///
/// ```
/// use clozenest::ExemptPolicy;
///
/// let policy = ExemptPolicy::default();
/// assert!(policy.is_exempt("Image Occlusion"));
/// assert!(!policy.is_exempt("occlusion"));
/// assert!(!policy.is_exempt("Text"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExemptPolicy {
    /// Reserved substrings.
    pub substrings: Vec<String>,
}

impl ExemptPolicy {
    /// Exempt fields whose names contain any of `substrings`.
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            substrings: substrings.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that exempts nothing.
    pub fn none() -> Self {
        Self {
            substrings: Vec::new(),
        }
    }

    /// Whether a field with this name must be left alone.
    pub fn is_exempt(&self, field_name: &str) -> bool {
        self.substrings
            .iter()
            .any(|s| !s.is_empty() && field_name.contains(s.as_str()))
    }

    /// Whether any of `fields` is exempt.
    pub fn any_exempt(&self, fields: &[Field]) -> bool {
        fields.iter().any(|f| self.is_exempt(&f.name))
    }
}

impl Default for ExemptPolicy {
    fn default() -> Self {
        Self::new([DEFAULT_EXEMPT_SUBSTRING])
    }
}
