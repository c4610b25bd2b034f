//! Note-level transforms.
//!
//! A [`Transformer`] applies one [`Transform`] to all fields of a note and
//! returns the new field values. It never mutates its input: callers compare
//! the result with the original to find which fields changed.
//!
//! # Example
//!
//! ```
//! use clozenest::{Field, Transform, Transformer};
//!
//! let transformer = Transformer::default();
//! let fields = vec![
//!     Field::new("Text", "{{c1::{{c7::Paris}}}} is in {{c2::France}}"),
//!     Field::new("Image Occlusion", "{{c9::shape}}"),
//! ];
//!
//! let values = transformer.apply(Transform::Consistent, &fields).unwrap();
//! assert_eq!(values[0], "{{c3::{{c1::Paris}}}} is in {{c3::{{c2::France}}}}");
//! assert_eq!(values[1], "{{c9::shape}}");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combine::generate_combinations;
use crate::error::Result;
use crate::extract::extract;
use crate::hints::remove_redundant_hints;
use crate::normalize::{clip_above, collapse, drop_duplicates};
use crate::note::{ExemptPolicy, Field};
use crate::rewrite::{ReplaceMode, rewrite};

/// A transform that can be applied to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    /// Collapse every field, then synthesize wrapper clozes.
    Consistent,
    /// Collapse nested chains to their base index.
    Collapse,
    /// Drop openers that repeat their parent's index.
    Dedupe,
    /// Drop the markup of clozes above the clip index.
    Clip,
    /// Drop hints that repeat an innermost answer.
    Hints,
    /// Synthesize wrapper clozes without collapsing first.
    Generate,
}

impl Transform {
    /// Every transform, in display order.
    pub const ALL: [Transform; 6] = [
        Transform::Consistent,
        Transform::Collapse,
        Transform::Dedupe,
        Transform::Clip,
        Transform::Hints,
        Transform::Generate,
    ];

    /// The kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Transform::Consistent => "consistent",
            Transform::Collapse => "collapse",
            Transform::Dedupe => "dedupe",
            Transform::Clip => "clip",
            Transform::Hints => "hints",
            Transform::Generate => "generate",
        }
    }

    /// Whether the transform synthesizes new clozes across fields.
    pub fn generates(self) -> bool {
        matches!(self, Transform::Consistent | Transform::Generate)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown transform name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transform '{0}', expected one of: consistent, collapse, dedupe, clip, hints, generate")]
pub struct UnknownTransform(pub String);

impl FromStr for Transform {
    type Err = UnknownTransform;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Transform::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTransform(s.to_string()))
    }
}

/// Tunables shared by all transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Largest base index whose markup survives collapsing.
    pub base_index_threshold: u64,
    /// Largest index whose markup survives clipping.
    pub clip_max: u64,
    /// Budget on existing plus synthesized clozes.
    pub combo_limit: usize,
    /// How wrapped spans are replaced.
    pub replace: ReplaceMode,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            base_index_threshold: 5,
            clip_max: 9,
            combo_limit: 8,
            replace: ReplaceMode::First,
        }
    }
}

/// Applies transforms to notes.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    config: TransformConfig,
    exempt: ExemptPolicy,
}

impl Transformer {
    /// Create a transformer.
    pub fn new(config: TransformConfig, exempt: ExemptPolicy) -> Self {
        Self { config, exempt }
    }

    /// The active configuration.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The active exemption policy.
    pub fn exempt(&self) -> &ExemptPolicy {
        &self.exempt
    }

    /// Apply `transform` to the fields of one note.
    ///
    /// Returns the new value of every field, in order. Exempt fields come back
    /// unchanged. An error means nothing about the note should be written.
    pub fn apply(&self, transform: Transform, fields: &[Field]) -> Result<Vec<String>> {
        self.run(transform, fields, &self.exempt)
    }

    /// Apply `transform` to a single text. Exemption does not apply.
    pub fn apply_text(&self, transform: Transform, text: &str) -> Result<String> {
        let field = Field::new("", text);
        let mut values = self.run(transform, std::slice::from_ref(&field), &ExemptPolicy::none())?;
        Ok(values.pop().unwrap_or_default())
    }

    fn run(
        &self,
        transform: Transform,
        fields: &[Field],
        exempt: &ExemptPolicy,
    ) -> Result<Vec<String>> {
        let mut working = fields.to_vec();

        for field in working.iter_mut().filter(|f| !exempt.is_exempt(&f.name)) {
            field.value = match transform {
                Transform::Consistent | Transform::Collapse => {
                    collapse(&field.value, self.config.base_index_threshold)
                }
                Transform::Dedupe => drop_duplicates(&field.value),
                Transform::Clip => clip_above(&field.value, self.config.clip_max),
                Transform::Hints => remove_redundant_hints(&field.value)?,
                Transform::Generate => continue,
            };
        }

        if transform.generates() {
            self.wrap_combinations(&mut working, exempt)?;
        }

        Ok(working.into_iter().map(|f| f.value).collect())
    }

    fn wrap_combinations(&self, fields: &mut [Field], exempt: &ExemptPolicy) -> Result<()> {
        let extraction = extract(
            fields
                .iter()
                .enumerate()
                .filter(|(_, f)| !exempt.is_exempt(&f.name))
                .map(|(i, f)| (i, f.value.as_str())),
        )?;

        let keys: Vec<String> = extraction.labels().map(str::to_string).collect();
        let combinations = generate_combinations(&keys, self.config.combo_limit);
        rewrite(
            fields,
            &extraction,
            &combinations,
            self.config.replace,
            exempt,
        );
        Ok(())
    }
}
