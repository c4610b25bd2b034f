//! Parser and normalizers for nested Anki cloze markup.
//!
//! Cloze deletions (`{{c1::answer}}`, `{{c1::answer::hint}}`) may nest freely
//! and have no escaping, so regex substitution corrupts them. This crate reads
//! the markup with a lossless tokenizer and a single stack evaluator, and
//! builds every transform on top of that:
//!
//! - [`token`]: the tokenizer.
//! - [`matcher`]: the stack evaluator and its per-opener [`matcher::Policy`].
//! - [`normalize`]: collapse to base index, duplicate removal, clipping and
//!   markup stripping.
//! - [`syntax`]: the markup tree used by the extractor and the hint normalizer.
//! - [`hints`]: removal of hints that repeat the answer.
//! - [`extract`], [`combine`], [`rewrite`]: wrapper cloze synthesis.
//! - [`transform`]: note-level transforms over named fields.
//! - [`check`]: markup-only diffing for regression checks.
//!
//! Everything here is pure and synchronous. The tokenizer, the evaluator and
//! the normalizers accept any input.
//!
//! # Quick Start
//!
//! ```
//! use clozenest::{Field, Transform, Transformer};
//! use clozenest::normalize::collapse;
//!
//! assert_eq!(collapse("{{c1::{{c5::{{c6::{{c7::finite}}}}}}}}", 5), "{{c1::finite}}");
//!
//! let transformer = Transformer::default();
//! let fields = vec![Field::new("Text", "{{c1::H}} and {{c2::O}}")];
//! let values = transformer.apply(Transform::Generate, &fields).unwrap();
//! assert_eq!(values[0], "{{c3::{{c1::H}}}} and {{c3::{{c2::O}}}}");
//! ```

mod error;

pub mod check;
pub mod cloze;
pub mod combine;
pub mod extract;
pub mod hints;
pub mod matcher;
pub mod normalize;
pub mod note;
pub mod rewrite;
pub mod syntax;
pub mod token;
pub mod transform;

pub use check::{Comparison, compare};
pub use error::{Error, Result};
pub use note::{ExemptPolicy, Field};
pub use rewrite::ReplaceMode;
pub use transform::{Transform, TransformConfig, Transformer, UnknownTransform};
