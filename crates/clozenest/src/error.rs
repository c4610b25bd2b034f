//! Error types for clozenest.
//!
//! The tokenizer, the bracket matcher and every normalizer built on it never
//! fail: malformed markup degrades to literal text. Only the two views that need
//! a well-formed tree can reject input:
//!
//! - [`Error::MalformedCloze`]: the flat extractor found a cloze it cannot read
//!   as a single level (it contains another cloze).
//! - [`Error::NestedMarkerInInnermost`]: the hint normalizer found a cloze marker
//!   inside text it had classified as an innermost question.
//!
//! Callers processing a collection treat either error as "skip this note".
//!
//! # Example
//!
//! ```
//! use clozenest::{Error, Transform, Transformer};
//!
//! let transformer = Transformer::default();
//! match transformer.apply_text(Transform::Consistent, "{{c2::{{c1::nested}}}}") {
//!     Ok(text) => println!("{text}"),
//!     Err(Error::MalformedCloze { span, .. }) => eprintln!("cannot flatten {span}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Errors raised by the tree-based views of cloze markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A cloze could not be read with the single-level grammar.
    ///
    /// Raised by the extractor when a top-level cloze contains a nested cloze in
    /// its question or hint.
    #[error("malformed cloze in field {field}: {span}")]
    MalformedCloze {
        /// Position of the field within the note.
        field: usize,
        /// The offending cloze exactly as written.
        span: String,
    },

    /// An innermost question still contains a cloze marker.
    #[error("nested cloze marker found in innermost cloze question: '{question}'")]
    NestedMarkerInInnermost {
        /// The trimmed question text.
        question: String,
    },
}

/// A specialized Result type for cloze transforms.
pub type Result<T> = std::result::Result<T, Error>;
