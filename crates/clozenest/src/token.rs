//! Lossless tokenizer for cloze markup.
//!
//! The markup has exactly two structural forms: the opener `{{c<digits>::` and
//! the closer `}}`. Everything else, including `{{x::`, a lone `}` or an
//! opener whose index does not fit a `u64`, is literal text. Matching is leftmost and non-overlapping, and concatenating the
//! [`Token::surface`] of every token reproduces the input byte for byte.
//!
//! ```
//! use clozenest::token::{tokenize, Token};
//!
//! let tokens: Vec<_> = tokenize("a {{c1::b}}").collect();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Literal("a "),
//!         Token::Opener { index: 1, raw: "{{c1::" },
//!         Token::Literal("b"),
//!         Token::Closer,
//!     ]
//! );
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;

/// The closer surface form.
pub const CLOSER: &str = "}}";

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{c(\d+)::|\}\}").unwrap());

/// A single token of cloze markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `{{c<digits>::`, with the digits read as an index.
    Opener {
        /// The cloze index.
        index: u64,
        /// The opener exactly as written.
        raw: &'a str,
    },
    /// `}}`.
    Closer,
    /// A maximal run of text between structural tokens.
    Literal(&'a str),
}

impl<'a> Token<'a> {
    /// The source text this token was read from.
    pub fn surface(&self) -> &'a str {
        match self {
            Token::Opener { raw, .. } => raw,
            Token::Closer => CLOSER,
            Token::Literal(text) => text,
        }
    }

    /// The digits of an opener as written (`"07"` for `{{c07::`).
    pub fn label(&self) -> Option<&'a str> {
        match self {
            Token::Opener { raw, .. } => Some(opener_label(raw)),
            _ => None,
        }
    }
}

/// Extract the digits from an opener surface form.
pub(crate) fn opener_label(raw: &str) -> &str {
    &raw[3..raw.len() - 2]
}

/// Lazy token iterator returned by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<Token<'a>>,
}

/// Tokenize `text`.
///
/// Never fails. Text without markup yields a single literal; empty text yields
/// nothing.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        pos: 0,
        pending: None,
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.pos >= self.text.len() {
            return None;
        }

        let from = self.pos;
        let mut search = from;
        let (whole, token) = loop {
            let Some(caps) = TOKEN_PATTERN.captures_at(self.text, search) else {
                self.pos = self.text.len();
                return Some(Token::Literal(&self.text[from..]));
            };
            let whole = caps.get(0)?;
            match caps.get(1) {
                Some(digits) => match digits.as_str().parse() {
                    Ok(index) => {
                        let raw = whole.as_str();
                        break (whole, Token::Opener { index, raw });
                    }
                    // Overflowing index: the opener is part of the literal.
                    Err(_) => search = whole.end(),
                },
                None => break (whole, Token::Closer),
            }
        };
        self.pos = whole.end();

        if whole.start() > from {
            self.pending = Some(token);
            Some(Token::Literal(&self.text[from..whole.start()]))
        } else {
            Some(token)
        }
    }
}
