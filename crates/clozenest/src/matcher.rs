//! Stack evaluator shared by every markup normalizer.
//!
//! [`evaluate`] walks the token stream once, keeping one [`Frame`] per open
//! cloze. A [`Policy`] decides, per opener, which index the cloze collapses to
//! and whether its markup is written. Everything else is fixed here so that all
//! normalizers agree on it:
//!
//! - literal text is always copied through;
//! - a closer pops the innermost frame and is written only if that frame was;
//! - a closer with nothing open (a stray closer) is always kept as text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::token::{CLOSER, Token, tokenize};

static TRAILING_HINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"::[^:}]+$").unwrap());

/// Evaluation state for one open cloze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The index the opener was written with.
    pub index: u64,
    /// The index this nesting chain collapses to.
    pub base: u64,
    /// Whether the opener and its closer are emitted.
    pub write: bool,
}

/// Per-opener decisions for [`evaluate`].
pub trait Policy {
    /// Build the frame for an opener with `index` nested inside `parent`.
    fn open(&self, index: u64, parent: Option<&Frame>) -> Frame;

    /// Text emitted for a written opener. Defaults to the opener as written.
    fn opener_text<'a>(&self, _frame: &Frame, raw: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(raw)
    }

    /// Called when a frame that was not written closes.
    ///
    /// `out[run_start..]` is the literal text emitted since the previous token.
    /// The default drops trailing `::hint` segments from it so a collapsed cloze
    /// does not leave an orphaned hint behind.
    fn close_suppressed(&self, out: &mut String, run_start: usize) {
        let kept = strip_trailing_hints(&out[run_start..]).len();
        out.truncate(run_start + kept);
    }
}

/// Run `policy` over the markup in `text`.
///
/// Never fails: any input produces deterministic output.
pub fn evaluate<P: Policy + ?Sized>(text: &str, policy: &P) -> String {
    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<Frame> = Vec::new();
    let mut run_start = 0;

    for token in tokenize(text) {
        match token {
            Token::Literal(literal) => {
                out.push_str(literal);
                continue;
            }
            Token::Opener { index, raw } => {
                let frame = policy.open(index, stack.last());
                if frame.write {
                    out.push_str(&policy.opener_text(&frame, raw));
                }
                stack.push(frame);
            }
            Token::Closer => match stack.pop() {
                Some(frame) if frame.write => out.push_str(CLOSER),
                Some(_) => policy.close_suppressed(&mut out, run_start),
                None => out.push_str(CLOSER),
            },
        }
        run_start = out.len();
    }

    out
}

/// Remove every trailing `::hint` segment from `text`.
///
/// A segment is `::` followed by a non-empty run containing neither `:` nor
/// `}` up to the end of the text. Chains such as `::h1::h2` are removed fully;
/// a trailing segment with an inner colon (`::h1:extra`) is left alone.
pub fn strip_trailing_hints(mut text: &str) -> &str {
    while let Some(found) = TRAILING_HINT.find(text) {
        text = &text[..found.start()];
    }
    text
}
