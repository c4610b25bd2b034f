//! Removal of hints that merely repeat the answer.
//!
//! A hint is dropped when, after trimming, it equals the question of an
//! innermost cloze inside the same cloze (or the whole question when there is
//! no nested cloze). Nested clozes are handled first, so the rule applies at
//! every level.
//!
//! ```
//! use clozenest::hints::remove_redundant_hints;
//!
//! assert_eq!(remove_redundant_hints("{{c2::Paris::Paris}}").unwrap(), "{{c2::Paris}}");
//! assert_eq!(
//!     remove_redundant_hints("{{c2::Paris::capital}}").unwrap(),
//!     "{{c2::Paris::capital}}"
//! );
//! ```

use crate::error::Result;
use crate::syntax::{Cloze, HINT_SEPARATOR, Node, innermost_questions, parse};
use crate::token::CLOSER;

/// Drop every hint that exactly repeats an innermost question.
pub fn remove_redundant_hints(text: &str) -> Result<String> {
    let nodes = parse(text);
    let mut out = String::with_capacity(text.len());
    write_nodes(&nodes, &mut out)?;
    Ok(out)
}

fn write_nodes(nodes: &[Node<'_>], out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Cloze(cloze) => write_cloze(cloze, out)?,
        }
    }
    Ok(())
}

fn write_cloze(cloze: &Cloze<'_>, out: &mut String) -> Result<()> {
    let mut question = String::new();
    write_nodes(&cloze.question, &mut question)?;

    out.push_str("{{c");
    out.push_str(cloze.label);
    out.push_str("::");
    out.push_str(&question);

    if let Some(hint_nodes) = &cloze.hint {
        let mut hint = String::new();
        write_nodes(hint_nodes, &mut hint)?;

        let mut answers = innermost_questions(&cloze.question)?;
        if answers.is_empty() {
            answers.insert(question.trim().to_string());
        }

        if !answers.contains(hint.trim()) {
            out.push_str(HINT_SEPARATOR);
            out.push_str(&hint);
        }
    }

    out.push_str(CLOSER);
    Ok(())
}
