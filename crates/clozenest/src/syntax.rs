//! Syntax tree for cloze markup.
//!
//! [`parse`] turns the token stream into a tree of [`Node`]s following the
//! grammar
//!
//! ```text
//! Cloze := "{{c" Digits "::" Question [ "::" Hint ] "}}"
//! ```
//!
//! where the question ends at the first `::` found in text at the cloze's own
//! nesting level, and the hint runs to the closer (further `::` included).
//! Stray closers become text; an opener that is never closed turns the rest of
//! the input, from that opener on, into text. [`render`] gives back the exact
//! input.
//!
//! Two views are derived from the same tree: the flat view used by the
//! extractor (a top-level cloze must not contain another one) and the recursive
//! view used by the hint normalizer (innermost questions).

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::token::{CLOSER, Token, opener_label, tokenize};

/// Separator between question and hint.
pub const HINT_SEPARATOR: &str = "::";

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// Literal text, including stray closers and unclosed tails.
    Text(&'a str),
    /// A closed cloze.
    Cloze(Cloze<'a>),
}

/// A closed cloze with its parsed question and hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cloze<'a> {
    /// The index digits as written.
    pub label: &'a str,
    /// The index value.
    pub index: u64,
    /// The whole cloze as written, opener to closer.
    pub raw: &'a str,
    /// Question segment.
    pub question: Vec<Node<'a>>,
    /// Hint segment, if a separator was present.
    pub hint: Option<Vec<Node<'a>>>,
}

impl Cloze<'_> {
    /// The question rendered back to text.
    pub fn question_text(&self) -> String {
        render(&self.question)
    }

    /// The hint rendered back to text.
    pub fn hint_text(&self) -> Option<String> {
        self.hint.as_deref().map(render)
    }

    /// Whether another cloze appears in the question or the hint.
    pub fn contains_nested(&self) -> bool {
        let has_cloze = |nodes: &[Node<'_>]| nodes.iter().any(|n| matches!(n, Node::Cloze(_)));
        has_cloze(&self.question) || self.hint.as_deref().is_some_and(has_cloze)
    }

    fn render_into(&self, out: &mut String) {
        out.push_str("{{c");
        out.push_str(self.label);
        out.push_str("::");
        render_into(&self.question, out);
        if let Some(hint) = &self.hint {
            out.push_str(HINT_SEPARATOR);
            render_into(hint, out);
        }
        out.push_str(CLOSER);
    }
}

/// A cloze still waiting for its closer.
struct OpenCloze<'a> {
    start: usize,
    index: u64,
    label: &'a str,
    question: Vec<Node<'a>>,
    hint: Option<Vec<Node<'a>>>,
}

impl<'a> OpenCloze<'a> {
    fn segment(&mut self) -> &mut Vec<Node<'a>> {
        match &mut self.hint {
            Some(hint) => hint,
            None => &mut self.question,
        }
    }

    fn push_literal(&mut self, text: &'a str) {
        if self.hint.is_none() {
            if let Some(at) = text.find(HINT_SEPARATOR) {
                push_text(&mut self.question, &text[..at]);
                let mut hint = Vec::new();
                push_text(&mut hint, &text[at + HINT_SEPARATOR.len()..]);
                self.hint = Some(hint);
                return;
            }
        }
        push_text(self.segment(), text);
    }

    fn close(self, raw: &'a str) -> Cloze<'a> {
        Cloze {
            label: self.label,
            index: self.index,
            raw,
            question: self.question,
            hint: self.hint,
        }
    }
}

fn push_text<'a>(nodes: &mut Vec<Node<'a>>, text: &'a str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
}

/// Parse `text` into a markup tree. Never fails.
pub fn parse(text: &str) -> Vec<Node<'_>> {
    let mut root = Vec::new();
    let mut stack: Vec<OpenCloze<'_>> = Vec::new();
    let mut offset = 0;

    for token in tokenize(text) {
        let start = offset;
        offset += token.surface().len();

        match token {
            Token::Opener { index, raw } => stack.push(OpenCloze {
                start,
                index,
                label: opener_label(raw),
                question: Vec::new(),
                hint: None,
            }),
            Token::Closer => {
                let node = match stack.pop() {
                    Some(open) => {
                        let raw = &text[open.start..offset];
                        Node::Cloze(open.close(raw))
                    }
                    None => Node::Text(CLOSER),
                };
                match stack.last_mut() {
                    Some(parent) => parent.segment().push(node),
                    None => root.push(node),
                }
            }
            Token::Literal(literal) => match stack.last_mut() {
                Some(open) => open.push_literal(literal),
                None => push_text(&mut root, literal),
            },
        }
    }

    if let Some(outermost) = stack.first() {
        root.push(Node::Text(&text[outermost.start..]));
    }

    root
}

/// Render nodes back to markup text.
pub fn render(nodes: &[Node<'_>]) -> String {
    let mut out = String::new();
    render_into(nodes, &mut out);
    out
}

fn render_into(nodes: &[Node<'_>], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Cloze(cloze) => cloze.render_into(out),
        }
    }
}

/// Collect the trimmed questions of every innermost cloze within `nodes`.
///
/// A cloze is innermost when its question holds no further cloze. Clozes are
/// searched at any depth, in questions and hints alike. Fails if an innermost
/// question still contains a `{{c` marker.
pub fn innermost_questions(nodes: &[Node<'_>]) -> Result<BTreeSet<String>> {
    let mut questions = BTreeSet::new();
    collect_innermost(nodes, &mut questions)?;
    Ok(questions)
}

fn collect_innermost(nodes: &[Node<'_>], questions: &mut BTreeSet<String>) -> Result<()> {
    for node in nodes {
        let Node::Cloze(cloze) = node else {
            continue;
        };

        if cloze.question.iter().all(|n| matches!(n, Node::Text(_))) {
            let question = cloze.question_text().trim().to_string();
            if question.contains("{{c") {
                return Err(Error::NestedMarkerInInnermost { question });
            }
            questions.insert(question);
        } else {
            collect_innermost(&cloze.question, questions)?;
        }

        if let Some(hint) = &cloze.hint {
            collect_innermost(hint, questions)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_cloze<'a>(nodes: &'a [Node<'a>]) -> &'a Cloze<'a> {
        match nodes {
            [Node::Cloze(cloze)] => cloze,
            other => panic!("expected a single cloze, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_simple_cloze() {
        let nodes = parse("{{c1::Paris::capital}}");
        let cloze = only_cloze(&nodes);
        assert_eq!(cloze.label, "1");
        assert_eq!(cloze.question, vec![Node::Text("Paris")]);
        assert_eq!(cloze.hint, Some(vec![Node::Text("capital")]));
        assert_eq!(cloze.raw, "{{c1::Paris::capital}}");
    }

    #[test]
    fn test_hint_keeps_later_separators() {
        let nodes = parse("{{c1::q::h1::h2}}");
        let cloze = only_cloze(&nodes);
        assert_eq!(cloze.question_text(), "q");
        assert_eq!(cloze.hint_text().as_deref(), Some("h1::h2"));
    }

    #[test]
    fn test_separator_inside_nested_cloze_belongs_to_it() {
        let nodes = parse("{{c1::a {{c2::b::c}} d::e}}");
        let outer = only_cloze(&nodes);
        assert!(outer.contains_nested());
        assert_eq!(outer.hint_text().as_deref(), Some("e"));
        let Node::Cloze(inner) = &outer.question[1] else {
            panic!("expected nested cloze");
        };
        assert_eq!(inner.hint_text().as_deref(), Some("c"));
    }

    #[test]
    fn test_stray_closer_and_unclosed_tail() {
        let nodes = parse("}}x {{c1::open {{c2::in}}");
        assert_eq!(
            nodes,
            vec![
                Node::Text("}}"),
                Node::Text("x "),
                Node::Text("{{c1::open {{c2::in}}"),
            ]
        );
    }

    #[test]
    fn test_render_is_lossless() {
        for text in [
            "",
            "plain",
            "{{c1::a::b}} }} {{c2::{{c3::x}}::y}}",
            "{{c1::unclosed {{c2::b}}",
            "{{c1::}}{{c2::::}}",
        ] {
            assert_eq!(render(&parse(text)), text);
        }
    }

    #[test]
    fn test_innermost_questions() {
        let nodes = parse("{{c2:: {{c1::Paris}} is {{c3::{{c4::big}}}}}}");
        let questions = innermost_questions(&nodes).unwrap();
        assert_eq!(
            questions.into_iter().collect::<Vec<_>>(),
            vec!["Paris".to_string(), "big".to_string()]
        );
    }

    #[test]
    fn test_innermost_question_with_marker_fails() {
        // `{{cite` is not an opener, so it stays in the question text.
        let nodes = parse("{{c1::see {{cite}}");
        let err = innermost_questions(&nodes).unwrap_err();
        assert_eq!(
            err,
            Error::NestedMarkerInInnermost {
                question: "see {{cite".to_string()
            }
        );
    }
}
