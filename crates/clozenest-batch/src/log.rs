//! Change log of modified notes.
//!
//! The log is plain text, one block per modified note:
//!
//! ```text
//! === Modified Notes Log ===
//!
//! Note ID: 1700000000001
//!   Field: Text
//!     Before:
//!       {{c1::Paris}} is in {{c2::France}}
//!
//!     After:
//!       {{c3::{{c1::Paris}}}} is in {{c3::{{c2::France}}}}
//!
//! ============================================================
//!
//! Failures 1
//! note 1700000000002: malformed cloze in field 0: {{c2::{{c1::x}}}}
//! ```
//!
//! Every line of a field value is indented by six spaces, so values can span
//! lines and [`parse_log`] gives them back exactly. A failure message that spans
//! lines continues on lines indented the same way.

use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::driver::NoteFailure;

/// First line of every change log.
pub const LOG_HEADER: &str = "=== Modified Notes Log ===";

const NOTE_PREFIX: &str = "Note ID: ";
const FIELD_PREFIX: &str = "  Field: ";
const BEFORE_MARKER: &str = "    Before:";
const AFTER_MARKER: &str = "    After:";
const VALUE_INDENT: &str = "      ";
const FAILURES_PREFIX: &str = "Failures ";
const RULE_WIDTH: usize = 60;

/// A field whose value changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedField {
    /// The field name.
    pub name: String,
    /// Value before the transform.
    pub before: String,
    /// Value after the transform.
    pub after: String,
}

/// One note block of a change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// The note ID.
    pub note_id: i64,
    /// Changed fields, in note-type order.
    pub fields: Vec<LoggedField>,
}

/// A parsed change log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedLog {
    /// Note blocks in file order.
    pub entries: Vec<LogEntry>,
    /// The failure section, if present.
    pub failures: Vec<NoteFailure>,
}

/// Writes a change log.
#[derive(Debug)]
pub struct ChangeLog<W: Write> {
    writer: W,
    entries: usize,
}

impl<W: Write> ChangeLog<W> {
    /// Start a log, writing the header.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", LOG_HEADER)?;
        writeln!(writer)?;
        Ok(Self { writer, entries: 0 })
    }

    /// Append the block for one modified note.
    pub fn record(&mut self, note_id: i64, fields: &[LoggedField]) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "{}{}", NOTE_PREFIX, note_id)?;
        for field in fields {
            writeln!(w, "{}{}", FIELD_PREFIX, field.name)?;
            writeln!(w, "{}", BEFORE_MARKER)?;
            write_value(w, &field.before)?;
            writeln!(w, "{}", AFTER_MARKER)?;
            write_value(w, &field.after)?;
        }
        writeln!(w, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(w)?;
        self.entries += 1;
        Ok(())
    }

    /// Number of blocks written so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Write the failure section and return the writer.
    pub fn finish(mut self, failures: &[NoteFailure]) -> Result<W> {
        writeln!(self.writer, "{}{}", FAILURES_PREFIX, failures.len())?;
        for failure in failures {
            let mut lines = failure.error.split('\n');
            let first = lines.next().unwrap_or_default();
            writeln!(self.writer, "note {}: {}", failure.note_id, first)?;
            for line in lines {
                writeln!(self.writer, "{}{}", VALUE_INDENT, line)?;
            }
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn write_value<W: Write>(w: &mut W, value: &str) -> Result<()> {
    for line in value.split('\n') {
        writeln!(w, "{}{}", VALUE_INDENT, line)?;
    }
    writeln!(w)?;
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Between,
    Before,
    After,
    Failures,
}

/// Parse a change log written by [`ChangeLog`].
pub fn parse_log(text: &str) -> Result<ParsedLog> {
    let mut log = ParsedLog::default();
    let mut section = Section::Between;
    let mut value: Vec<&str> = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        let number = index + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if section == Section::Failures {
            if let Some(continued) = line.strip_prefix(VALUE_INDENT) {
                let failure = log.failures.last_mut().ok_or_else(|| Error::Log {
                    line: number,
                    message: "continuation line before any failure".to_string(),
                })?;
                failure.error.push('\n');
                failure.error.push_str(continued);
            } else if !line.trim().is_empty() {
                log.failures.push(parse_failure(line, number)?);
            }
            continue;
        }

        let marker = line == BEFORE_MARKER
            || line == AFTER_MARKER
            || line.starts_with(FIELD_PREFIX)
            || line.starts_with(NOTE_PREFIX)
            || line.starts_with(FAILURES_PREFIX)
            || is_rule(line);

        if !marker {
            if matches!(section, Section::Before | Section::After) {
                value.push(line);
            }
            continue;
        }

        close_value(&mut log, section, &mut value);

        if let Some(id) = line.strip_prefix(NOTE_PREFIX) {
            let note_id = id.trim().parse().map_err(|_| Error::Log {
                line: number,
                message: format!("invalid note id '{}'", id.trim()),
            })?;
            log.entries.push(LogEntry {
                note_id,
                fields: Vec::new(),
            });
            section = Section::Between;
        } else if let Some(name) = line.strip_prefix(FIELD_PREFIX) {
            let entry = log.entries.last_mut().ok_or_else(|| Error::Log {
                line: number,
                message: "field outside of a note block".to_string(),
            })?;
            entry.fields.push(LoggedField {
                name: name.to_string(),
                before: String::new(),
                after: String::new(),
            });
            section = Section::Between;
        } else if line == BEFORE_MARKER || line == AFTER_MARKER {
            let has_field = log.entries.last().is_some_and(|e| !e.fields.is_empty());
            if !has_field {
                return Err(Error::Log {
                    line: number,
                    message: format!("'{}' outside of a field", line.trim()),
                });
            }
            section = if line == BEFORE_MARKER {
                Section::Before
            } else {
                Section::After
            };
        } else if line.starts_with(FAILURES_PREFIX) {
            section = Section::Failures;
        } else {
            section = Section::Between;
        }
    }

    close_value(&mut log, section, &mut value);
    Ok(log)
}

fn is_rule(line: &str) -> bool {
    line.len() == RULE_WIDTH && line.bytes().all(|b| b == b'=')
}

/// Store the collected value lines into the current field.
fn close_value(log: &mut ParsedLog, section: Section, value: &mut Vec<&str>) {
    if !matches!(section, Section::Before | Section::After) {
        value.clear();
        return;
    }

    // The blank line after each value is part of the layout.
    if value.last().is_some_and(|l| l.is_empty()) {
        value.pop();
    }
    let text = value
        .drain(..)
        .map(|l| l.strip_prefix(VALUE_INDENT).unwrap_or(l))
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(field) = log
        .entries
        .last_mut()
        .and_then(|e| e.fields.last_mut())
    {
        match section {
            Section::Before => field.before = text,
            _ => field.after = text,
        }
    }
}

fn parse_failure(line: &str, number: usize) -> Result<NoteFailure> {
    let invalid = || Error::Log {
        line: number,
        message: format!("invalid failure line '{}'", line),
    };
    let rest = line.strip_prefix("note ").ok_or_else(invalid)?;
    let (id, error) = rest.split_once(": ").ok_or_else(invalid)?;
    Ok(NoteFailure {
        note_id: id.parse().map_err(|_| invalid())?,
        error: error.to_string(),
    })
}
