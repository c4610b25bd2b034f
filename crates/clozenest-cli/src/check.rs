//! `clozenest check`: markup-only review of a change log.

use std::io::{self, Write};

use clozenest::{Comparison, compare};
use clozenest_batch::ParsedLog;

const DIFF_OPEN: &str = "----- Diff (Normalized) -----";
const DIFF_CLOSE: &str = "----------------------------";

/// Write one report block per log entry. Returns the number of blocks whose
/// content changed beyond cloze markup.
pub fn write_report<W: Write>(log: &ParsedLog, out: &mut W) -> io::Result<usize> {
    let mut differing = 0;

    for (block, entry) in log.entries.iter().enumerate() {
        writeln!(out, "=== Note ID: {} (Block {}) ===", entry.note_id, block + 1)?;

        let changed: Vec<(&str, String)> = entry
            .fields
            .iter()
            .filter_map(|field| match compare(&field.before, &field.after) {
                Comparison::MarkupOnly => None,
                Comparison::ContentChanged { diff } => Some((field.name.as_str(), diff)),
            })
            .collect();

        if changed.is_empty() {
            writeln!(out, "  => {}", Comparison::MarkupOnly)?;
        } else {
            differing += 1;
            writeln!(out, "  => Content differs beyond just cloze markup!")?;
            for (name, diff) in changed {
                writeln!(out, "  Field: {}", name)?;
                writeln!(out, "{}", DIFF_OPEN)?;
                write!(out, "{}", diff)?;
                if !diff.ends_with('\n') {
                    writeln!(out)?;
                }
                writeln!(out, "{}", DIFF_CLOSE)?;
            }
        }
        writeln!(out)?;
    }

    Ok(differing)
}
