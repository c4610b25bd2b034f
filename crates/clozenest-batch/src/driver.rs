//! Paging batch driver.
//!
//! The driver finds notes in a [`NoteStore`], reads them page by page, runs a
//! [`Transform`] over each note and writes back only the fields that changed.
//! Pages are processed sequentially. A note whose markup cannot be transformed
//! is recorded as a failure and skipped; a store error ends the run.

use std::io::Write;

use clozenest::{Field, Transform, Transformer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::log::{ChangeLog, LoggedField};
use crate::lookup::NoteTypeLookup;
use crate::store::{NoteStore, StoredNote};

/// Default search query.
pub const DEFAULT_QUERY: &str = "deck:*";

/// Default number of notes read per page.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Options for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Search query selecting the notes.
    pub query: String,
    /// Notes read per page.
    pub batch_size: usize,
    /// Compute and log changes without writing them.
    pub dry_run: bool,
    /// Skip a note entirely when any of its fields is exempt.
    pub skip_notes_with_exempt_fields: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
            skip_notes_with_exempt_fields: true,
        }
    }
}

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Notes read from the store.
    pub scanned: usize,
    /// Notes with at least one changed field (written unless dry run).
    pub modified: usize,
    /// Notes skipped by note type or exemption.
    pub skipped: usize,
    /// Notes whose transform failed.
    pub failures: Vec<NoteFailure>,
}

impl RunReport {
    /// Notes that were read, transformed and left as they were.
    pub fn unchanged(&self) -> usize {
        self.scanned - self.modified - self.skipped - self.failures.len()
    }
}

/// A note that could not be transformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFailure {
    /// The note ID.
    pub note_id: i64,
    /// The error message.
    pub error: String,
}

/// Applies a transform to every matching note of a store.
#[derive(Debug)]
pub struct BatchDriver<'a, S> {
    store: &'a S,
    transformer: &'a Transformer,
    lookup: Option<&'a NoteTypeLookup>,
}

impl<'a, S: NoteStore> BatchDriver<'a, S> {
    /// Create a driver over `store`.
    pub fn new(store: &'a S, transformer: &'a Transformer) -> Self {
        Self {
            store,
            transformer,
            lookup: None,
        }
    }

    /// Only process notes whose type resolved in `lookup`.
    ///
    /// The lookup is used as it is; refresh it before the run if the store's
    /// note types may have changed.
    pub fn with_lookup(mut self, lookup: &'a NoteTypeLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Run `transform` over every note matching `options.query`.
    ///
    /// Each modified note is appended to `log`. The caller finishes the log
    /// with the report's failures.
    pub async fn run<W: Write>(
        &self,
        transform: Transform,
        options: &RunOptions,
        log: &mut ChangeLog<W>,
    ) -> Result<RunReport> {
        if options.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }

        let ids = self.store.find(&options.query).await?;
        info!(
            query = %options.query,
            notes = ids.len(),
            %transform,
            dry_run = options.dry_run,
            "Starting run"
        );

        let mut report = RunReport::default();
        for (page, chunk) in ids.chunks(options.batch_size).enumerate() {
            debug!(page, notes = chunk.len(), "Reading page");
            let notes = self.store.read(chunk).await?;

            for note in notes {
                report.scanned += 1;
                self.process(note, transform, options, log, &mut report)
                    .await?;
            }
        }

        info!(
            scanned = report.scanned,
            modified = report.modified,
            skipped = report.skipped,
            failed = report.failures.len(),
            "Run finished"
        );
        Ok(report)
    }

    async fn process<W: Write>(
        &self,
        note: StoredNote,
        transform: Transform,
        options: &RunOptions,
        log: &mut ChangeLog<W>,
        report: &mut RunReport,
    ) -> Result<()> {
        if self
            .lookup
            .is_some_and(|lookup| !lookup.contains(&note.model_name))
        {
            debug!(note_id = note.id, model = %note.model_name, "Skipping note type");
            report.skipped += 1;
            return Ok(());
        }

        if options.skip_notes_with_exempt_fields
            && self.transformer.exempt().any_exempt(&note.fields)
        {
            debug!(note_id = note.id, "Skipping note with exempt field");
            report.skipped += 1;
            return Ok(());
        }

        let values = match self.transformer.apply(transform, &note.fields) {
            Ok(values) => values,
            Err(e) => {
                warn!(note_id = note.id, error = %e, "Transform failed; skipping note");
                report.failures.push(NoteFailure {
                    note_id: note.id,
                    error: e.to_string(),
                });
                return Ok(());
            }
        };

        let changed = changed_fields(&note.fields, values);
        if changed.is_empty() {
            return Ok(());
        }

        if !options.dry_run {
            let updates: Vec<Field> = changed
                .iter()
                .map(|f| Field::new(f.name.as_str(), f.after.as_str()))
                .collect();
            self.store.write(note.id, &updates).await?;
        }

        log.record(note.id, &changed)?;
        report.modified += 1;
        info!(note_id = note.id, fields = changed.len(), "Note updated");
        Ok(())
    }
}

/// Pair each field with its new value, keeping only those that differ.
fn changed_fields(fields: &[Field], values: Vec<String>) -> Vec<LoggedField> {
    fields
        .iter()
        .zip(values)
        .filter(|(field, value)| field.value != *value)
        .map(|(field, value)| LoggedField {
            name: field.name.clone(),
            before: field.value.clone(),
            after: value,
        })
        .collect()
}
