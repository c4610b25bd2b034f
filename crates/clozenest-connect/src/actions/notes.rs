//! Note-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use clozenest_connect::AnkiClient;
//!
//! # async fn example() -> clozenest_connect::Result<()> {
//! let client = AnkiClient::builder().build()?;
//!
//! let ids = client.notes().find("deck:Biology note:Cloze").await?;
//! for note in client.notes().info(&ids).await? {
//!     let mut fields = HashMap::new();
//!     for (name, value) in note.ordered_fields() {
//!         fields.insert(name.to_string(), value.trim().to_string());
//!     }
//!     client.notes().update_fields(note.note_id, &fields).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::NoteInfo;

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct FindNotesParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct NotesInfoParams<'a> {
    notes: &'a [i64],
}

#[derive(Serialize)]
struct UpdateNoteFieldsParams<'a> {
    note: UpdateNoteFieldsInner<'a>,
}

#[derive(Serialize)]
struct UpdateNoteFieldsInner<'a> {
    id: i64,
    fields: &'a HashMap<String, String>,
}

impl NoteActions<'_> {
    /// Find note IDs matching an Anki search query.
    ///
    /// Uses the browser search syntax: `deck:Name`, `note:Cloze`, `tag:x`, ...
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .invoke("findNotes", FindNotesParams { query })
            .await
    }

    /// Get field values and metadata for notes.
    ///
    /// AnkiConnect answers an unknown ID with an empty object rather than an
    /// error. That object does not decode as a [`NoteInfo`], so the whole call
    /// fails with [`Error::Json`](crate::Error::Json).
    pub async fn info(&self, note_ids: &[i64]) -> Result<Vec<NoteInfo>> {
        self.client
            .invoke("notesInfo", NotesInfoParams { notes: note_ids })
            .await
    }

    /// Update some or all fields of a note.
    ///
    /// Fields not present in `fields` are left untouched.
    ///
    /// # Warning
    ///
    /// If the note is open in Anki's browser, the change may not persist.
    pub async fn update_fields(
        &self,
        note_id: i64,
        fields: &HashMap<String, String>,
    ) -> Result<()> {
        self.client
            .invoke_void(
                "updateNoteFields",
                UpdateNoteFieldsParams {
                    note: UpdateNoteFieldsInner {
                        id: note_id,
                        fields,
                    },
                },
            )
            .await
    }
}
