//! Data returned by AnkiConnect.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A note as returned by `notesInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    /// The note ID.
    pub note_id: i64,
    /// The note type name.
    pub model_name: String,
    /// Tags on the note.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Field values keyed by field name.
    pub fields: HashMap<String, NoteField>,
    /// IDs of the note's cards.
    #[serde(default)]
    pub cards: Vec<i64>,
}

impl NoteInfo {
    /// Field names and values in note-type order.
    pub fn ordered_fields(&self) -> Vec<(&str, &str)> {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by(|a, b| (a.1.order, a.0).cmp(&(b.1.order, b.0)));
        fields
            .into_iter()
            .map(|(name, field)| (name.as_str(), field.value.as_str()))
            .collect()
    }
}

/// A single field value with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteField {
    /// The field content (HTML).
    pub value: String,
    /// Position of the field in the note type.
    pub order: u32,
}
