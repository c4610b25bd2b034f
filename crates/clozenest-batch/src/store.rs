//! Note store capability and its implementations.
//!
//! The driver only ever talks to a [`NoteStore`]. [`ConnectStore`] is backed by
//! AnkiConnect; [`MemoryStore`] keeps notes in memory for tests and offline
//! runs.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use clozenest::Field;
use clozenest_connect::{AnkiClient, NoteInfo};

use crate::error::{Error, Result};

/// A note as read from a store, with fields in note-type order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    /// The note ID.
    pub id: i64,
    /// The note type name.
    pub model_name: String,
    /// Fields in note-type order.
    pub fields: Vec<Field>,
}

impl StoredNote {
    /// Create a note from `(name, value)` pairs.
    pub fn new<'a>(
        id: i64,
        model_name: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            id,
            model_name: model_name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| Field::new(name, value))
                .collect(),
        }
    }
}

impl From<NoteInfo> for StoredNote {
    fn from(info: NoteInfo) -> Self {
        let fields = info
            .ordered_fields()
            .into_iter()
            .map(|(name, value)| Field::new(name, value))
            .collect();
        Self {
            id: info.note_id,
            model_name: info.model_name,
            fields,
        }
    }
}

/// Read/write access to a collection of notes.
pub trait NoteStore {
    /// IDs of the notes matching `query`.
    fn find(&self, query: &str) -> impl Future<Output = Result<Vec<i64>>> + Send;

    /// Read the notes with the given IDs, in the same order.
    fn read(&self, ids: &[i64]) -> impl Future<Output = Result<Vec<StoredNote>>> + Send;

    /// Overwrite the named fields of a note. Other fields are left alone.
    fn write(&self, id: i64, fields: &[Field]) -> impl Future<Output = Result<()>> + Send;

    /// Note type names and their IDs.
    fn note_types(&self) -> impl Future<Output = Result<HashMap<String, i64>>> + Send;
}

/// A [`NoteStore`] backed by AnkiConnect.
#[derive(Debug, Clone)]
pub struct ConnectStore {
    client: AnkiClient,
}

impl ConnectStore {
    /// Wrap an existing client.
    pub fn new(client: AnkiClient) -> Self {
        Self { client }
    }

    /// Connect to AnkiConnect at `url` with default settings.
    pub fn from_url(url: &str) -> Result<Self> {
        Ok(Self::new(AnkiClient::builder().url(url).build()?))
    }

    /// The underlying client.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }
}

impl NoteStore for ConnectStore {
    async fn find(&self, query: &str) -> Result<Vec<i64>> {
        Ok(self.client.notes().find(query).await?)
    }

    async fn read(&self, ids: &[i64]) -> Result<Vec<StoredNote>> {
        let infos = self.client.notes().info(ids).await?;
        Ok(infos.into_iter().map(StoredNote::from).collect())
    }

    async fn write(&self, id: i64, fields: &[Field]) -> Result<()> {
        let fields: HashMap<String, String> = fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();
        Ok(self.client.notes().update_fields(id, &fields).await?)
    }

    async fn note_types(&self) -> Result<HashMap<String, i64>> {
        Ok(self.client.models().names_and_ids().await?)
    }
}

/// An in-memory [`NoteStore`].
///
/// `find` ignores the query and returns every note ID in ascending order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Mutex<BTreeMap<i64, StoredNote>>,
    note_types: HashMap<String, i64>,
    writes: Mutex<Vec<i64>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `notes`.
    pub fn with_notes(notes: impl IntoIterator<Item = StoredNote>) -> Self {
        let store = Self::new();
        for note in notes {
            store.insert(note);
        }
        store
    }

    /// Register a note type.
    pub fn with_note_type(mut self, name: impl Into<String>, id: i64) -> Self {
        self.note_types.insert(name.into(), id);
        self
    }

    /// Insert or replace a note.
    pub fn insert(&self, note: StoredNote) {
        self.lock_notes().insert(note.id, note);
    }

    /// Current state of a note.
    pub fn note(&self, id: i64) -> Option<StoredNote> {
        self.lock_notes().get(&id).cloned()
    }

    /// IDs passed to `write`, in call order.
    pub fn writes(&self) -> Vec<i64> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_notes(&self) -> std::sync::MutexGuard<'_, BTreeMap<i64, StoredNote>> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteStore for MemoryStore {
    async fn find(&self, _query: &str) -> Result<Vec<i64>> {
        Ok(self.lock_notes().keys().copied().collect())
    }

    async fn read(&self, ids: &[i64]) -> Result<Vec<StoredNote>> {
        let notes = self.lock_notes();
        ids.iter()
            .map(|id| notes.get(id).cloned().ok_or(Error::NoteNotFound(*id)))
            .collect()
    }

    async fn write(&self, id: i64, fields: &[Field]) -> Result<()> {
        let mut notes = self.lock_notes();
        let note = notes.get_mut(&id).ok_or(Error::NoteNotFound(id))?;

        // All or nothing: check every name before changing any value.
        let positions = fields
            .iter()
            .map(|update| {
                note.fields
                    .iter()
                    .position(|f| f.name == update.name)
                    .ok_or_else(|| Error::UnknownField {
                        note_id: id,
                        field: update.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for (position, update) in positions.into_iter().zip(fields) {
            note.fields[position].value = update.value.clone();
        }

        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        Ok(())
    }

    async fn note_types(&self) -> Result<HashMap<String, i64>> {
        Ok(self.note_types.clone())
    }
}
