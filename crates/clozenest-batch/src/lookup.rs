//! Explicitly refreshed note-type lookup.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::NoteStore;

/// Resolves a configured set of note-type names against a store.
///
/// The lookup starts empty. Call [`refresh`](Self::refresh) after creating it
/// and whenever the store's note types may have changed (for example after a
/// profile switch). Names the store does not know are logged and ignored.
///
/// # Example
///
/// ```
/// use clozenest_batch::{MemoryStore, NoteTypeLookup};
///
/// # async fn example() -> clozenest_batch::Result<()> {
/// let store = MemoryStore::new().with_note_type("Cloze", 1);
/// let mut lookup = NoteTypeLookup::new(["Cloze", "Cloze (nested)"]);
/// lookup.refresh(&store).await?;
///
/// assert!(lookup.contains("Cloze"));
/// assert!(!lookup.contains("Cloze (nested)"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteTypeLookup {
    wanted: Vec<String>,
    resolved: HashMap<String, i64>,
}

impl NoteTypeLookup {
    /// Create a lookup for the given note-type names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            wanted: names.into_iter().map(Into::into).collect(),
            resolved: HashMap::new(),
        }
    }

    /// Re-resolve every wanted name against `store`.
    pub async fn refresh<S: NoteStore>(&mut self, store: &S) -> Result<()> {
        let available = store.note_types().await?;

        self.resolved.clear();
        for name in &self.wanted {
            match available.get(name) {
                Some(&id) => {
                    debug!(note_type = %name, id, "Resolved note type");
                    self.resolved.insert(name.clone(), id);
                }
                None => warn!(note_type = %name, "Note type not found; ignoring it"),
            }
        }
        Ok(())
    }

    /// Whether `model_name` resolved on the last refresh.
    pub fn contains(&self, model_name: &str) -> bool {
        self.resolved.contains_key(model_name)
    }

    /// The ID of a resolved note type.
    pub fn id(&self, model_name: &str) -> Option<i64> {
        self.resolved.get(model_name).copied()
    }

    /// Number of resolved note types.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
