//! Minimal async client for the AnkiConnect add-on.
//!
//! Covers the actions needed to read notes, rewrite their fields and resolve
//! note types:
//!
//! | group | action | method |
//! |---|---|---|
//! | notes | `findNotes` | [`NoteActions::find`] |
//! | notes | `notesInfo` | [`NoteActions::info`] |
//! | notes | `updateNoteFields` | [`NoteActions::update_fields`] |
//! | models | `modelNamesAndIds` | [`ModelActions::names_and_ids`] |
//! | misc | `version` | [`MiscActions::version`] |
//!
//! # Example
//!
//! ```no_run
//! use clozenest_connect::AnkiClient;
//!
//! # async fn example() -> clozenest_connect::Result<()> {
//! let client = AnkiClient::builder().url("http://127.0.0.1:8765").build()?;
//! let ids = client.notes().find("deck:*").await?;
//! println!("{} notes", ids.len());
//! # Ok(())
//! # }
//! ```

mod actions;
mod client;
mod error;
mod request;
mod types;

pub use actions::{MiscActions, ModelActions, NoteActions};
pub use client::{AnkiClient, ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_URL};
pub use error::{Error, Result};
pub use types::{NoteField, NoteInfo};
