//! AnkiConnect action groups.

mod misc;
mod models;
mod notes;

pub use misc::MiscActions;
pub use models::ModelActions;
pub use notes::NoteActions;
