//! Batch application of clozenest transforms to an Anki collection.
//!
//! This crate connects the pure [`clozenest`] engine to a note store. The
//! [`BatchDriver`] finds notes, pages through them, transforms each note and
//! writes back the fields that changed, recording every modification in a
//! [`ChangeLog`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::fs::File;
//!
//! use clozenest::Transform;
//! use clozenest_batch::{BatchDriver, ChangeLog, Config, ConnectStore};
//!
//! # async fn example() -> clozenest_batch::Result<()> {
//! let config = Config::from_file("clozenest.toml")?;
//! let store = ConnectStore::new(config.client()?);
//! let transformer = config.transformer();
//!
//! let mut log = ChangeLog::new(File::create("modified_notes.txt")?)?;
//! let report = BatchDriver::new(&store, &transformer)
//!     .run(Transform::Consistent, &config.run_options(), &mut log)
//!     .await?;
//! log.finish(&report.failures)?;
//!
//! println!("{} of {} notes modified", report.modified, report.scanned);
//! # Ok(())
//! # }
//! ```
//!
//! # Stores
//!
//! The driver works against any [`NoteStore`]:
//!
//! | Store | Backing |
//! |-------|---------|
//! | [`ConnectStore`] | AnkiConnect via [`clozenest_connect`] |
//! | [`MemoryStore`] | In-process map, for tests and offline runs |

mod error;

pub mod config;
pub mod driver;
pub mod log;
pub mod lookup;
pub mod store;

pub use config::Config;
pub use driver::{BatchDriver, NoteFailure, RunOptions, RunReport};
pub use error::{Error, Result};
pub use log::{ChangeLog, LogEntry, LoggedField, ParsedLog, parse_log};
pub use lookup::NoteTypeLookup;
pub use store::{ConnectStore, MemoryStore, NoteStore, StoredNote};
