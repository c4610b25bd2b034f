//! Error types for clozenest-batch.
//!
//! Only errors that stop a run live here. A note whose markup cannot be
//! transformed is not an error of the run: it is recorded in the
//! [`RunReport`](crate::RunReport) and the run moves on.
//!
//! # Example
//!
//! ```no_run
//! use clozenest::{Transform, Transformer};
//! use clozenest_batch::{BatchDriver, ChangeLog, ConnectStore, Error, RunOptions};
//!
//! # async fn example() -> clozenest_batch::Result<()> {
//! let store = ConnectStore::from_url("http://127.0.0.1:8765")?;
//! let transformer = Transformer::default();
//! let mut log = ChangeLog::new(Vec::new())?;
//!
//! let driver = BatchDriver::new(&store, &transformer);
//! match driver.run(Transform::Consistent, &RunOptions::default(), &mut log).await {
//!     Ok(report) => println!("{} notes modified", report.modified),
//!     Err(Error::Client(clozenest_connect::Error::ConnectionRefused)) => {
//!         eprintln!("Is Anki running?");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

/// Result type for clozenest-batch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a batch run or a log/config operation.
#[derive(Debug)]
pub enum Error {
    /// An error from the AnkiConnect client.
    Client(clozenest_connect::Error),

    /// A note requested from the store does not exist.
    NoteNotFound(i64),

    /// A write named a field the note does not have.
    UnknownField {
        /// The note ID.
        note_id: i64,
        /// The field name.
        field: String,
    },

    /// An I/O error occurred.
    Io(std::io::Error),

    /// Invalid configuration.
    Config(String),

    /// A change log could not be parsed.
    Log {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::NoteNotFound(id) => write!(f, "note not found: {}", id),
            Error::UnknownField { note_id, field } => {
                write!(f, "note {} has no field '{}'", note_id, field)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Log { line, message } => write!(f, "change log line {}: {}", line, message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<clozenest_connect::Error> for Error {
    fn from(err: clozenest_connect::Error) -> Self {
        Error::Client(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
