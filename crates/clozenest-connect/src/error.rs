//! Error types for the AnkiConnect client.
//!
//! The errors callers usually branch on:
//!
//! - [`Error::ConnectionRefused`]: Anki is not running or AnkiConnect is not installed
//! - [`Error::AnkiConnect`]: the action failed (bad query, unknown note id)
//! - [`Error::PermissionDenied`]: an API key is required or the request needs approval
//!
//! # Example
//!
//! ```no_run
//! use clozenest_connect::{AnkiClient, Error};
//!
//! # async fn example() -> clozenest_connect::Result<()> {
//! let client = AnkiClient::builder().build()?;
//!
//! match client.notes().find("deck:Biology").await {
//!     Ok(ids) => println!("{} notes", ids.len()),
//!     Err(Error::ConnectionRefused) => eprintln!("Please start Anki with AnkiConnect installed"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// For connection failures, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// AnkiConnect returned an error message.
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// Response carried neither a result nor an error.
    #[error("AnkiConnect returned empty response")]
    EmptyResponse,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection refused - Anki is likely not running.
    #[error("Could not connect to Anki. Is Anki running with AnkiConnect installed?")]
    ConnectionRefused,

    /// Permission denied by AnkiConnect.
    ///
    /// An API key is required, the key is wrong, or the request needs approval
    /// in the Anki UI.
    #[error("Permission denied. Request permission first or check API key.")]
    PermissionDenied,

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
