//! Miscellaneous AnkiConnect actions.

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to miscellaneous AnkiConnect operations.
///
/// Obtained via [`AnkiClient::misc()`].
#[derive(Debug)]
pub struct MiscActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl MiscActions<'_> {
    /// Get the AnkiConnect protocol version.
    ///
    /// Doubles as a connectivity check.
    pub async fn version(&self) -> Result<u8> {
        self.client.invoke_without_params("version").await
    }
}
