//! Model (note type) AnkiConnect actions.

use std::collections::HashMap;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to model-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::models()`].
#[derive(Debug)]
pub struct ModelActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl ModelActions<'_> {
    /// Get all model names and their IDs.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clozenest_connect::AnkiClient;
    /// # async fn example() -> clozenest_connect::Result<()> {
    /// let client = AnkiClient::builder().build()?;
    ///
    /// let models = client.models().names_and_ids().await?;
    /// if let Some(id) = models.get("Cloze") {
    ///     println!("Cloze note type: {}", id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn names_and_ids(&self) -> Result<HashMap<String, i64>> {
        self.client.invoke_without_params("modelNamesAndIds").await
    }
}
