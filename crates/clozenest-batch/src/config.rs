//! TOML configuration for batch runs.
//!
//! Every section and key is optional.
//!
//! # Example TOML
//!
//! ```toml
//! [anki]
//! url = "http://127.0.0.1:8765"
//! api_key = "secret"
//! timeout_secs = 30
//!
//! [batch]
//! query = "deck:Chemistry"
//! batch_size = 50
//! skip_notes_with_exempt_fields = true
//! note_types = ["Cloze", "Cloze (nested)"]
//!
//! [transform]
//! base_index_threshold = 5
//! clip_max = 9
//! combo_limit = 8
//! replace = "first"
//!
//! [exempt]
//! substrings = ["Occlusion"]
//! ```

use std::path::Path;
use std::time::Duration;

use clozenest::{ExemptPolicy, TransformConfig, Transformer};
use clozenest_connect::{AnkiClient, DEFAULT_TIMEOUT, DEFAULT_URL};
use serde::{Deserialize, Serialize};

use crate::driver::{DEFAULT_BATCH_SIZE, DEFAULT_QUERY, RunOptions};
use crate::error::{Error, Result};
use crate::lookup::NoteTypeLookup;

/// Root of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// AnkiConnect connection.
    pub anki: AnkiSection,
    /// Note selection and paging.
    pub batch: BatchSection,
    /// Transform parameters.
    pub transform: TransformConfig,
    /// Exempt field names.
    pub exempt: ExemptPolicy,
}

/// The `[anki]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnkiSection {
    /// AnkiConnect URL.
    pub url: String,
    /// API key, if AnkiConnect requires one.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnkiSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// The `[batch]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchSection {
    /// Search query selecting the notes.
    pub query: String,
    /// Notes read per page.
    pub batch_size: usize,
    /// Skip a note entirely when any of its fields is exempt.
    pub skip_notes_with_exempt_fields: bool,
    /// Restrict the run to these note types. Empty means all.
    pub note_types: Vec<String>,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            skip_notes_with_exempt_fields: true,
            note_types: Vec::new(),
        }
    }
}

impl Config {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the types alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        if self.batch.batch_size == 0 {
            return Err(Error::Config("batch.batch_size must be at least 1".to_string()));
        }
        if self.anki.timeout_secs == 0 {
            return Err(Error::Config("anki.timeout_secs must be at least 1".to_string()));
        }
        if self.transform.combo_limit == 0 {
            return Err(Error::Config(
                "transform.combo_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build an AnkiConnect client from the `[anki]` section.
    pub fn client(&self) -> Result<AnkiClient> {
        let mut builder = AnkiClient::builder()
            .url(self.anki.url.as_str())
            .timeout(Duration::from_secs(self.anki.timeout_secs));
        if let Some(key) = &self.anki.api_key {
            builder = builder.api_key(key.as_str());
        }
        Ok(builder.build()?)
    }

    /// A transformer for the `[transform]` and `[exempt]` sections.
    pub fn transformer(&self) -> Transformer {
        Transformer::new(self.transform, self.exempt.clone())
    }

    /// Run options from the `[batch]` section.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            query: self.batch.query.clone(),
            batch_size: self.batch.batch_size,
            dry_run: false,
            skip_notes_with_exempt_fields: self.batch.skip_notes_with_exempt_fields,
        }
    }

    /// A note-type lookup, if `batch.note_types` names any.
    ///
    /// The returned lookup has not been refreshed yet.
    pub fn note_type_lookup(&self) -> Option<NoteTypeLookup> {
        if self.batch.note_types.is_empty() {
            None
        } else {
            Some(NoteTypeLookup::new(self.batch.note_types.iter().cloned()))
        }
    }
}
