//! Dictionary API client
//!
//! Wraps the single outbound lookup against a dictionaryapi.dev-compatible
//! endpoint. The response is loosely structured; extraction only ever trusts
//! the first entry and tolerates missing fields everywhere.
//!
//! Errors are typed rather than swallowed here so the enrichment task can log
//! the failure reason, but no caller ever propagates them past the task
//! boundary.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("wordstash/", env!("CARGO_PKG_VERSION"));

/// Dictionary client errors
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Dictionary API returned status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One entry of the dictionary response array
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

/// Phonetic variant; `text` is frequently absent or empty
#[derive(Debug, Clone, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
}

/// Meaning group (one per part of speech)
#[derive(Debug, Clone, Deserialize)]
pub struct Meaning {
    #[serde(default)]
    pub definitions: Vec<DefinitionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionEntry {
    pub definition: String,
}

/// Extracted enrichment data; both fields optional, both may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub pronunciation: Option<String>,
    pub definition: Option<String>,
}

impl Enrichment {
    /// True when the lookup found nothing usable
    pub fn is_empty(&self) -> bool {
        self.pronunciation.is_none() && self.definition.is_none()
    }
}

/// Pull pronunciation and definition out of a dictionary response
///
/// Only the first entry is consulted. Pronunciation is the first phonetic
/// variant with a non-empty `text`; definition is the first definition of the
/// first meaning group that has any.
pub fn extract_enrichment(entries: &[DictionaryEntry]) -> Enrichment {
    let Some(entry) = entries.first() else {
        return Enrichment::default();
    };

    let pronunciation = entry
        .phonetics
        .iter()
        .find_map(|p| p.text.as_deref().filter(|t| !t.trim().is_empty()))
        .map(|t| t.to_string());

    let definition = entry
        .meanings
        .iter()
        .find(|m| !m.definitions.is_empty())
        .and_then(|m| m.definitions.first())
        .map(|d| d.definition.clone());

    Enrichment {
        pronunciation,
        definition,
    }
}

/// HTTP client for the external dictionary endpoint
pub struct DictionaryClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DictionaryError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DictionaryError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Look up a word; `Ok` with an empty `Enrichment` means "no data found"
    ///
    /// The endpoint answers 404 for unknown words, which is a legitimate
    /// no-data outcome rather than a failure.
    pub async fn lookup(&self, word: &str) -> Result<Enrichment, DictionaryError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(word));

        tracing::debug!(word = word, "Querying dictionary API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DictionaryError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(word = word, "Dictionary has no entry");
            return Ok(Enrichment::default());
        }

        if !status.is_success() {
            return Err(DictionaryError::Status(status.as_u16()));
        }

        let entries: Vec<DictionaryEntry> = response
            .json()
            .await
            .map_err(|e| DictionaryError::Parse(e.to_string()))?;

        Ok(extract_enrichment(&entries))
    }
}
