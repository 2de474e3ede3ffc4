//! HTTP client for the Art Institute of Chicago public API.
//!
//! Wraps `GET /artworks/{id}` using [`reqwest`] with a fixed per-request
//! timeout and no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{Artwork, ArtworkCatalog};

/// Public API root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Deadline for a single lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from a single lookup. These never leave the crate; they are logged
/// and collapsed into "does not exist".
#[derive(Debug, thiserror::Error)]
enum LookupError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("catalog returned status {0}")]
    Status(u16),
}

/// Envelope of `GET /artworks/{id}`.
#[derive(Debug, Deserialize)]
struct ArtworkEnvelope {
    #[serde(default)]
    data: Value,
}

/// Catalog client backed by the Art Institute of Chicago API.
#[derive(Debug, Clone)]
pub struct ArticClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArticClient {
    /// Create a client for `base_url` (e.g. `https://api.artic.edu/api/v1`)
    /// whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, external_id: i64) -> Result<Option<Artwork>, LookupError> {
        let response = self
            .client
            .get(format!("{}/artworks/{external_id}", self.base_url))
            .query(&[("fields", "id,title")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let envelope = response.json::<ArtworkEnvelope>().await?;
        Ok(artwork_from_data(external_id, &envelope.data))
    }
}

#[async_trait]
impl ArtworkCatalog for ArticClient {
    async fn lookup(&self, external_id: i64) -> Option<Artwork> {
        match self.fetch(external_id).await {
            Ok(found) => {
                if found.is_none() {
                    tracing::debug!(external_id, "Catalog returned an empty artwork payload");
                }
                found
            }
            Err(LookupError::Status(status)) => {
                tracing::debug!(external_id, status, "Artwork not found in catalog");
                None
            }
            Err(err) => {
                tracing::warn!(external_id, error = %err, "Artwork lookup failed; treating as missing");
                None
            }
        }
    }
}

/// Interpret the `data` member of a catalog response.
///
/// Missing, `null` and empty values mean the artwork does not exist.
fn artwork_from_data(external_id: i64, data: &Value) -> Option<Artwork> {
    let present = match data {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    };
    if !present {
        return None;
    }

    let id = data.get("id").and_then(Value::as_i64).unwrap_or(external_id);
    let title = data
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Some(Artwork { id, title })
}
