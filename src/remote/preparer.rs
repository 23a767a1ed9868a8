//! Core `RemotePreparer` trait and `HttpPreparer` implementation.
//!
//! `HttpPreparer` posts raw text to the enrichment service's
//! `/process-text` endpoint and converts the reply into [`Slot`]s.  The
//! service's own ORP positions and heading flags are trusted; nothing is
//! recomputed unless the service leaves a position out.
//! All connection details come from [`BackendConfig`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BackendConfig;
use crate::session::{Slot, Word};
use crate::text::compute_orp_index;

// ---------------------------------------------------------------------------
// RemoteError
// ---------------------------------------------------------------------------

/// Why the remote path could not produce words.
///
/// Both variants are recoverable: the fallback coordinator segments the
/// text locally instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Transport failure, timeout, or a non-2xx HTTP status.
    #[error("enrichment service unavailable: {0}")]
    Unavailable(String),

    /// The service answered, but not with a usable payload.
    #[error("invalid enrichment response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::InvalidResponse(e.to_string())
        } else {
            RemoteError::Unavailable(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// RemotePreparer trait
// ---------------------------------------------------------------------------

/// Turns raw text into enriched words and pauses via an external service.
///
/// Exactly one attempt per call; retrying is the caller's decision.
#[async_trait]
pub trait RemotePreparer: Send + Sync {
    async fn prepare_remote(&self, text: &str) -> Result<Vec<Slot>, RemoteError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ProcessTextRequest<'a> {
    text: &'a str,
    duplicate_long_words: bool,
    add_sentence_pauses: bool,
    detect_headings: bool,
}

impl<'a> ProcessTextRequest<'a> {
    fn with_all_options(text: &'a str) -> Self {
        Self {
            text,
            duplicate_long_words: true,
            add_sentence_pauses: true,
            detect_headings: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProcessTextResponse {
    words: Vec<String>,
    orp_data: Vec<OrpEntry>,
    stats: ProcessingStats,
}

#[derive(Debug, Deserialize)]
struct OrpEntry {
    is_heading: bool,
    /// 1-based ORP position as reported by the service.
    #[serde(default)]
    position: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ProcessingStats {
    original_count: usize,
    processed_count: usize,
}

/// Validate a `/process-text` reply and convert it into slots.
///
/// Blank entries are the service's sentence and heading pauses.  They
/// become [`Slot::Pause`], so each one still takes a tick.
pub fn parse_response(body: serde_json::Value) -> Result<Vec<Slot>, RemoteError> {
    match body.get("success").and_then(serde_json::Value::as_bool) {
        Some(true) => {}
        Some(false) => {
            return Err(RemoteError::InvalidResponse(
                "service reported success = false".into(),
            ))
        }
        None => {
            return Err(RemoteError::InvalidResponse(
                "missing boolean `success` field".into(),
            ))
        }
    }

    let parsed: ProcessTextResponse = serde_json::from_value(body)
        .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

    if parsed.words.len() != parsed.orp_data.len() {
        return Err(RemoteError::InvalidResponse(format!(
            "{} words but {} orp_data entries",
            parsed.words.len(),
            parsed.orp_data.len()
        )));
    }

    log::info!(
        "prepare: service processed {} words into {}",
        parsed.stats.original_count,
        parsed.stats.processed_count
    );

    let mut slots = Vec::with_capacity(parsed.words.len());
    let mut pauses = 0usize;

    for (text, entry) in parsed.words.into_iter().zip(parsed.orp_data) {
        if text.trim().is_empty() {
            pauses += 1;
            slots.push(Slot::Pause);
            continue;
        }

        let orp_index = match entry.position {
            Some(position) => position.checked_sub(1).ok_or_else(|| {
                RemoteError::InvalidResponse(format!("ORP position 0 for word {text:?}"))
            })?,
            None => compute_orp_index(&text)
                .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?,
        };

        let word = Word::with_orp(text, orp_index, entry.is_heading)
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        slots.push(Slot::Word(word));
    }

    log::debug!("prepare: {pauses} of {} slots are pauses", slots.len());
    Ok(slots)
}

// ---------------------------------------------------------------------------
// HttpPreparer
// ---------------------------------------------------------------------------

/// Calls `POST {api_base_url}/process-text` on the enrichment service.
pub struct HttpPreparer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPreparer {
    /// Build an `HttpPreparer` from backend config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.request_timeout_secs`.
    pub fn from_config(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let endpoint = format!(
            "{}/process-text",
            config.api_base_url.trim_end_matches('/')
        );

        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemotePreparer for HttpPreparer {
    async fn prepare_remote(&self, text: &str) -> Result<Vec<Slot>, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProcessTextRequest::with_all_options(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Unavailable(format!("HTTP {status}")));
        }

        let body: serde_json::Value = response.json().await?;

        parse_response(body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
