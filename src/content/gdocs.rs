//! Google Docs plain-text export client

use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use thiserror::Error;

use crate::config::GoogleDocsConfig;

lazy_static! {
    static ref DOC_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid Google Doc id: {0:?}")]
    InvalidId(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("export endpoint returned HTTP {0}")]
    Status(u16),
}

/// Fetches the plain-text export of a Google Doc
#[derive(Debug, Clone)]
pub struct GoogleDocsClient {
    http: reqwest::Client,
    export_url: String,
}

impl GoogleDocsClient {
    pub fn new(config: &GoogleDocsConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            export_url: config.export_url.clone(),
        })
    }

    /// Export URL for a document id
    pub fn export_url(&self, doc_id: &str) -> Result<String, FetchError> {
        document_url(&self.export_url, doc_id)
    }

    /// Fetch the document as plain text; any non-2xx status is an error
    pub async fn fetch_text(&self, doc_id: &str) -> Result<String, FetchError> {
        let url = self.export_url(doc_id)?;
        tracing::debug!("Fetching Google Doc {} from {}", doc_id, url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        // Exports start with a UTF-8 byte order mark
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// Substitute a validated document id into a `{id}` URL pattern
pub fn document_url(pattern: &str, doc_id: &str) -> Result<String, FetchError> {
    let doc_id = doc_id.trim();
    if !DOC_ID.is_match(doc_id) {
        return Err(FetchError::InvalidId(doc_id.to_string()));
    }
    Ok(pattern.replace("{id}", doc_id))
}
