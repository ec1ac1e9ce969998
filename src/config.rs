//! Configuration for the search client.
//!
//! # Example
//!
//! ```
//! use solrify::SolrConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SolrConfig::new("http://localhost:8983", "solr/books/select");
//! assert_eq!(config.page_size, 10);
//! assert_eq!(config.id_field, "id");
//!
//! // Full config
//! let config = SolrConfig {
//!     page_size: 500,
//!     retries: 3,
//!     backoff_factor: 0.5,
//!     ..SolrConfig::new("http://localhost:8983", "solr/books/select")
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Result, SolrError};

/// Configuration for a [`SolrClient`](crate::SolrClient).
///
/// Only `host` and `endpoint` are required; everything else has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct SolrConfig {
    /// Base URL of the server (e.g., "http://localhost:8983")
    pub host: String,

    /// Core or collection request handler path (e.g., "solr/books/select")
    pub endpoint: String,

    /// Unique key field, used as the cursor sort key
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Rows per page when paginating with a cursor
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay before the first retry, in seconds; doubles on every further retry
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,

    /// Upper bound on a single backoff delay, in seconds
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,

    /// HTTP statuses that are retried
    #[serde(default = "default_retry_statuses")]
    pub retry_statuses: Vec<u16>,
}

fn default_id_field() -> String { "id".to_string() }
fn default_page_size() -> u32 { 10 }
fn default_timeout_secs() -> u64 { 30 }
fn default_retries() -> u32 { 10 }
fn default_backoff_factor() -> f64 { 4.0 }
fn default_max_backoff_secs() -> u64 { 120 }
fn default_retry_statuses() -> Vec<u16> { vec![500, 502, 503, 504] }

impl SolrConfig {
    /// Config with defaults for everything except the server location.
    pub fn new(host: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            endpoint: endpoint.into(),
            id_field: default_id_field(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            backoff_factor: default_backoff_factor(),
            max_backoff_secs: default_max_backoff_secs(),
            retry_statuses: default_retry_statuses(),
        }
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SolrError::Configuration("host must not be empty".into()));
        }
        if self.id_field.trim().is_empty() {
            return Err(SolrError::Configuration("id_field must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(SolrError::Configuration("page_size must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(SolrError::Configuration("timeout_secs must be at least 1".into()));
        }
        if Duration::try_from_secs_f64(self.backoff_factor).is_err() {
            return Err(SolrError::Configuration(format!(
                "backoff_factor must be a non-negative number of seconds, got {}",
                self.backoff_factor
            )));
        }
        self.select_url().map(|_| ())
    }

    /// `host` and `endpoint` joined into the request URL.
    pub fn select_url(&self) -> Result<Url> {
        let url = format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        );
        Url::parse(&url)
            .map_err(|e| SolrError::Configuration(format!("invalid search URL '{}': {}", url, e)))
    }
}
