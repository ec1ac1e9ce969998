// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Client
//!
//! Thin HTTP client for a Solr select handler. Queries built with
//! [`Query`] are rendered and sent as the `q` parameter.
//!
//! # Architecture
//!
//! ```text
//! Query ──render──→ q
//!                   │
//!                   ├─→ num_found / get_one_or_none   (rows=0 / rows=1)
//!                   ├─→ facet                          (facet=true, facet.field=<alias>)
//!                   └─→ search → SearchCursor          (sort=<id> asc, cursorMark=…)
//!                                   │
//!                                   └─→ next_page until nextCursorMark repeats
//! ```
//!
//! Every request goes through [`retry`](crate::resilience::retry::retry):
//! statuses listed in [`SolrConfig::retry_statuses`] and connection failures
//! are retried with exponential backoff; anything else fails immediately.
//!
//! # Example
//!
//! ```rust,no_run
//! use serde::Deserialize;
//! use solrify::{mapping_field, Query, SolrClient, SolrConfig};
//!
//! mapping_field! {
//!     pub enum Book {
//!         Title,
//!         Genre = "genre_s",
//!     }
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct BookDoc {
//!     id: String,
//!     title: String,
//! }
//!
//! # async fn example() -> solrify::Result<()> {
//! let client: SolrClient<BookDoc> =
//!     SolrClient::new(SolrConfig::new("http://localhost:8983", "solr/books/select"))?;
//!
//! let query = Query::field(Book::Genre, "fiction");
//! let mut cursor = client.search(&query, None);
//! while let Some(page) = cursor.next_page().await? {
//!     for book in page {
//!         println!("{}: {}", book.id, book.title);
//!     }
//! }
//!
//! for bucket in client.facet(&Query::exists(Book::Title), Book::Genre).await? {
//!     println!("{} = {}", bucket.value, bucket.count);
//! }
//! # Ok(())
//! # }
//! ```

mod cursor;
mod response;

use std::marker::PhantomData;
use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::debug;
use url::Url;

use crate::config::SolrConfig;
use crate::error::{Result, SolrError};
use crate::field::MappingField;
use crate::metrics::{self, LatencyTimer};
use crate::query::Query;
use crate::resilience::retry::{retry, RetryConfig};

pub use cursor::SearchCursor;
pub use response::FacetCount;
use response::SelectResponse;

/// Query text sent when the rendered query is empty.
pub const MATCH_ALL: &str = "*:*";

const USER_AGENT: &str = concat!("solrify/", env!("CARGO_PKG_VERSION"));

/// Client for one select endpoint, decoding documents as `D`.
pub struct SolrClient<D> {
    config: SolrConfig,
    retry: RetryConfig,
    http: reqwest::Client,
    select_url: Url,
    _document: PhantomData<fn() -> D>,
}

impl<D: DeserializeOwned> SolrClient<D> {
    /// Build a client. Fails with [`SolrError::Configuration`] on invalid config.
    pub fn new(config: SolrConfig) -> Result<Self> {
        config.validate()?;
        let retry = RetryConfig::from(&config);
        Self::with_retry(config, retry)
    }

    /// Build a client with an explicit retry policy.
    pub fn with_retry(config: SolrConfig, retry: RetryConfig) -> Result<Self> {
        config.validate()?;
        let select_url = config.select_url()?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SolrError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        debug!(url = %select_url, page_size = config.page_size, "Created search client");

        Ok(Self {
            config,
            retry,
            http,
            select_url,
            _document: PhantomData,
        })
    }

    pub fn config(&self) -> &SolrConfig {
        &self.config
    }

    /// True if the endpoint answers 200. Never retries, never fails.
    pub async fn is_available(&self) -> bool {
        let _timer = LatencyTimer::new("ping");
        match self
            .http
            .get(self.select_url.clone())
            .query(&[("rows", "0")])
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                metrics::record_request("ping", status.as_str());
                status == reqwest::StatusCode::OK
            }
            Err(e) => {
                metrics::record_request("ping", "error");
                debug!(url = %self.select_url, error = %e, "Search endpoint unavailable");
                false
            }
        }
    }

    /// Number of documents matching `query`.
    pub async fn num_found(&self, query: &Query) -> Result<u64> {
        let params = vec![("q", query_param(query)), ("rows", "0".to_string())];
        let response: SelectResponse<IgnoredAny> = self.select("num_found", &params).await?;
        Ok(response.response.num_found)
    }

    /// The single document matching `query`, or `None` when zero or several match.
    pub async fn get_one_or_none(&self, query: &Query, fl: Option<&[&str]>) -> Result<Option<D>> {
        let mut params = vec![("q", query_param(query)), ("rows", "1".to_string())];
        push_field_list(&mut params, fl);

        let response: SelectResponse<D> = self.select("get_one", &params).await?;
        if response.response.num_found != 1 {
            return Ok(None);
        }
        Ok(response.response.docs.into_iter().next())
    }

    /// Cursor over every document matching `query`, `page_size` at a time.
    pub fn search(&self, query: &Query, fl: Option<&[&str]>) -> SearchCursor<'_, D> {
        SearchCursor::new(self, query_param(query), fl.map(|fields| fields.join(",")))
    }

    /// Value counts of `field` over the documents matching `query`.
    pub async fn facet<F: MappingField>(&self, query: &Query, field: F) -> Result<Vec<FacetCount>> {
        let params = vec![
            ("q", query_param(query)),
            ("rows", "0".to_string()),
            ("facet", "true".to_string()),
            ("facet.field", field.alias().to_string()),
        ];
        let response: SelectResponse<IgnoredAny> = self.select("facet", &params).await?;
        response
            .facet_counts
            .unwrap_or_default()
            .field(field.alias())
    }

    /// GET the select handler with `params`, retrying transient failures.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let http = &self.http;
        let url = &self.select_url;
        let statuses = &self.config.retry_statuses;

        retry(
            operation,
            &self.retry,
            |err: &SolrError| is_retryable(err, statuses),
            move || async move {
                let _timer = LatencyTimer::new(operation);
                debug!(operation, url = %url, params = ?params, "Sending search request");

                let response = match http.get(url.clone()).query(params).send().await {
                    Ok(response) => response,
                    Err(e) => {
                        metrics::record_request(operation, "error");
                        return Err(SolrError::Request(e));
                    }
                };

                let status = response.status();
                metrics::record_request(operation, status.as_str());
                if !status.is_success() {
                    return Err(SolrError::Transport {
                        status: status.as_u16(),
                        url: response.url().to_string(),
                    });
                }

                let body = response.bytes().await?;
                let parsed: T = serde_json::from_slice(&body)?;
                Ok::<T, SolrError>(parsed)
            },
        )
        .await
    }
}

fn is_retryable(err: &SolrError, statuses: &[u16]) -> bool {
    match err {
        SolrError::Transport { status, .. } => statuses.contains(status),
        SolrError::Request(e) => e.is_connect() || e.is_timeout(),
        _ => false,
    }
}

fn query_param(query: &Query) -> String {
    let rendered = query.to_query_string();
    if rendered.is_empty() {
        MATCH_ALL.to_string()
    } else {
        rendered
    }
}

fn push_field_list(params: &mut Vec<(&str, String)>, fl: Option<&[&str]>) {
    if let Some(fields) = fl {
        if !fields.is_empty() {
            params.push(("fl", fields.join(",")));
        }
    }
}
