// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Retry logic with exponential backoff.
//!
//! Provides configurable retry behavior for transient failures.
//!
//! # Example
//!
//! ```
//! use solrify::{RetryConfig, SolrConfig};
//! use std::time::Duration;
//!
//! // Query: quick retry, then fail
//! let query = RetryConfig::query();
//! assert_eq!(query.max_attempts, Some(3));
//!
//! // Derived from client config: `retries` on top of the first attempt
//! let config = SolrConfig::new("http://localhost:8983", "solr/books/select");
//! let retry = RetryConfig::from(&config);
//! assert_eq!(retry.max_attempts, Some(11));
//! assert_eq!(retry.initial_delay, Duration::from_secs(4));
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::SolrConfig;
use crate::metrics;

/// Configuration for request retry behavior.
///
/// Clients derive theirs from [`SolrConfig`]; [`RetryConfig::query()`] is
/// the quick-retry default for callers building one by hand.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub factor: f64,
    /// Total attempts including the first; `None` retries forever
    pub max_attempts: Option<usize>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::query()
    }
}

impl RetryConfig {
    /// Quick retry for individual queries (don't block forever).
    /// 3 attempts with fast backoff - if it fails, let caller handle it.
    #[must_use]
    pub fn query() -> Self {
        Self {
            max_attempts: Some(3),
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            factor: 2.0,
        }
    }

    /// Fast retry for tests (minimal delays)
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            max_attempts: Some(3),
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
            factor: 2.0,
        }
    }
}

impl From<&SolrConfig> for RetryConfig {
    /// A `backoff_factor` that is not a valid duration falls back to the
    /// maximum delay; [`SolrConfig::validate`] rejects it first.
    fn from(config: &SolrConfig) -> Self {
        let max_delay = Duration::from_secs(config.max_backoff_secs);
        Self {
            max_attempts: Some(config.retries as usize + 1),
            initial_delay: Duration::try_from_secs_f64(config.backoff_factor).unwrap_or(max_delay),
            max_delay,
            factor: 2.0,
        }
    }
}

/// Run `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or the attempt budget runs out. The last error is returned.
///
/// No single wait exceeds `config.max_delay`, the first one included.
pub async fn retry<F, Fut, T, E, P>(
    operation_name: &str,
    config: &RetryConfig,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut delay = config.initial_delay.min(config.max_delay);
    let mut attempts = 0;

    loop {
        match operation().await {
            Ok(val) => {
                if attempts > 0 {
                    info!("Operation '{}' succeeded after {} retries", operation_name, attempts);
                }
                return Ok(val);
            }
            Err(err) => {
                attempts += 1;

                if !should_retry(&err) {
                    return Err(err);
                }

                match config.max_attempts {
                    Some(max) if attempts >= max => return Err(err),
                    Some(max) => warn!(
                        "Operation '{}' failed (attempt {}/{}): {}. Retrying in {:?}...",
                        operation_name, attempts, max, err, delay
                    ),
                    None => warn!(
                        "Operation '{}' failed (attempt {}, will retry forever): {}. Next retry in {:?}...",
                        operation_name, attempts, err, delay
                    ),
                }

                metrics::record_retry(operation_name);
                sleep(delay).await;
                delay = Duration::try_from_secs_f64(delay.as_secs_f64() * config.factor)
                    .unwrap_or(config.max_delay)
                    .min(config.max_delay);
            }
        }
    }
}
