// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Cursor pagination over search results.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::response::SelectResponse;
use super::SolrClient;
use crate::error::Result;
use crate::metrics;

/// Cursor mark that starts a new pagination.
pub const CURSOR_START: &str = "*";

/// Pages through every document matching a query.
///
/// Results are sorted by the configured id field. Iteration ends once the
/// server hands back the cursor mark it was sent. A failed page leaves the
/// cursor where it was, so calling [`next_page`](Self::next_page) again
/// retries the same page.
pub struct SearchCursor<'a, D> {
    client: &'a SolrClient<D>,
    query: String,
    fl: Option<String>,
    /// Mark for the next request; `None` once exhausted
    mark: Option<String>,
}

impl<'a, D: DeserializeOwned> SearchCursor<'a, D> {
    pub(crate) fn new(client: &'a SolrClient<D>, query: String, fl: Option<String>) -> Self {
        Self {
            client,
            query,
            fl,
            mark: Some(CURSOR_START.to_string()),
        }
    }

    /// Rendered query this cursor sends.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_exhausted(&self) -> bool {
        self.mark.is_none()
    }

    /// Fetch the next page. Returns `Ok(None)` when there is nothing left.
    pub async fn next_page(&mut self) -> Result<Option<Vec<D>>> {
        let Some(mark) = self.mark.clone() else {
            return Ok(None);
        };

        let config = self.client.config();
        let mut params = vec![
            ("q", self.query.clone()),
            ("rows", config.page_size.to_string()),
            ("sort", format!("{} asc", config.id_field)),
            ("cursorMark", mark.clone()),
        ];
        if let Some(fl) = &self.fl {
            params.push(("fl", fl.clone()));
        }

        let page: SelectResponse<D> = self.client.select("search", &params).await?;
        let docs = page.response.docs;
        metrics::record_documents(docs.len());

        self.mark = match page.next_cursor_mark {
            Some(next) if next != mark => Some(next),
            _ => None,
        };
        debug!(
            cursor = %mark,
            docs = docs.len(),
            exhausted = self.mark.is_none(),
            "Fetched search page"
        );

        if docs.is_empty() && self.mark.is_none() {
            return Ok(None);
        }
        Ok(Some(docs))
    }

    /// Drain the cursor into one vector.
    pub async fn collect_all(mut self) -> Result<Vec<D>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}
