// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! JSON envelopes returned by the select handler.

use std::collections::HashMap;

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{Result, SolrError};

#[derive(Debug, Deserialize)]
pub(crate) struct SelectResponse<D> {
    pub response: ResultSet<D>,
    #[serde(rename = "nextCursorMark", default)]
    pub next_cursor_mark: Option<String>,
    #[serde(default)]
    pub facet_counts: Option<FacetCounts>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultSet<D> {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default = "Vec::new")]
    pub docs: Vec<D>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FacetCounts {
    #[serde(default)]
    pub facet_fields: HashMap<String, Vec<JsonValue>>,
}

/// One bucket of a field facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

impl FacetCounts {
    /// Buckets for `alias`, parsed from the flat `[value, count, value, count, ...]` list.
    pub fn field(&self, alias: &str) -> Result<Vec<FacetCount>> {
        let flat = self.facet_fields.get(alias).ok_or_else(|| {
            SolrError::Decode(serde_json::Error::custom(format!(
                "facet field '{alias}' missing from response"
            )))
        })?;
        parse_facet_pairs(flat)
    }
}

pub(crate) fn parse_facet_pairs(flat: &[JsonValue]) -> Result<Vec<FacetCount>> {
    if flat.len() % 2 != 0 {
        return Err(SolrError::Decode(serde_json::Error::custom(format!(
            "facet list has odd length {}",
            flat.len()
        ))));
    }

    flat.chunks_exact(2)
        .map(|pair| {
            let value = match &pair[0] {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            let count = pair[1].as_u64().ok_or_else(|| {
                SolrError::Decode(serde_json::Error::custom(format!(
                    "facet count for '{value}' is not a non-negative integer: {}",
                    pair[1]
                )))
            })?;
            Ok(FacetCount { value, count })
        })
        .collect()
}
