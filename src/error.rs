// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolrError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("No member of {type_name} matches alias '{alias}'")]
    Lookup {
        type_name: &'static str,
        alias: String,
    },

    #[error("Invalid query value: {0}")]
    InvalidValue(String),

    #[error("Search engine returned HTTP {status} for {url}")]
    Transport { status: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SolrError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SolrError::Transport { status, .. } => Some(*status),
            SolrError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SolrError>;
