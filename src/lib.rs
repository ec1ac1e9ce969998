//! # Solrify
//!
//! Typed query expressions and a small HTTP client for Solr-style search
//! engines.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Field Enumerations                        │
//! │  • mapping_field! enums: name → snake_case attr → alias    │
//! │  • Reverse lookup by alias                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Query Expressions                         │
//! │  • Leaves: term, wildcard, range, list, regex              │
//! │  • and / or / not / group return new values                │
//! │  • Rendered to Lucene syntax on demand                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                        (q parameter)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Search Client                          │
//! │  • Retry with exponential backoff on 5xx                   │
//! │  • Cursor pagination, counts, facets                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use solrify::{mapping_field, tagged_value, query::{and, group, not, or}, Query};
//!
//! mapping_field! {
//!     pub enum Book {
//!         Title,
//!         Year = "publication_year",
//!         Status,
//!     }
//! }
//!
//! tagged_value! {
//!     pub enum Status {
//!         Published = "published",
//!         Draft = "draft",
//!     }
//! }
//!
//! let recent = Query::field(Book::Year, (2000, 2020));
//! let visible = or(
//!     &Query::field(Book::Status, Status::Published),
//!     &not(&Query::exists(Book::Title)),
//! );
//! let query = and(&recent, &group(&visible));
//!
//! assert_eq!(
//!     query.to_string(),
//!     r#"publication_year:[2000 TO 2020] AND (status:"published" OR -title:*)"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`field`]: Field enumerations and alias lookup
//! - [`query`]: Query expressions and the Solr translator
//! - [`client`]: HTTP client, cursor pagination, facets
//! - [`resilience`]: Retry logic
//! - [`config`]: Client configuration
//! - [`metrics`]: Request metrics

pub mod client;
pub mod config;
pub mod error;
pub mod field;
pub mod metrics;
pub mod query;
pub mod resilience;

pub use client::{FacetCount, SearchCursor, SolrClient};
pub use config::SolrConfig;
pub use error::{Result, SolrError};
pub use field::MappingField;
pub use query::{Conjunction, Query, QueryBuilder, Scalar, SolrTranslator, TaggedValue, Value};
pub use resilience::retry::RetryConfig;
