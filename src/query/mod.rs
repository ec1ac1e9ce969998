// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Expressions
//!
//! Composable boolean search expressions rendered to Solr query syntax.
//!
//! # Architecture
//!
//! ```text
//! MappingField member ─┐
//!                      ├─→ Query::field (leaf)
//! Value ───────────────┘        │
//!                               ├─→ and / or / not / group  (new values, operands untouched)
//!                               ↓
//!                        SolrTranslator → "q" parameter
//! ```
//!
//! # Example
//!
//! ```rust
//! use solrify::{mapping_field, query::{and, group, not}, Query};
//!
//! mapping_field! {
//!     pub enum Book {
//!         Title,
//!         Status,
//!     }
//! }
//!
//! let draft = Query::field(Book::Status, "draft");
//! let query = and(&Query::field(Book::Title, "*"), &not(&group(&draft)));
//! assert_eq!(query.to_string(), r#"title:* AND -(status:"draft")"#);
//! ```

mod query_builder;
mod translator;
mod value;

pub use query_builder::{and, group, not, or, Clause, FieldQuery, Query, QueryBuilder, Term};
pub use translator::SolrTranslator;
pub use value::{Conjunction, FiniteFloat, Pattern, Scalar, ScalarList, TaggedValue, Value, WILDCARD};
