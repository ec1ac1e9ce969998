// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - expression values for search queries
//!
//! A [`Query`] is an immutable, ordered list of clauses. The first clause
//! stands alone; every later clause carries the [`Conjunction`] joining it to
//! everything before it. Combinators never touch their operands in place,
//! they return new values.
//!
//! # Example
//!
//! ```rust
//! use solrify::{mapping_field, Query, QueryBuilder};
//!
//! mapping_field! {
//!     pub enum Book {
//!         Title,
//!         Year = "publication_year",
//!     }
//! }
//!
//! // Simple field query
//! let query = Query::field(Book::Title, "Dune");
//! assert_eq!(query.to_string(), r#"title:"Dune""#);
//!
//! // Boolean combinations
//! let query = Query::field(Book::Title, "Dune").and(Query::field(Book::Year, (1960, 1970)));
//! assert_eq!(query.to_string(), r#"title:"Dune" AND publication_year:[1960 TO 1970]"#);
//!
//! // Builder
//! let query = QueryBuilder::new()
//!     .field(Book::Title, "Dune")
//!     .field(Book::Title, "Emma")
//!     .build_or();
//! assert_eq!(query.to_string(), r#"title:"Dune" OR title:"Emma""#);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::translator::SolrTranslator;
use super::value::{Conjunction, Value};
use crate::error::{Result, SolrError};
use crate::field::MappingField;

/// Search query expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClauseList")]
pub struct Query {
    clauses: Vec<Clause>,
}

/// Unchecked wire form of a [`Query`]
#[derive(Deserialize)]
struct ClauseList {
    clauses: Vec<Clause>,
}

impl TryFrom<ClauseList> for Query {
    type Error = SolrError;

    /// Only the first clause may lack a conjunction, and it must.
    fn try_from(list: ClauseList) -> Result<Self> {
        if list.clauses.is_empty() {
            return Err(SolrError::InvalidValue("query must have at least one clause".into()));
        }
        for (index, clause) in list.clauses.iter().enumerate() {
            match (index, clause.conjunction) {
                (0, Some(_)) => {
                    return Err(SolrError::InvalidValue(
                        "first clause of a query cannot carry a conjunction".into(),
                    ))
                }
                (0, None) | (_, Some(_)) => {}
                (_, None) => {
                    return Err(SolrError::InvalidValue(format!(
                        "clause {index} of a query has no conjunction"
                    )))
                }
            }
        }
        Ok(Self { clauses: list.clauses })
    }
}

/// One operand of a [`Query`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Conjunction joining this clause to the ones before it (`None` for the first)
    pub conjunction: Option<Conjunction>,
    /// Whether the clause renders with a leading `-`
    pub negated: bool,
    pub term: Term,
}

/// What a clause matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// Matches nothing and renders as nothing
    Empty,
    /// Field test: `alias:value`
    Field(FieldQuery),
    /// Parenthesized sub-expression: `(query)`
    Group(Box<Query>),
}

/// Field query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldQuery {
    /// Engine-side field name
    pub field: String,
    /// Value to test; `None` renders as an empty clause
    pub value: Option<Value>,
    /// Joins the items of a list value
    pub list_conjunction: Conjunction,
}

impl Term {
    /// True if the term renders as the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Term::Empty => true,
            Term::Field(field) => field.value.is_none(),
            Term::Group(query) => query.is_empty(),
        }
    }
}

impl Query {
    fn single(term: Term) -> Self {
        Self {
            clauses: vec![Clause {
                conjunction: None,
                negated: false,
                term,
            }],
        }
    }

    /// Query with no clause; renders as the empty string.
    pub fn empty() -> Self {
        Self::single(Term::Empty)
    }

    /// Field query `alias:value`, lists joined with OR
    pub fn field<F: MappingField>(field: F, value: impl Into<Value>) -> Self {
        Self::field_with(field, value, Conjunction::Or)
    }

    /// Field query with an explicit conjunction for list values
    pub fn field_with<F: MappingField>(
        field: F,
        value: impl Into<Value>,
        list_conjunction: Conjunction,
    ) -> Self {
        Self::single(Term::Field(FieldQuery {
            field: field.alias().to_string(),
            value: Some(value.into()),
            list_conjunction,
        }))
    }

    /// Field query whose value may be absent. An absent value renders as nothing.
    pub fn field_opt<F: MappingField, V: Into<Value>>(field: F, value: Option<V>) -> Self {
        Self::single(Term::Field(FieldQuery {
            field: field.alias().to_string(),
            value: value.map(Into::into),
            list_conjunction: Conjunction::Or,
        }))
    }

    /// Wildcard query: `alias:*`
    pub fn exists<F: MappingField>(field: F) -> Self {
        Self::field(field, Value::wildcard())
    }

    /// Range query: `alias:[lo TO hi]`
    pub fn range<F: MappingField>(
        field: F,
        lo: impl Into<super::Scalar>,
        hi: impl Into<super::Scalar>,
    ) -> Self {
        Self::field(field, Value::range(lo, hi))
    }

    /// List query matching any of `values`: `alias:(a OR b)`
    pub fn any_of<F, I, S>(field: F, values: I) -> Result<Self>
    where
        F: MappingField,
        I: IntoIterator<Item = S>,
        S: Into<super::Scalar>,
    {
        Ok(Self::field_with(field, Value::list(values)?, Conjunction::Or))
    }

    /// List query matching all of `values`: `alias:(a AND b)`
    pub fn all_of<F, I, S>(field: F, values: I) -> Result<Self>
    where
        F: MappingField,
        I: IntoIterator<Item = S>,
        S: Into<super::Scalar>,
    {
        Ok(Self::field_with(field, Value::list(values)?, Conjunction::And))
    }

    /// Regular expression query: `alias:/pattern/`
    pub fn pattern<F: MappingField>(field: F, pattern: &str) -> Result<Self> {
        Ok(Self::field(field, Value::pattern(pattern)?))
    }

    /// Clauses in render order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True if the query renders as the empty string.
    pub fn is_empty(&self) -> bool {
        self.clauses.iter().all(|clause| clause.term.is_empty())
    }

    /// Combine with AND
    pub fn and(self, other: Query) -> Self {
        self.combine(other, Conjunction::And)
    }

    /// Combine with OR
    pub fn or(self, other: Query) -> Self {
        self.combine(other, Conjunction::Or)
    }

    /// Append `other`'s clauses after ours, joining its first clause with
    /// `conjunction`. The conjunctions inside `other` are kept as they are.
    pub fn combine(self, other: Query, conjunction: Conjunction) -> Self {
        let mut clauses = self.clauses;
        let mut rest = other.clauses.into_iter();
        if let Some(mut first) = rest.next() {
            first.conjunction = Some(conjunction);
            clauses.push(first);
        }
        clauses.extend(rest);
        Self { clauses }
    }

    /// Toggle negation of the last clause.
    ///
    /// On a combined query only the final operand is negated:
    /// `a.and(b).negate()` renders `a AND -b`. Group first to negate the
    /// whole expression.
    pub fn negate(mut self) -> Self {
        if let Some(last) = self.clauses.last_mut() {
            last.negated = !last.negated;
        }
        self
    }

    /// Wrap in parentheses. The group is a single clause.
    pub fn group(self) -> Self {
        Self::single(Term::Group(Box::new(self)))
    }

    /// Render to engine query syntax.
    pub fn to_query_string(&self) -> String {
        SolrTranslator::translate(self)
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SolrTranslator::translate(self))
    }
}

/// `a AND b`, leaving both operands untouched.
pub fn and(a: &Query, b: &Query) -> Query {
    a.clone().and(b.clone())
}

/// `a OR b`, leaving both operands untouched.
pub fn or(a: &Query, b: &Query) -> Query {
    a.clone().or(b.clone())
}

/// Negated copy of `q`. See [`Query::negate`].
pub fn not(q: &Query) -> Query {
    q.clone().negate()
}

/// Parenthesized copy of `q`.
pub fn group(q: &Query) -> Query {
    q.clone().group()
}

/// Builder for flat queries
#[derive(Debug, Default)]
pub struct QueryBuilder {
    nodes: Vec<Query>,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a field constraint
    pub fn field<F: MappingField>(mut self, field: F, value: impl Into<Value>) -> Self {
        self.nodes.push(Query::field(field, value));
        self
    }

    /// Add a field constraint if `value` is present
    pub fn field_opt<F: MappingField, V: Into<Value>>(mut self, field: F, value: Option<V>) -> Self {
        if value.is_some() {
            self.nodes.push(Query::field_opt(field, value));
        }
        self
    }

    /// Add a range constraint
    pub fn range<F: MappingField>(
        mut self,
        field: F,
        lo: impl Into<super::Scalar>,
        hi: impl Into<super::Scalar>,
    ) -> Self {
        self.nodes.push(Query::range(field, lo, hi));
        self
    }

    /// Add a negated field constraint
    pub fn exclude<F: MappingField>(mut self, field: F, value: impl Into<Value>) -> Self {
        self.nodes.push(Query::field(field, value).negate());
        self
    }

    /// Add an arbitrary sub-query
    pub fn query(mut self, query: Query) -> Self {
        self.nodes.push(query);
        self
    }

    /// Build query with AND semantics (all constraints must match)
    pub fn build_and(self) -> Query {
        self.build(Conjunction::And)
    }

    /// Build query with OR semantics (any constraint can match)
    pub fn build_or(self) -> Query {
        self.build(Conjunction::Or)
    }

    fn build(self, conjunction: Conjunction) -> Query {
        let mut nodes = self.nodes.into_iter();
        match nodes.next() {
            // Empty builder renders as nothing; the client sends match-all
            None => Query::empty(),
            Some(first) => nodes.fold(first, |acc, node| acc.combine(node, conjunction)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::mapping_field! {
        enum TestField {
            Name = "name",
            Year = "publication_year",
            Status,
        }
    }

    #[test]
    fn test_simple_field_query() {
        let query = Query::field(TestField::Name, "Alice");
        assert_eq!(
            query.clauses(),
            &[Clause {
                conjunction: None,
                negated: false,
                term: Term::Field(FieldQuery {
                    field: "name".to_string(),
                    value: Some(Value::Scalar("Alice".into())),
                    list_conjunction: Conjunction::Or,
                }),
            }]
        );
    }

    #[test]
    fn test_and_query() {
        let query = Query::field(TestField::Name, "Alice").and(Query::field(TestField::Year, 2020));
        let clauses = query.clauses();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].conjunction, None);
        assert_eq!(clauses[1].conjunction, Some(Conjunction::And));
    }

    #[test]
    fn test_nested_combination_keeps_inner_conjunctions() {
        let inner = Query::field(TestField::Year, 2020).or(Query::field(TestField::Status, "x"));
        let query = Query::field(TestField::Name, "Alice").and(inner);
        let conjunctions: Vec<_> = query.clauses().iter().map(|c| c.conjunction).collect();
        assert_eq!(
            conjunctions,
            vec![None, Some(Conjunction::And), Some(Conjunction::Or)]
        );
    }

    #[test]
    fn test_free_functions_leave_operands_untouched() {
        let a = Query::field(TestField::Name, "Alice");
        let b = Query::field(TestField::Year, 2020);
        let a_before = a.clone();
        let b_before = b.clone();

        let _ = and(&a, &b);
        let _ = or(&a, &b);
        let _ = not(&a);
        let _ = group(&b);

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_negate_toggles_last_clause() {
        let query = Query::field(TestField::Name, "Alice").and(Query::field(TestField::Year, 2020));
        let negated = query.clone().negate();
        assert!(!negated.clauses()[0].negated);
        assert!(negated.clauses()[1].negated);
        assert_eq!(negated.negate(), query);
    }

    #[test]
    fn test_group_is_single_clause() {
        let query = Query::field(TestField::Name, "Alice")
            .and(Query::field(TestField::Year, 2020))
            .group();
        assert_eq!(query.clauses().len(), 1);
        assert!(matches!(query.clauses()[0].term, Term::Group(_)));
    }

    #[test]
    fn test_is_empty() {
        assert!(Query::empty().is_empty());
        assert!(Query::field_opt::<_, &str>(TestField::Name, None).is_empty());
        assert!(Query::empty().group().negate().is_empty());
        assert!(!Query::empty().and(Query::field(TestField::Name, "x")).is_empty());
    }

    #[test]
    fn test_query_builder_and() {
        let query = QueryBuilder::new()
            .field(TestField::Name, "Alice")
            .range(TestField::Year, 2000, 2020)
            .exclude(TestField::Status, "draft")
            .build_and();

        assert_eq!(query.clauses().len(), 3);
        assert!(query.clauses()[1..]
            .iter()
            .all(|c| c.conjunction == Some(Conjunction::And)));
        assert!(query.clauses()[2].negated);
    }

    #[test]
    fn test_query_builder_or() {
        let query = QueryBuilder::new()
            .field(TestField::Status, "active")
            .field(TestField::Status, "pending")
            .build_or();

        assert_eq!(query.clauses().len(), 2);
        assert_eq!(query.clauses()[1].conjunction, Some(Conjunction::Or));
    }

    #[test]
    fn test_query_builder_skips_absent_values() {
        let query = QueryBuilder::new()
            .field_opt::<_, &str>(TestField::Name, None)
            .field_opt(TestField::Year, Some(2020))
            .build_and();
        assert_eq!(query.clauses().len(), 1);
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(QueryBuilder::new().build_and(), Query::empty());
        assert_eq!(QueryBuilder::new().build_or(), Query::empty());
    }

    #[test]
    fn test_any_of_rejects_empty() {
        let empty: [&str; 0] = [];
        assert!(Query::any_of(TestField::Name, empty).is_err());
        assert!(Query::all_of(TestField::Name, ["a", "b"]).is_ok());
    }

    #[test]
    fn test_serde_roundtrip_preserves_structure() {
        let query = Query::field(TestField::Name, "Alice")
            .and(Query::range(TestField::Year, 2000, 2020).negate())
            .group();
        let json = serde_json::to_string(&query).unwrap();
        let back: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }

    #[test]
    fn test_deserialize_rejects_missing_conjunction() {
        let leaf = r#"{"conjunction": null, "negated": false, "term": {"Field": {"field": "name", "value": {"Scalar": {"Integer": 1}}, "list_conjunction": "Or"}}}"#;
        let joined = leaf.replace(r#""conjunction": null"#, r#""conjunction": "And""#);

        let ok = format!(r#"{{"clauses": [{leaf}, {joined}]}}"#);
        let query: Query = serde_json::from_str(&ok).unwrap();
        assert_eq!(query.to_string(), "name:1 AND name:1");

        let glued = format!(r#"{{"clauses": [{leaf}, {leaf}]}}"#);
        assert!(serde_json::from_str::<Query>(&glued).is_err());

        let leading = format!(r#"{{"clauses": [{joined}]}}"#);
        assert!(serde_json::from_str::<Query>(&leading).is_err());

        assert!(serde_json::from_str::<Query>(r#"{"clauses": []}"#).is_err());

        // Nested groups go through the same check
        let nested = format!(r#"{{"clauses": [{{"conjunction": null, "negated": false, "term": {{"Group": {{"clauses": [{leaf}, {leaf}]}}}}}}]}}"#);
        assert!(serde_json::from_str::<Query>(&nested).is_err());
    }
}
