// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Solr Translator
//!
//! Translates a [`Query`] to Lucene/Solr standard query syntax.
//!
//! # Query Syntax
//!
//! ```text
//! field:"value"             - Term match (quoted)
//! field:*                   - Wildcard
//! field:2020                - Numeric match
//! field:[lo TO hi]          - Inclusive range
//! field:("a" OR "b")        - List
//! field:/pattern/           - Regular expression
//! query1 AND query2         - AND
//! query1 OR query2          - OR
//! -query                    - NOT
//! (query)                   - Grouping
//! ```
//!
//! Clauses that render empty (absent values, empty queries, groups of
//! either) are dropped together with the conjunction that would join them,
//! so `empty AND x` renders as `x` and a negated empty clause renders as
//! nothing at all.

use super::query_builder::{Clause, FieldQuery, Query, Term};
use super::value::{Scalar, Value};

/// Solr query translator
pub struct SolrTranslator;

impl SolrTranslator {
    /// Translate a query to Solr syntax
    pub fn translate(query: &Query) -> String {
        let mut out = String::new();
        for clause in query.clauses() {
            let text = Self::translate_clause(clause);
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                if let Some(conjunction) = clause.conjunction {
                    out.push_str(conjunction.as_str());
                }
            }
            out.push_str(&text);
        }
        out
    }

    fn translate_clause(clause: &Clause) -> String {
        let text = Self::translate_term(&clause.term);
        if clause.negated && !text.is_empty() {
            format!("-{}", text)
        } else {
            text
        }
    }

    fn translate_term(term: &Term) -> String {
        match term {
            Term::Empty => String::new(),
            Term::Field(field) => Self::translate_field(field),
            Term::Group(inner) => {
                let text = Self::translate(inner);
                if text.is_empty() {
                    text
                } else {
                    format!("({})", text)
                }
            }
        }
    }

    fn translate_field(field: &FieldQuery) -> String {
        let Some(value) = &field.value else {
            return String::new();
        };

        let value_expr = match value {
            Value::Scalar(scalar) => Self::translate_scalar(scalar),
            Value::Pattern(pattern) => format!("/{}/", Self::escape_pattern(pattern.as_str())),
            Value::Range(lo, hi) => format!(
                "[{} TO {}]",
                Self::translate_scalar(lo),
                Self::translate_scalar(hi)
            ),
            Value::List(items) => {
                let joined = items
                    .iter()
                    .map(Self::translate_scalar)
                    .collect::<Vec<_>>()
                    .join(field.list_conjunction.as_str());
                format!("({})", joined)
            }
        };

        format!("{}:{}", field.field, value_expr)
    }

    fn translate_scalar(scalar: &Scalar) -> String {
        match scalar {
            Scalar::Text(text) if scalar.is_wildcard() => text.clone(),
            Scalar::Text(text) | Scalar::Alias(text) | Scalar::Tagged(text) => Self::quote(text),
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
        }
    }

    /// Wrap in double quotes, escaping `"` and `\`.
    fn quote(value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    }

    /// Escape bare `/` so it can't terminate the regex delimiter.
    fn escape_pattern(pattern: &str) -> String {
        let mut escaped = String::with_capacity(pattern.len());
        let mut backslash = false;
        for c in pattern.chars() {
            if c == '/' && !backslash {
                escaped.push('\\');
            }
            backslash = c == '\\' && !backslash;
            escaped.push(c);
        }
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{and, group, not, or, Conjunction};
    use crate::MappingField;

    crate::mapping_field! {
        enum TestField {
            Name = "name",
            Year = "publication_year",
            OldYear = "old_publication_year",
            Status = "status",
        }
    }

    crate::tagged_value! {
        enum TestEnum {
            Published = "published",
            Draft = "draft",
        }
    }

    fn name_alice() -> Query {
        Query::field(TestField::Name, "Alice")
    }

    fn year_2020() -> Query {
        Query::field(TestField::Year, 2020)
    }

    #[test]
    fn test_string_query() {
        assert_eq!(SolrTranslator::translate(&name_alice()), r#"name:"Alice""#);
    }

    #[test]
    fn test_integer_query() {
        assert_eq!(year_2020().to_string(), "publication_year:2020");
    }

    #[test]
    fn test_float_query() {
        let query = Query::field(TestField::Year, Value::float(2.5).unwrap());
        assert_eq!(query.to_string(), "publication_year:2.5");
    }

    #[test]
    fn test_tagged_enum_query() {
        let query = Query::field(TestField::Status, TestEnum::Published);
        assert_eq!(query.to_string(), r#"status:"published""#);
    }

    #[test]
    fn test_mapping_enum_query() {
        let query = Query::field(TestField::Name, TestField::OldYear);
        assert_eq!(query.to_string(), r#"name:"old_publication_year""#);
    }

    #[test]
    fn test_regex_query() {
        let query = Query::pattern(TestField::Name, "^Alice").unwrap();
        assert_eq!(query.to_string(), "name:/^Alice/");

        let compiled = regex::Regex::new("Al.ce").unwrap();
        assert_eq!(Query::field(TestField::Name, &compiled).to_string(), "name:/Al.ce/");
    }

    #[test]
    fn test_regex_slash_escaped() {
        let query = Query::pattern(TestField::Name, r"a/b\/c").unwrap();
        assert_eq!(query.to_string(), r"name:/a\/b\/c/");
    }

    #[test]
    fn test_wildcard_query() {
        assert_eq!(Query::field(TestField::Name, "*").to_string(), "name:*");
        assert_eq!(Query::exists(TestField::Name).to_string(), "name:*");
    }

    #[test]
    fn test_wildcard_only_when_exact() {
        assert_eq!(Query::field(TestField::Name, "Al*").to_string(), r#"name:"Al*""#);
    }

    #[test]
    fn test_none_value_query() {
        let query = Query::field_opt::<_, &str>(TestField::Name, None);
        assert_eq!(query.to_string(), "");
    }

    #[test]
    fn test_range_query() {
        assert_eq!(
            Query::field(TestField::Year, (2000, 2020)).to_string(),
            "publication_year:[2000 TO 2020]"
        );
        assert_eq!(
            Query::range(TestField::Name, "a", "*").to_string(),
            r#"name:["a" TO *]"#
        );
    }

    #[test]
    fn test_list_query() {
        let query = Query::any_of(TestField::Name, ["Alice", "Bob"]).unwrap();
        assert_eq!(query.to_string(), r#"name:("Alice" OR "Bob")"#);
    }

    #[test]
    fn test_list_query_with_and() {
        let query = Query::all_of(TestField::Name, ["Alice", "Bob"]).unwrap();
        assert_eq!(query.to_string(), r#"name:("Alice" AND "Bob")"#);

        let query = Query::field_with(
            TestField::Name,
            Value::list(["Alice", "Bob"]).unwrap(),
            Conjunction::And,
        );
        assert_eq!(query.to_string(), r#"name:("Alice" AND "Bob")"#);
    }

    #[test]
    fn test_quotes_escaped() {
        let query = Query::field(TestField::Name, r#"say "hi" \o/"#);
        assert_eq!(query.to_string(), r#"name:"say \"hi\" \\o/""#);
    }

    #[test]
    fn test_negation() {
        assert_eq!(not(&name_alice()).to_string(), r#"-name:"Alice""#);
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(not(&not(&name_alice())).to_string(), r#"name:"Alice""#);
    }

    #[test]
    fn test_and_conjunction() {
        assert_eq!(
            and(&name_alice(), &year_2020()).to_string(),
            r#"name:"Alice" AND publication_year:2020"#
        );
    }

    #[test]
    fn test_or_conjunction() {
        assert_eq!(
            or(&name_alice(), &year_2020()).to_string(),
            r#"name:"Alice" OR publication_year:2020"#
        );
    }

    #[test]
    fn test_three_way_conjunction() {
        let q3 = Query::field(TestField::Status, TestEnum::Published);
        let combined = and(&name_alice(), &and(&year_2020(), &q3));
        assert_eq!(
            combined.to_string(),
            r#"name:"Alice" AND publication_year:2020 AND status:"published""#
        );
    }

    #[test]
    fn test_negating_combination_negates_last_operand() {
        let combined = not(&and(&name_alice(), &year_2020()));
        assert_eq!(combined.to_string(), r#"name:"Alice" AND -publication_year:2020"#);

        let grouped = not(&group(&and(&name_alice(), &year_2020())));
        assert_eq!(grouped.to_string(), r#"-(name:"Alice" AND publication_year:2020)"#);
    }

    #[test]
    fn test_group_query() {
        assert_eq!(group(&name_alice()).to_string(), r#"(name:"Alice")"#);
    }

    #[test]
    fn test_combined_group() {
        let combined = group(&and(&group(&name_alice()), &group(&year_2020())));
        assert_eq!(
            combined.to_string(),
            r#"((name:"Alice") AND (publication_year:2020))"#
        );
    }

    #[test]
    fn test_combined_with_empty_query() {
        assert_eq!(and(&Query::empty(), &name_alice()).to_string(), r#"name:"Alice""#);
        assert_eq!(or(&name_alice(), &Query::empty()).to_string(), r#"name:"Alice""#);

        let absent = Query::field_opt::<_, i32>(TestField::Year, None);
        let middle = name_alice().and(absent).and(year_2020());
        assert_eq!(middle.to_string(), r#"name:"Alice" AND publication_year:2020"#);
    }

    #[test]
    fn test_negated_empty_renders_nothing() {
        assert_eq!(not(&Query::empty()).to_string(), "");
        assert_eq!(group(&Query::empty()).to_string(), "");
        assert_eq!(not(&Query::field_opt::<_, &str>(TestField::Name, None)).to_string(), "");
    }

    #[test]
    fn test_render_is_repeatable() {
        let query = and(&not(&name_alice()), &group(&or(&year_2020(), &name_alice())));
        assert_eq!(query.to_string(), query.to_string());
        assert_eq!(query.to_query_string(), SolrTranslator::translate(&query));
    }

    #[test]
    fn test_alias_used_for_field() {
        let query = Query::field(TestField::OldYear, 1999);
        assert!(query.to_string().starts_with(TestField::OldYear.alias()));
    }
}
