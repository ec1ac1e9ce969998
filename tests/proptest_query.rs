//! Property-based tests for query rendering and field lookup.
//!
//! Uses proptest to generate random leaves and combinations and checks the
//! rendering laws the builder promises.
//!
//! Run with: `cargo test --test proptest_query`

use proptest::prelude::*;

use solrify::field::to_snake_case;
use solrify::query::{and, group, not, or};
use solrify::{mapping_field, MappingField, Query, Value};

mapping_field! {
    enum TestField {
        Name = "name",
        Year = "publication_year",
        OldYear = "old_publication_year",
        Status,
        PageCount,
    }
}

// =============================================================================
// Strategies for generating test data
// =============================================================================

fn field_strategy() -> impl Strategy<Value = TestField> {
    prop::sample::select(TestField::members().to_vec())
}

/// Text without quotes or backslashes, never the bare wildcard
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{0,16}"
}

fn leaf_strategy() -> impl Strategy<Value = Query> {
    prop_oneof![
        (field_strategy(), text_strategy()).prop_map(|(f, v)| Query::field(f, v)),
        (field_strategy(), any::<i32>()).prop_map(|(f, v)| Query::field(f, v)),
        (field_strategy(), any::<i32>(), any::<i32>()).prop_map(|(f, lo, hi)| Query::field(f, (lo, hi))),
        field_strategy().prop_map(Query::exists),
        (field_strategy(), prop::collection::vec(text_strategy(), 1..5))
            .prop_map(|(f, vs)| Query::any_of(f, vs).unwrap()),
    ]
}

fn query_strategy() -> impl Strategy<Value = Query> {
    leaf_strategy().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| and(&a, &b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| or(&a, &b)),
            inner.clone().prop_map(|q| not(&q)),
            inner.prop_map(|q| group(&q)),
        ]
    })
}

// =============================================================================
// Rendering laws
// =============================================================================

proptest! {
    /// Rendering is pure: same tree, same text
    #[test]
    fn render_is_deterministic(query in query_strategy()) {
        let first = query.to_string();
        let second = query.to_string();
        prop_assert_eq!(first, second);
    }

    /// String values are quoted exactly once
    #[test]
    fn text_quoted_once(field in field_strategy(), value in text_strategy()) {
        let rendered = Query::field(field, value.as_str()).to_string();
        prop_assert_eq!(rendered, format!("{}:\"{}\"", field.alias(), value));
    }

    /// Negating twice is the identity
    #[test]
    fn double_negation_is_identity(query in query_strategy()) {
        prop_assert_eq!(not(&not(&query)).to_string(), query.to_string());
        prop_assert_eq!(not(&not(&query)), query);
    }

    /// Negating a leaf adds exactly one leading dash
    #[test]
    fn negated_leaf_has_single_dash(query in leaf_strategy()) {
        let rendered = query.to_string();
        prop_assert_eq!(not(&query).to_string(), format!("-{}", rendered));
    }

    /// Combination reads left to right with each operand verbatim
    #[test]
    fn combination_concatenates(a in query_strategy(), b in query_strategy()) {
        prop_assert_eq!(and(&a, &b).to_string(), format!("{} AND {}", a, b));
        prop_assert_eq!(or(&a, &b).to_string(), format!("{} OR {}", a, b));
    }

    /// Right-nested AND flattens
    #[test]
    fn right_nested_and_flattens(a in leaf_strategy(), b in leaf_strategy(), c in leaf_strategy()) {
        prop_assert_eq!(
            and(&a, &and(&b, &c)).to_string(),
            format!("{} AND {} AND {}", a, b, c)
        );
    }

    /// Grouping adds exactly one pair of parentheses
    #[test]
    fn group_wraps_once(query in query_strategy()) {
        prop_assert_eq!(group(&query).to_string(), format!("({})", query));
    }

    /// Empty operands vanish without leaving a conjunction behind
    #[test]
    fn empty_operand_vanishes(query in query_strategy()) {
        let rendered = query.to_string();
        prop_assert_eq!(and(&Query::empty(), &query).to_string(), rendered.clone());
        prop_assert_eq!(or(&query, &Query::empty()).to_string(), rendered);
    }

    /// Combinators never alter their operands
    #[test]
    fn operands_unchanged(a in query_strategy(), b in query_strategy()) {
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = and(&a, &b);
        let _ = or(&b, &a);
        let _ = not(&a);
        let _ = group(&b);
        prop_assert_eq!(a, a_before);
        prop_assert_eq!(b, b_before);
    }

    /// Integer values render in plain decimal
    #[test]
    fn integers_plain(field in field_strategy(), n in any::<i64>()) {
        prop_assert_eq!(Query::field(field, n).to_string(), format!("{}:{}", field.alias(), n));
    }

    /// Finite floats are accepted, their text parses back to the same number
    #[test]
    fn floats_round_trip(field in field_strategy(), x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let rendered = Query::field(field, Value::float(x).unwrap()).to_string();
        let prefix = format!("{}:", field.alias());
        let text = rendered.strip_prefix(&prefix).unwrap();
        prop_assert_eq!(text.parse::<f64>().unwrap(), x);
    }
}

// =============================================================================
// Field enumeration laws
// =============================================================================

proptest! {
    /// Alias lookup inverts alias
    #[test]
    fn alias_lookup_inverts(field in field_strategy()) {
        prop_assert_eq!(TestField::from_alias(field.alias()).unwrap(), field);
    }

    /// Undeclared aliases fail
    #[test]
    fn unknown_alias_fails(alias in "[a-z_]{1,20}") {
        let declared = TestField::members().iter().any(|m| m.alias() == alias);
        prop_assert_eq!(TestField::from_alias(&alias).is_ok(), declared);
    }

    /// snake_case output never holds ASCII uppercase
    #[test]
    fn snake_case_is_lowercase(name in "[A-Z][a-zA-Z0-9]{0,20}") {
        let snake = to_snake_case(&name);
        prop_assert!(!snake.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(!snake.starts_with('_'));
        prop_assert_eq!(snake.replace('_', ""), name.to_lowercase());
    }
}

#[test]
fn declared_aliases_are_unique() {
    assert!(TestField::verify_aliases().is_ok());
    assert_eq!(TestField::PageCount.alias(), "page_count");
}
