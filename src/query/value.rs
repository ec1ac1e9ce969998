// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query values.
//!
//! Every payload a field clause can carry is one of the variants below.
//! Values that could never render into valid engine syntax (non-finite
//! floats, empty lists, patterns that don't compile) are rejected when the
//! value is built, never at render time. Those payloads sit behind the
//! [`FiniteFloat`], [`Pattern`] and [`ScalarList`] newtypes, which check
//! on every way in, deserialization included.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolrError};

/// Single-character token matching any value. Renders unquoted.
pub const WILDCARD: &str = "*";

/// Logical combinator joining two clauses (or the items of a list value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Conjunction {
    And,
    #[default]
    Or,
}

impl Conjunction {
    /// Text placed between the joined clauses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enum whose members stand for a stored string value.
///
/// Usually implemented through [`tagged_value!`](crate::tagged_value).
pub trait TaggedValue {
    fn stored_value(&self) -> &str;
}

/// Float that is neither NaN nor infinite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FiniteFloat(f64);

impl FiniteFloat {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(SolrError::InvalidValue(format!(
                "float value {value} cannot be rendered as a query term"
            )))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for FiniteFloat {
    type Error = SolrError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FiniteFloat> for f64 {
    fn from(value: FiniteFloat) -> Self {
        value.0
    }
}

impl fmt::Display for FiniteFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Regular expression source that compiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(String);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        regex::Regex::new(pattern)
            .map_err(|e| SolrError::InvalidValue(format!("invalid pattern /{pattern}/: {e}")))?;
        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Pattern {
    type Error = SolrError;

    fn try_from(pattern: String) -> Result<Self> {
        Self::new(&pattern)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.0
    }
}

impl From<&regex::Regex> for Pattern {
    fn from(regex: &regex::Regex) -> Self {
        Self(regex.as_str().to_string())
    }
}

/// Non-empty list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scalar>", into = "Vec<Scalar>")]
pub struct ScalarList(Vec<Scalar>);

impl ScalarList {
    pub fn new(values: Vec<Scalar>) -> Result<Self> {
        if values.is_empty() {
            return Err(SolrError::InvalidValue(
                "list value must contain at least one element".to_string(),
            ));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Scalar>> for ScalarList {
    type Error = SolrError;

    fn try_from(values: Vec<Scalar>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<ScalarList> for Vec<Scalar> {
    fn from(list: ScalarList) -> Self {
        list.0
    }
}

/// Scalar value: a single term, number or enum value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// Free text, quoted on render unless it is [`WILDCARD`]
    Text(String),
    /// Integer
    Integer(i64),
    /// Finite float
    Float(FiniteFloat),
    /// Alias of a field enumeration member, quoted on render
    Alias(String),
    /// Stored value of a tagged enum, quoted on render
    Tagged(String),
}

impl Scalar {
    /// The `*` wildcard.
    pub fn wildcard() -> Self {
        Scalar::Text(WILDCARD.to_string())
    }

    /// Float scalar; NaN and infinities are rejected.
    pub fn float(value: f64) -> Result<Self> {
        FiniteFloat::new(value).map(Scalar::Float)
    }

    /// Scalar from a tagged enum member.
    pub fn tagged<T: TaggedValue + ?Sized>(value: &T) -> Self {
        Scalar::Tagged(value.stored_value().to_string())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Scalar::Text(text) if text == WILDCARD)
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Integer(i64::from(value))
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Text(value.clone())
    }
}

/// Payload of a field clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Single term: `field:"value"`
    Scalar(Scalar),
    /// Regular expression: `field:/pattern/`
    Pattern(Pattern),
    /// Inclusive range: `field:[lo TO hi]`
    Range(Scalar, Scalar),
    /// Non-empty list joined by the clause's list conjunction: `field:(a OR b)`
    List(ScalarList),
}

impl Value {
    /// Float value; NaN and infinities are rejected.
    pub fn float(value: f64) -> Result<Self> {
        Scalar::float(value).map(Value::Scalar)
    }

    /// Regular expression value. The pattern must compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Pattern::new(pattern).map(Value::Pattern)
    }

    /// Inclusive range between two scalars.
    pub fn range(lo: impl Into<Scalar>, hi: impl Into<Scalar>) -> Self {
        Value::Range(lo.into(), hi.into())
    }

    /// List of scalars; an empty list is rejected.
    pub fn list<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        ScalarList::new(values.into_iter().map(Into::into).collect()).map(Value::List)
    }

    /// Value from a tagged enum member.
    pub fn tagged<T: TaggedValue + ?Sized>(value: &T) -> Self {
        Value::Scalar(Scalar::tagged(value))
    }

    /// The `*` wildcard.
    pub fn wildcard() -> Self {
        Value::Scalar(Scalar::wildcard())
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.into())
    }
}

impl<A: Into<Scalar>, B: Into<Scalar>> From<(A, B)> for Value {
    fn from((lo, hi): (A, B)) -> Self {
        Value::range(lo, hi)
    }
}

impl From<regex::Regex> for Value {
    fn from(pattern: regex::Regex) -> Self {
        Value::Pattern(Pattern::from(&pattern))
    }
}

impl From<&regex::Regex> for Value {
    fn from(pattern: &regex::Regex) -> Self {
        Value::Pattern(Pattern::from(pattern))
    }
}

/// Declare an enum of tagged values.
///
/// ```
/// use solrify::{tagged_value, TaggedValue};
///
/// tagged_value! {
///     pub enum Status {
///         Published = "published",
///         Draft = "draft",
///     }
/// }
///
/// assert_eq!(Status::Draft.stored_value(), "draft");
/// ```
#[macro_export]
macro_rules! tagged_value {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::TaggedValue for $name {
            fn stored_value(&self) -> &str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl ::std::convert::From<$name> for $crate::query::Scalar {
            fn from(value: $name) -> Self {
                $crate::query::Scalar::tagged(&value)
            }
        }

        impl ::std::convert::From<$name> for $crate::query::Value {
            fn from(value: $name) -> Self {
                $crate::query::Value::tagged(&value)
            }
        }
    };
}
