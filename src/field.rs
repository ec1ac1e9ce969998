// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field enumerations.
//!
//! Maps logical field names used in application code to the field names the
//! search engine knows about (aliases).
//!
//! Every member carries:
//! - `name`: the declared identifier (`OldYear`)
//! - `attr_name`: the snake_case form of the name (`old_year`)
//! - `alias`: the engine-side field name, defaulting to `attr_name`
//!
//! # Example
//!
//! ```
//! use solrify::{mapping_field, MappingField};
//!
//! mapping_field! {
//!     pub enum BookField {
//!         Title,
//!         Year = "publication_year",
//!         OldYear = "old_publication_year",
//!     }
//! }
//!
//! assert_eq!(BookField::OldYear.attr_name(), "old_year");
//! assert_eq!(BookField::OldYear.alias(), "old_publication_year");
//! assert_eq!(BookField::Title.alias(), "title");
//! assert_eq!(BookField::from_alias("publication_year").unwrap(), BookField::Year);
//! assert_eq!(BookField::OldYear.to_string(), "OldYear");
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, SolrError};

/// A closed set of logical fields with engine-side aliases.
///
/// Implement with [`mapping_field!`](crate::mapping_field) rather than by hand;
/// the macro caches `attr_name` so the returned strings live for `'static`.
pub trait MappingField: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name of the enumeration type, used in lookup errors.
    const TYPE_NAME: &'static str;

    /// All members in declaration order.
    fn members() -> &'static [Self];

    /// Declared member name.
    fn name(&self) -> &'static str;

    /// Snake_case form of [`name`](Self::name).
    fn attr_name(&self) -> &'static str;

    /// Engine-side field name.
    fn alias(&self) -> &'static str;

    /// Find the member whose alias is exactly `alias`.
    fn from_alias(alias: &str) -> Result<Self> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.alias() == alias)
            .ok_or_else(|| SolrError::Lookup {
                type_name: Self::TYPE_NAME,
                alias: alias.to_string(),
            })
    }

    /// Check that no two members share an alias.
    fn verify_aliases() -> Result<()> {
        let mut seen = HashSet::new();
        for member in Self::members() {
            if !seen.insert(member.alias()) {
                return Err(SolrError::Configuration(format!(
                    "alias '{}' is declared more than once in {}",
                    member.alias(),
                    Self::TYPE_NAME
                )));
            }
        }
        Ok(())
    }
}

/// Insert `_` before every interior ASCII uppercase letter, then lowercase.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Declare a field enumeration.
///
/// Members without an explicit alias use their snake_case name.
/// The generated enum is `Copy + Eq + Hash`, implements [`MappingField`],
/// renders its declared name through `Display`, and converts into a query
/// value that renders as its alias.
#[macro_export]
macro_rules! mapping_field {
    (@alias) => { ::std::option::Option::None };
    (@alias $alias:literal) => { ::std::option::Option::Some($alias) };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(= $alias:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            const DECLARED: &'static [(&'static str, ::std::option::Option<&'static str>)] = &[
                $( (::std::stringify!($variant), $crate::mapping_field!(@alias $($alias)?)) ),+
            ];
        }

        impl $crate::MappingField for $name {
            const TYPE_NAME: &'static str = ::std::stringify!($name);

            fn members() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn name(&self) -> &'static str {
                Self::DECLARED[*self as usize].0
            }

            fn attr_name(&self) -> &'static str {
                static ATTR_NAMES: ::std::sync::LazyLock<::std::vec::Vec<::std::string::String>> =
                    ::std::sync::LazyLock::new(|| {
                        $name::DECLARED
                            .iter()
                            .map(|(name, _)| $crate::field::to_snake_case(name))
                            .collect()
                    });
                ATTR_NAMES[*self as usize].as_str()
            }

            fn alias(&self) -> &'static str {
                match Self::DECLARED[*self as usize].1 {
                    ::std::option::Option::Some(alias) => alias,
                    ::std::option::Option::None => $crate::MappingField::attr_name(self),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::MappingField::name(self))
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}.{}", ::std::stringify!($name), $crate::MappingField::name(self))
            }
        }

        impl ::std::convert::From<$name> for $crate::query::Scalar {
            fn from(field: $name) -> Self {
                $crate::query::Scalar::Alias($crate::MappingField::alias(&field).to_string())
            }
        }

        impl ::std::convert::From<$name> for $crate::query::Value {
            fn from(field: $name) -> Self {
                $crate::query::Value::Scalar(field.into())
            }
        }
    };
}
