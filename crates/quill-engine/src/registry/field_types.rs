//! Type references as wrapping strings.
//!
//! A field or input value refers to its type by name, with list and
//! non-null wrappers spelled inline: `[Int!]!` is a non-null list of
//! non-null `Int`s. Referring to types by name (rather than by pointer)
//! is what lets a type's fields mention the type itself, or two types
//! mention each other, without any construction-order gymnastics.

use std::fmt::{self, Display, Formatter};

/// A type reference as it appears on a field or input value, e.g.
/// `String`, `Person!` or `[Int!]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MetaFieldType(String);

impl MetaFieldType {
    /// The reference as a string, wrappers included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name of the underlying named type, wrappers stripped.
    pub fn named_type(&self) -> &str {
        named_type_from_type_str(&self.0)
    }

    /// Whether the outermost wrapper is non-null.
    pub fn is_non_null(&self) -> bool {
        self.0.ends_with('!')
    }

    /// Whether null is an acceptable value for this position.
    pub fn is_nullable(&self) -> bool {
        !self.is_non_null()
    }

    /// Whether the reference is a list, ignoring an outer non-null.
    pub fn is_list(&self) -> bool {
        self.0.trim_end_matches('!').starts_with('[')
    }

    /// The item type of a list reference: `[Int!]!` yields `Int!`.
    pub fn list_item_type(&self) -> Option<MetaFieldType> {
        let stripped = self.0.strip_suffix('!').unwrap_or(&self.0);
        let inner = stripped.strip_prefix('[')?.strip_suffix(']')?;
        Some(MetaFieldType(inner.to_string()))
    }

    /// Iterate the wrappers of this reference, outermost first.
    pub fn wrapping_types(&self) -> WrappingTypeIter<'_> {
        WrappingTypeIter(self.0.chars())
    }
}

impl Display for MetaFieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetaFieldType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MetaFieldType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for MetaFieldType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One layer of wrapping on a type reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrappingType {
    /// The wrapped type may not be null.
    NonNull,
    /// A list of the wrapped type.
    List,
}

/// Iterator over the wrappers of a type string, outermost first.
///
/// Wrappers read from the end of the string inwards: the trailing `!` of
/// `[Int!]!` is the outermost wrapper.
pub struct WrappingTypeIter<'a>(std::str::Chars<'a>);

impl Iterator for WrappingTypeIter<'_> {
    type Item = WrappingType;

    fn next(&mut self) -> Option<Self::Item> {
        match self.0.next_back()? {
            '!' => Some(WrappingType::NonNull),
            ']' => Some(WrappingType::List),
            _ => None,
        }
    }
}

/// Strips the wrappers off a type string: `[Int!]!` yields `Int`.
pub(crate) fn named_type_from_type_str(ty: &str) -> &str {
    ty.trim_start_matches('[').trim_end_matches(['!', ']'])
}
