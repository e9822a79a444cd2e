//! Literal values for the quill query engine.
//!
//! [`ConstValue`] is the tagged representation of a parsed argument or input
//! literal, produced by an external parser and consumed by the engine's
//! coercion pipeline. It deliberately carries no variables or positions;
//! positions live on the AST nodes wrapping these values.

mod name;

use std::fmt::{self, Display, Formatter, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

pub use name::Name;

/// A parsed literal value.
///
/// Integer and floating-point literals share the `Number` variant, the same
/// way `serde_json` represents them; scalar coercion decides how a number
/// literal binds to a declared target type.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConstValue {
    /// An explicit `null` literal.
    #[default]
    Null,
    /// An integer or floating-point literal.
    Number(Number),
    /// A string literal.
    String(String),
    /// A boolean literal.
    Boolean(bool),
    /// A list of literals.
    List(Vec<ConstValue>),
    /// An object literal: named sub-literals, in source order.
    Object(IndexMap<Name, ConstValue>),
}

impl ConstValue {
    /// Convert a JSON value into a literal value.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConstValue::Null,
            serde_json::Value::Bool(b) => ConstValue::Boolean(b),
            serde_json::Value::Number(n) => ConstValue::Number(n),
            serde_json::Value::String(s) => ConstValue::String(s),
            serde_json::Value::Array(items) => {
                ConstValue::List(items.into_iter().map(ConstValue::from_json).collect())
            }
            serde_json::Value::Object(map) => ConstValue::Object(
                map.into_iter()
                    .map(|(key, value)| (Name::new(key), ConstValue::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Convert this literal into a JSON value.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            ConstValue::Null => serde_json::Value::Null,
            ConstValue::Number(n) => serde_json::Value::Number(n),
            ConstValue::String(s) => serde_json::Value::String(s),
            ConstValue::Boolean(b) => serde_json::Value::Bool(b),
            ConstValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(ConstValue::into_json).collect())
            }
            ConstValue::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(name, value)| (name.to_string(), value.into_json()))
                    .collect(),
            ),
        }
    }

    /// Kind of this literal, for error messages.
    pub fn kind_str(&self) -> &'static str {
        match self {
            ConstValue::Null => "null",
            ConstValue::Number(_) => "number",
            ConstValue::String(_) => "string",
            ConstValue::Boolean(_) => "boolean",
            ConstValue::List(_) => "list",
            ConstValue::Object(_) => "object",
        }
    }

    /// Returns `true` if this is the `null` literal.
    pub fn is_null(&self) -> bool {
        matches!(self, ConstValue::Null)
    }
}

impl From<i32> for ConstValue {
    fn from(value: i32) -> Self {
        ConstValue::Number(value.into())
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        ConstValue::Number(value.into())
    }
}

impl From<f64> for ConstValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(ConstValue::Null, ConstValue::Number)
    }
}

impl From<bool> for ConstValue {
    fn from(value: bool) -> Self {
        ConstValue::Boolean(value)
    }
}

impl From<&str> for ConstValue {
    fn from(value: &str) -> Self {
        ConstValue::String(value.to_string())
    }
}

impl From<String> for ConstValue {
    fn from(value: String) -> Self {
        ConstValue::String(value)
    }
}

impl<T: Into<ConstValue>> From<Vec<T>> for ConstValue {
    fn from(values: Vec<T>) -> Self {
        ConstValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<(Name, ConstValue)> for ConstValue {
    fn from_iter<I: IntoIterator<Item = (Name, ConstValue)>>(iter: I) -> Self {
        ConstValue::Object(iter.into_iter().collect())
    }
}

impl Display for ConstValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Null => f.write_str("null"),
            ConstValue::Number(n) => write!(f, "{n}"),
            ConstValue::String(s) => write_quoted(s, f),
            ConstValue::Boolean(b) => write!(f, "{b}"),
            ConstValue::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_char(']')
            }
            ConstValue::Object(map) => {
                f.write_char('{')?;
                for (i, (name, value)) in map.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_quoted(s: &str, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl Serialize for ConstValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConstValue::Null => serializer.serialize_none(),
            ConstValue::Number(n) => n.serialize(serializer),
            ConstValue::String(s) => serializer.serialize_str(s),
            ConstValue::Boolean(b) => serializer.serialize_bool(*b),
            ConstValue::List(items) => items.serialize(serializer),
            ConstValue::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ConstValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ConstValue::from_json(serde_json::Value::deserialize(
            deserializer,
        )?))
    }
}
