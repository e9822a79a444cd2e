//! Coercion rules for the built-in scalars.
//!
//! Each scalar has two directions: `parse` takes a literal from the
//! request into the engine's native JSON, and `to_value` takes a
//! resolver's JSON out to a response leaf. Both reject values of the
//! wrong shape rather than guessing.

use quill_value::ConstValue;

use crate::error::{Error, InputValueError, InputValueResult};

mod boolean;
mod float;
mod id;
mod int;
mod string;

pub use boolean::BooleanScalar;
pub use float::FloatScalar;
pub use id::IdScalar;
pub use int::IntScalar;
pub use string::StringScalar;

/// The two coercion directions of a scalar.
pub trait DynamicParse {
    /// Coerce a literal into native JSON, or reject it.
    fn parse(value: ConstValue) -> InputValueResult<serde_json::Value>;

    /// Whether a literal would be accepted by [`parse`](Self::parse).
    fn is_valid(value: &ConstValue) -> bool;

    /// Coerce a resolver's JSON into a response leaf, or reject it.
    fn to_value(value: serde_json::Value) -> Result<ConstValue, Error>;
}

/// Name-keyed dispatch over the built-in scalars.
pub struct PossibleScalar;

impl PossibleScalar {
    /// The names of the built-in scalars.
    pub(crate) const NAMES: [&'static str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

    /// Parse a literal against the named scalar.
    pub fn parse(type_name: &str, value: ConstValue) -> InputValueResult<serde_json::Value> {
        match type_name {
            "String" => StringScalar::parse(value),
            "Int" => IntScalar::parse(value),
            "Float" => FloatScalar::parse(value),
            "Boolean" => BooleanScalar::parse(value),
            "ID" => IdScalar::parse(value),
            _ => Err(InputValueError::ty_custom(
                type_name,
                "no coercion is defined for this scalar",
            )),
        }
    }

    /// Whether a literal would parse against the named scalar.
    pub fn is_valid(type_name: &str, value: &ConstValue) -> bool {
        match type_name {
            "String" => StringScalar::is_valid(value),
            "Int" => IntScalar::is_valid(value),
            "Float" => FloatScalar::is_valid(value),
            "Boolean" => BooleanScalar::is_valid(value),
            "ID" => IdScalar::is_valid(value),
            _ => false,
        }
    }

    /// Coerce a resolver's JSON against the named scalar.
    pub fn to_value(type_name: &str, value: serde_json::Value) -> Result<ConstValue, Error> {
        match type_name {
            "String" => StringScalar::to_value(value),
            "Int" => IntScalar::to_value(value),
            "Float" => FloatScalar::to_value(value),
            "Boolean" => BooleanScalar::to_value(value),
            "ID" => IdScalar::to_value(value),
            _ => Err(Error::new(format!(
                "Cannot coerce a value of unknown scalar type '{type_name}'"
            ))),
        }
    }
}
