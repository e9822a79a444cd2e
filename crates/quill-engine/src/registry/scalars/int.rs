use quill_value::ConstValue;

use super::DynamicParse;
use crate::error::{Error, InputValueError, InputValueResult};

/// The `Int` scalar: whole numbers only.
pub struct IntScalar;

impl DynamicParse for IntScalar {
    fn parse(value: ConstValue) -> InputValueResult<serde_json::Value> {
        match value {
            ConstValue::Number(number) if !number.is_f64() => Ok(serde_json::Value::Number(number)),
            other => Err(InputValueError::ty_custom(
                "Int",
                format_args!("expected an integer, found a {}", other.kind_str()),
            )),
        }
    }

    fn is_valid(value: &ConstValue) -> bool {
        matches!(value, ConstValue::Number(number) if !number.is_f64())
    }

    fn to_value(value: serde_json::Value) -> Result<ConstValue, Error> {
        match value {
            serde_json::Value::Number(number) if !number.is_f64() => Ok(ConstValue::Number(number)),
            _ => Err(Error::new("Cannot coerce the resolved value into an Int")),
        }
    }
}
