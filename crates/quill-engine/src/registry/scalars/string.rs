use quill_value::ConstValue;

use super::DynamicParse;
use crate::error::{Error, InputValueError, InputValueResult};

/// The `String` scalar.
pub struct StringScalar;

impl DynamicParse for StringScalar {
    fn parse(value: ConstValue) -> InputValueResult<serde_json::Value> {
        match value {
            ConstValue::String(string) => Ok(serde_json::Value::String(string)),
            other => Err(InputValueError::ty_custom(
                "String",
                format_args!("expected a string, found a {}", other.kind_str()),
            )),
        }
    }

    fn is_valid(value: &ConstValue) -> bool {
        matches!(value, ConstValue::String(_))
    }

    fn to_value(value: serde_json::Value) -> Result<ConstValue, Error> {
        match value {
            serde_json::Value::String(string) => Ok(ConstValue::String(string)),
            _ => Err(Error::new("Cannot coerce the resolved value into a String")),
        }
    }
}
