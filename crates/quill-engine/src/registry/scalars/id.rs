use quill_value::ConstValue;

use super::DynamicParse;
use crate::error::{Error, InputValueError, InputValueResult};

/// The `ID` scalar: an opaque identifier, serialized as a string.
/// Integer inputs are accepted and stringified.
pub struct IdScalar;

impl DynamicParse for IdScalar {
    fn parse(value: ConstValue) -> InputValueResult<serde_json::Value> {
        match value {
            ConstValue::String(string) => Ok(serde_json::Value::String(string)),
            ConstValue::Number(number) if !number.is_f64() => {
                Ok(serde_json::Value::String(number.to_string()))
            }
            other => Err(InputValueError::ty_custom(
                "ID",
                format_args!("expected a string or an integer, found a {}", other.kind_str()),
            )),
        }
    }

    fn is_valid(value: &ConstValue) -> bool {
        matches!(value, ConstValue::String(_))
            || matches!(value, ConstValue::Number(number) if !number.is_f64())
    }

    fn to_value(value: serde_json::Value) -> Result<ConstValue, Error> {
        match value {
            serde_json::Value::String(string) => Ok(ConstValue::String(string)),
            serde_json::Value::Number(number) if !number.is_f64() => {
                Ok(ConstValue::String(number.to_string()))
            }
            _ => Err(Error::new("Cannot coerce the resolved value into an ID")),
        }
    }
}
