use quill_value::ConstValue;

use super::DynamicParse;
use crate::error::{Error, InputValueError, InputValueResult};

/// The `Boolean` scalar.
pub struct BooleanScalar;

impl DynamicParse for BooleanScalar {
    fn parse(value: ConstValue) -> InputValueResult<serde_json::Value> {
        match value {
            ConstValue::Boolean(flag) => Ok(serde_json::Value::Bool(flag)),
            other => Err(InputValueError::ty_custom(
                "Boolean",
                format_args!("expected a boolean, found a {}", other.kind_str()),
            )),
        }
    }

    fn is_valid(value: &ConstValue) -> bool {
        matches!(value, ConstValue::Boolean(_))
    }

    fn to_value(value: serde_json::Value) -> Result<ConstValue, Error> {
        match value {
            serde_json::Value::Bool(flag) => Ok(ConstValue::Boolean(flag)),
            _ => Err(Error::new("Cannot coerce the resolved value into a Boolean")),
        }
    }
}
