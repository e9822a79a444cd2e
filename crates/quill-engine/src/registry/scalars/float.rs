use quill_value::ConstValue;

use super::DynamicParse;
use crate::error::{Error, InputValueError, InputValueResult};

/// The `Float` scalar. Integer inputs widen to the numerically equal
/// floating-point value.
pub struct FloatScalar;

fn widen(number: serde_json::Number) -> Option<serde_json::Number> {
    number.as_f64().and_then(serde_json::Number::from_f64)
}

impl DynamicParse for FloatScalar {
    fn parse(value: ConstValue) -> InputValueResult<serde_json::Value> {
        match value {
            ConstValue::Number(number) => {
                widen(number).map(serde_json::Value::Number).ok_or_else(|| {
                    InputValueError::ty_custom("Float", "the number is not representable as a float")
                })
            }
            other => Err(InputValueError::ty_custom(
                "Float",
                format_args!("expected a number, found a {}", other.kind_str()),
            )),
        }
    }

    fn is_valid(value: &ConstValue) -> bool {
        matches!(value, ConstValue::Number(_))
    }

    fn to_value(value: serde_json::Value) -> Result<ConstValue, Error> {
        match value {
            serde_json::Value::Number(number) => widen(number)
                .map(ConstValue::Number)
                .ok_or_else(|| Error::new("Cannot coerce the resolved value into a Float")),
            _ => Err(Error::new("Cannot coerce the resolved value into a Float")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_widen_to_floats() {
        assert_eq!(FloatScalar::parse(ConstValue::from(3)).unwrap(), json!(3.0));
        assert_eq!(FloatScalar::to_value(json!(3)).unwrap(), ConstValue::from(3.0));
    }

    #[test]
    fn non_numbers_are_rejected() {
        assert!(FloatScalar::parse(ConstValue::from("3")).is_err());
        assert!(FloatScalar::to_value(json!("3")).is_err());
    }
}
