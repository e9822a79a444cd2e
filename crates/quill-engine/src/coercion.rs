//! Argument coercion: from request literals to the native values a
//! resolver receives.
//!
//! Coercion runs against the declared argument shapes, in declaration
//! order. Omitted arguments take their default when one exists; omitted
//! nullable arguments without a default stay absent from the resulting
//! [`ArgumentSet`]. Any mismatch fails the whole field with an error
//! naming the offending argument.

use indexmap::IndexMap;

use quill_ast::{Pos, Positioned};
use quill_value::{ConstValue, Name};

use crate::{
    error::{ServerError, ServerResult},
    registry::{
        resolvers::ArgumentSet, scalars::PossibleScalar, MetaFieldType, MetaInputValue, MetaType,
        Registry,
    },
};

/// Coerce the provided argument literals against the declared shapes.
pub fn coerce_arguments(
    registry: &Registry,
    shapes: &IndexMap<String, MetaInputValue>,
    provided: &[(Positioned<Name>, Positioned<ConstValue>)],
    pos: Pos,
) -> ServerResult<ArgumentSet> {
    let mut bound = IndexMap::with_capacity(shapes.len());
    for (name, shape) in shapes {
        // When an argument is repeated, the last occurrence wins.
        let literal = provided
            .iter()
            .rev()
            .find(|(key, _)| key.node.as_str() == name.as_str());
        match literal {
            Some((_, value)) => {
                let native = coerce_input_value(registry, &shape.ty, value.node.clone(), name, value.pos)?;
                bound.insert(Name::new(name), native);
            }
            None => match &shape.default_value {
                Some(default) => {
                    bound.insert(Name::new(name), default.clone().into_json());
                }
                None if shape.ty.is_non_null() => {
                    return Err(ServerError::new(
                        format!(
                            "Argument \"{name}\" of required type \"{ty}\" was not provided",
                            ty = shape.ty
                        ),
                        Some(pos),
                    ));
                }
                None => {}
            },
        }
    }
    Ok(ArgumentSet::new(bound))
}

fn coercion_error(argument: &str, reason: impl std::fmt::Display, pos: Pos) -> ServerError {
    ServerError::new(
        format!("Argument coercion failed for \"{argument}\": {reason}"),
        Some(pos),
    )
}

fn coerce_input_value(
    registry: &Registry,
    ty: &MetaFieldType,
    literal: ConstValue,
    argument: &str,
    pos: Pos,
) -> ServerResult<serde_json::Value> {
    if literal.is_null() {
        if ty.is_non_null() {
            return Err(coercion_error(
                argument,
                format_args!("null provided for non-nullable type \"{ty}\""),
                pos,
            ));
        }
        return Ok(serde_json::Value::Null);
    }

    if ty.is_list() {
        let item_ty = ty
            .list_item_type()
            .ok_or_else(|| coercion_error(argument, format_args!("malformed list type \"{ty}\""), pos))?;
        let items = match literal {
            ConstValue::List(items) => items,
            ConstValue::Object(_) => {
                return Err(coercion_error(
                    argument,
                    format_args!("expected a list for type \"{ty}\", found an object"),
                    pos,
                ));
            }
            // A single non-list value coerces to the one-item list.
            other => vec![other],
        };
        let coerced = items
            .into_iter()
            .map(|item| coerce_input_value(registry, &item_ty, item, argument, pos))
            .collect::<ServerResult<Vec<_>>>()?;
        return Ok(serde_json::Value::Array(coerced));
    }

    let type_name = ty.named_type();
    let meta = registry
        .lookup_type(type_name)
        .map_err(|error| ServerError::new(error.to_string(), Some(pos)))?;

    match meta {
        MetaType::Scalar(_) => PossibleScalar::parse(type_name, literal)
            .map_err(|error| coercion_error(argument, error, pos)),
        MetaType::InputObject(input_object) => {
            let ConstValue::Object(mut object) = literal else {
                return Err(coercion_error(
                    argument,
                    format_args!(
                        "expected an object for type \"{type_name}\", found a {}",
                        literal.kind_str()
                    ),
                    pos,
                ));
            };
            let mut coerced = serde_json::Map::with_capacity(input_object.input_fields.len());
            for (field_name, shape) in &input_object.input_fields {
                match object.swap_remove(field_name.as_str()) {
                    Some(sub_literal) => {
                        coerced.insert(
                            field_name.clone(),
                            coerce_input_value(registry, &shape.ty, sub_literal, field_name, pos)?,
                        );
                    }
                    None => match &shape.default_value {
                        Some(default) => {
                            coerced.insert(field_name.clone(), default.clone().into_json());
                        }
                        None if shape.ty.is_non_null() => {
                            return Err(coercion_error(
                                argument,
                                format_args!(
                                    "missing required field \"{field_name}\" of input type \"{type_name}\""
                                ),
                                pos,
                            ));
                        }
                        None => {}
                    },
                }
            }
            // Keys without a declared shape are dropped.
            Ok(serde_json::Value::Object(coerced))
        }
        other => Err(coercion_error(
            argument,
            format_args!("the type \"{}\" cannot be used as an input", other.name()),
            pos,
        )),
    }
}
