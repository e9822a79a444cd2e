//! Resolving list fields, layer by layer.

use async_recursion::async_recursion;

use crate::{
    context::{ContextExt, ContextField, ContextSelectionSet},
    error::{ServerError, ServerResult},
    registry::{
        resolvers::ResolvedValue,
        scalars::PossibleScalar,
        MetaField, MetaFieldType, MetaType, WrappingType,
    },
    query_path::{QueryPath, QueryPathSegment},
    response::ResponseNode,
};

use super::resolve_container;

/// Resolve a list field: peel the declared list layers off the resolved
/// value, then resolve each innermost item against the named type.
pub(crate) async fn resolve_list<'a>(
    ctx: &ContextField<'a>,
    field: &'a MetaField,
    inner_ty: &'a MetaType,
    value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    let shape = ListShape::of(&field.ty);
    resolve_list_inner(ctx, ctx.path.clone(), &shape.layers, shape.item_nullable, inner_ty, value)
        .await
}

/// The nullability structure of a list type, derived from its wrappers.
#[derive(Debug, PartialEq, Eq)]
struct ListShape {
    /// Whether each list layer accepts null, outermost first.
    layers: Vec<bool>,
    /// Whether the innermost items accept null.
    item_nullable: bool,
}

impl ListShape {
    fn of(ty: &MetaFieldType) -> Self {
        let mut wrappers = ty.wrapping_types().peekable();
        let mut layers = Vec::new();
        loop {
            let non_null = matches!(wrappers.peek(), Some(WrappingType::NonNull));
            if non_null {
                wrappers.next();
            }
            match wrappers.next() {
                Some(WrappingType::List) => layers.push(!non_null),
                _ => {
                    return ListShape {
                        layers,
                        item_nullable: !non_null,
                    };
                }
            }
        }
    }
}

#[async_recursion]
async fn resolve_list_inner<'a>(
    ctx: &ContextField<'a>,
    path: QueryPath,
    layers: &[bool],
    item_nullable: bool,
    inner_ty: &'a MetaType,
    value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    let Some((&layer_nullable, rest)) = layers.split_first() else {
        return resolve_item(ctx, path, inner_ty, value).await;
    };

    if value.is_null() {
        return if layer_nullable {
            Ok(ResponseNode::Null)
        } else {
            Err(list_error(ctx, &path, "A null value was resolved for a non-nullable list"))
        };
    }
    let Some(items) = value.item_iter() else {
        return Err(list_error(
            ctx,
            &path,
            format!(
                "Encountered a {} where a list was expected",
                json_kind(value.data_resolved())
            ),
        ));
    };
    let items: Vec<ResolvedValue> = items.collect();

    let futures = items.into_iter().enumerate().map(|(index, item)| {
        let child_path = path.child(QueryPathSegment::Index(index));
        resolve_list_inner(ctx, child_path, rest, item_nullable, inner_ty, item)
    });

    // Whether each direct child may be null: the next layer's
    // nullability, or the item's once all layers are peeled.
    let child_nullable = rest.first().copied().unwrap_or(item_nullable);

    let mut children = Vec::new();
    for (index, result) in futures_util::future::join_all(futures)
        .await
        .into_iter()
        .enumerate()
    {
        match result {
            Ok(node) if node.is_null() && !child_nullable => {
                return Err(list_error(
                    ctx,
                    &path.child(QueryPathSegment::Index(index)),
                    "A null value was resolved where the list expects non-nullable items",
                ));
            }
            Ok(node) => children.push(node),
            Err(error) if child_nullable => {
                ctx.add_error(error);
                children.push(ResponseNode::Null);
            }
            Err(error) => return Err(error),
        }
    }
    Ok(ResponseNode::List(children))
}

async fn resolve_item<'a>(
    ctx: &ContextField<'a>,
    path: QueryPath,
    inner_ty: &'a MetaType,
    value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    match inner_ty {
        // Item nullability is enforced by the caller; a bare null is fine
        // here.
        MetaType::Scalar(scalar) => {
            let json = value.take();
            if json.is_null() {
                return Ok(ResponseNode::Null);
            }
            PossibleScalar::to_value(&scalar.name, json)
                .map(ResponseNode::Primitive)
                .map_err(|error| {
                    let mut error = error.into_server_error(ctx.item.pos);
                    error.path = path.into_segments();
                    error
                })
        }
        ty => {
            if value.is_null() {
                return Ok(ResponseNode::Null);
            }
            if ctx.item.node.selection_set.node.is_empty() {
                return Err(list_error(
                    ctx,
                    &path,
                    format!(
                        "Field \"{}\" of type \"{}\" must have a selection of subfields",
                        ctx.item.node.name.node,
                        ty.name()
                    ),
                ));
            }
            let ctx_selection = ContextSelectionSet {
                path,
                ty,
                item: &ctx.item.node.selection_set,
                schema_env: ctx.schema_env,
                query_env: ctx.query_env,
            };
            resolve_container(&ctx_selection, value).await
        }
    }
}

fn list_error(ctx: &ContextField<'_>, path: &QueryPath, message: impl Into<String>) -> ServerError {
    let mut error = ServerError::new(message, Some(ctx.item.pos));
    error.path = path.segments().to_vec();
    error
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}
