//! Resolving a single field: argument coercion, resolver invocation and
//! null propagation.

use async_recursion::async_recursion;

use crate::{
    coercion::coerce_arguments,
    context::{ContextExt, ContextField},
    error::{ServerError, ServerResult},
    registry::{
        resolvers::ResolvedValue,
        scalars::PossibleScalar,
        MetaField, MetaType,
    },
    response::ResponseNode,
};

use super::{
    introspection::{resolve_schema_field, resolve_type_field},
    list::resolve_list,
    resolve_container,
};

/// Resolve one field of a selection set into its response node.
///
/// A failing nullable field records its error and yields null; a failing
/// non-nullable field propagates, nulling out the nearest nullable
/// ancestor instead.
// Boxed: fields recurse through their sub-selections' containers.
#[async_recursion]
pub(crate) async fn resolve_field(
    ctx: &ContextField<'_>,
    parent_value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    let field_name = ctx.item.node.name.node.as_str();

    // The introspection entry points exist on the query root only; deeper
    // selection levels treat the names as ordinary (unknown) fields.
    let at_root = ctx.path.segments().len() == 1;
    if at_root && (field_name == "__schema" || field_name == "__type") {
        if ctx.registry().disable_introspection {
            return Err(ctx.set_error_path(ServerError::new(
                "Unauthorized for introspection.",
                Some(ctx.item.pos),
            )));
        }
        let result = match field_name {
            "__schema" => resolve_schema_field(ctx).await,
            _ => resolve_type_field(ctx).await,
        };
        return result.map_err(|error| ctx.set_error_path(error));
    }

    let Some(field) = ctx.parent_type.field(field_name) else {
        // An unknown field fails its own slot without aborting siblings.
        let error = ctx.set_error_path(ServerError::new(
            format!(
                "Unknown field \"{field_name}\" on type \"{}\"",
                ctx.parent_type.name()
            ),
            Some(ctx.item.pos),
        ));
        ctx.add_error(error);
        return Ok(ResponseNode::Null);
    };

    tracing::trace!(
        target: "quill",
        "resolving field {} on {}",
        field.name,
        ctx.parent_type.name(),
    );

    let result = resolve_field_inner(ctx, field, parent_value)
        .await
        .map_err(|error| ctx.set_error_path(error));

    match result {
        Ok(node) => Ok(node),
        Err(error) if field.ty.is_nullable() => {
            ctx.add_error(error);
            Ok(ResponseNode::Null)
        }
        Err(error) => Err(error),
    }
}

async fn resolve_field_inner<'a>(
    ctx: &ContextField<'a>,
    field: &'a MetaField,
    parent_value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    if ctx.is_cancelled() {
        return Err(ServerError::new(
            "Query execution was cancelled",
            Some(ctx.item.pos),
        ));
    }

    let args = coerce_arguments(
        ctx.registry(),
        &field.args,
        &ctx.item.node.arguments,
        ctx.item.pos,
    )?;

    let resolved = field
        .resolver
        .resolve(parent_value, &args)
        .map_err(|error| error.into_server_error(ctx.item.pos))?;

    match classify(ctx, field)? {
        FieldShape::List(inner_ty) => resolve_list(ctx, field, inner_ty, resolved).await,
        FieldShape::Leaf(scalar_name) => resolve_leaf(ctx, field, scalar_name, resolved),
        FieldShape::Composite(ty) => resolve_composite(ctx, field, ty, resolved).await,
    }
}

/// How a field's declared return type is resolved.
enum FieldShape<'a> {
    /// A scalar leaf; the resolved value is serialized directly.
    Leaf(&'a str),
    /// A composite; the sub-selection runs against the resolved value.
    Composite(&'a MetaType),
    /// A list; each item resolves against the named inner type.
    List(&'a MetaType),
}

fn classify<'a>(ctx: &ContextField<'a>, field: &'a MetaField) -> ServerResult<FieldShape<'a>> {
    let registry = &ctx.schema_env.registry;
    let named = registry
        .lookup_type(field.ty.named_type())
        .map_err(|error| ServerError::new(error.to_string(), Some(ctx.item.pos)))?;

    if let MetaType::InputObject(_) = named {
        return Err(ServerError::new(
            format!(
                "The input type \"{}\" cannot be resolved as a field",
                named.name()
            ),
            Some(ctx.item.pos),
        ));
    }
    if field.ty.is_list() {
        return Ok(FieldShape::List(named));
    }
    if named.is_leaf() {
        return Ok(FieldShape::Leaf(field.ty.named_type()));
    }
    Ok(FieldShape::Composite(named))
}

fn resolve_leaf(
    ctx: &ContextField<'_>,
    field: &MetaField,
    scalar_name: &str,
    value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    let json = value.take();
    if json.is_null() {
        return if field.ty.is_non_null() {
            Err(non_null_error(ctx, field))
        } else {
            Ok(ResponseNode::Null)
        };
    }
    PossibleScalar::to_value(scalar_name, json)
        .map(ResponseNode::Primitive)
        .map_err(|error| error.into_server_error(ctx.item.pos))
}

async fn resolve_composite<'a>(
    ctx: &ContextField<'a>,
    field: &'a MetaField,
    ty: &'a MetaType,
    value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    if value.is_null() {
        return if field.ty.is_non_null() {
            Err(non_null_error(ctx, field))
        } else {
            Ok(ResponseNode::Null)
        };
    }
    if ctx.item.node.selection_set.node.is_empty() {
        return Err(ServerError::new(
            format!(
                "Field \"{}\" of type \"{}\" must have a selection of subfields",
                field.name, field.ty
            ),
            Some(ctx.item.pos),
        ));
    }
    let ctx_selection = ctx.with_selection_set(&ctx.item.node.selection_set, ty);
    resolve_container(&ctx_selection, value).await
}

fn non_null_error(ctx: &ContextField<'_>, field: &MetaField) -> ServerError {
    ServerError::new(
        format!(
            "A null value was resolved for the non-nullable field \"{}\"",
            field.name
        ),
        Some(ctx.item.pos),
    )
}
