//! The `__schema` and `__type` entry points.
//!
//! Both resolve a JSON description of the registry against the
//! introspection meta-types, using the ordinary container machinery.

use crate::{
    context::ContextField,
    error::{ServerError, ServerResult},
    registry::{introspection, resolvers::ResolvedValue, scalars::PossibleScalar},
    response::ResponseNode,
};

use super::resolve_container;

pub(crate) async fn resolve_schema_field(ctx: &ContextField<'_>) -> ServerResult<ResponseNode> {
    let registry = &ctx.schema_env.registry;
    let ty = registry
        .lookup_type("__Schema")
        .map_err(|error| ServerError::new(error.to_string(), Some(ctx.item.pos)))?;

    if ctx.item.node.selection_set.node.is_empty() {
        return Err(missing_selection(ctx, "__schema", "__Schema!"));
    }

    let source = ResolvedValue::new(introspection::describe(registry));
    let ctx_selection = ctx.with_selection_set(&ctx.item.node.selection_set, ty);
    resolve_container(&ctx_selection, source).await
}

pub(crate) async fn resolve_type_field(ctx: &ContextField<'_>) -> ServerResult<ResponseNode> {
    let registry = &ctx.schema_env.registry;

    let Some(name_literal) = ctx.item.node.get_argument("name") else {
        return Err(ServerError::new(
            "Argument \"name\" of required type \"String!\" was not provided",
            Some(ctx.item.pos),
        ));
    };
    let name = PossibleScalar::parse("String", name_literal.node.clone())
        .map_err(|error| error.into_server_error(name_literal.pos))?;
    let name = name
        .as_str()
        .expect("the String scalar only parses to JSON strings")
        .to_string();

    let Some(described) = registry.types.get(&name) else {
        return Ok(ResponseNode::Null);
    };
    let ty = registry
        .lookup_type("__Type")
        .map_err(|error| ServerError::new(error.to_string(), Some(ctx.item.pos)))?;

    if ctx.item.node.selection_set.node.is_empty() {
        return Err(missing_selection(ctx, "__type", "__Type"));
    }

    let source = ResolvedValue::new(introspection::describe_type(described));
    let ctx_selection = ctx.with_selection_set(&ctx.item.node.selection_set, ty);
    resolve_container(&ctx_selection, source).await
}

fn missing_selection(ctx: &ContextField<'_>, field: &str, ty: &str) -> ServerError {
    ServerError::new(
        format!("Field \"{field}\" of type \"{ty}\" must have a selection of subfields"),
        Some(ctx.item.pos),
    )
}
