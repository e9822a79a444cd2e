//! Resolving selection sets against composite types.

use std::{future::Future, pin::Pin};

use indexmap::IndexMap;

use quill_value::{ConstValue, Name};

use crate::{
    context::{ContextExt, ContextSelectionSet},
    error::ServerResult,
    registry::resolvers::ResolvedValue,
    response::ResponseNode,
};

use super::resolve_field;

type BoxFieldFuture<'a> = Pin<Box<dyn Future<Output = ServerResult<(Name, ResponseNode)>> + Send + 'a>>;

/// Resolve a selection set's fields concurrently.
pub async fn resolve_container(
    ctx: &ContextSelectionSet<'_>,
    parent_value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    resolve_container_inner(ctx, true, parent_value).await
}

/// Resolve a selection set's fields one at a time, in request order.
/// Mutation roots use this; their side effects must not race.
pub async fn resolve_container_serial(
    ctx: &ContextSelectionSet<'_>,
    parent_value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    resolve_container_inner(ctx, false, parent_value).await
}

async fn resolve_container_inner<'a>(
    ctx: &ContextSelectionSet<'a>,
    parallel: bool,
    parent_value: ResolvedValue,
) -> ServerResult<ResponseNode> {
    tracing::trace!(
        target: "quill",
        "resolving selection set on {} at {}",
        ctx.ty.name(),
        ctx.path,
    );

    let mut futures: Vec<BoxFieldFuture<'a>> = Vec::with_capacity(ctx.item.node.items.len());
    for field in &ctx.item.node.items {
        let key = field.node.response_key().node.clone();

        if field.node.name.node == "__typename" {
            let type_name = ctx.ty.name().to_string();
            futures.push(Box::pin(async move {
                Ok((key, ResponseNode::Primitive(ConstValue::String(type_name))))
            }));
            continue;
        }

        let ctx = ctx.clone();
        let parent_value = parent_value.clone();
        futures.push(Box::pin(async move {
            let ctx_field = ctx.with_field(field);
            let node = resolve_field(&ctx_field, parent_value).await?;
            Ok((key, node))
        }));
    }

    let results = if parallel {
        futures_util::future::join_all(futures).await
    } else {
        let mut results = Vec::with_capacity(futures.len());
        for future in futures {
            results.push(future.await);
        }
        results
    };

    // Every sibling has finished by now; keep the first bubbling error
    // for the caller and record the rest so none are lost.
    let mut entries = IndexMap::with_capacity(results.len());
    let mut first_error = None;
    for result in results {
        match result {
            Ok((key, node)) => {
                entries.insert(key, node);
            }
            Err(error) if first_error.is_none() => first_error = Some(error),
            Err(error) => ctx.add_error(error),
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(ResponseNode::Container(entries)),
    }
}
