//! The executable schema: a frozen registry plus the execution entry
//! point.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use quill_ast::{ExecutableDocument, OperationType};

use crate::{
    context::{ContextSelectionSet, QueryEnv, SchemaEnv, SchemaEnvInner},
    error::ServerError,
    query_path::QueryPath,
    registry::{introspection, resolvers::ResolvedValue, Registry},
    resolver_utils::{resolve_container, resolve_container_serial},
    response::Response,
};

/// A shared flag that aborts an in-flight request.
///
/// Cancellation is cooperative: it is checked at every field boundary,
/// so fields already inside a resolver run to completion and every field
/// after the flag is set fails with a field-scoped error.
#[derive(Clone, Debug, Default)]
pub struct CancellationHandle(Arc<AtomicBool>);

impl CancellationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One request to execute: a document, the value the root fields
/// resolve against, and a cancellation handle.
#[derive(Debug)]
pub struct Request {
    /// The operation to execute.
    pub document: ExecutableDocument,
    /// The value handed to root-field resolvers as their parent.
    pub root_value: serde_json::Value,
    /// Cooperative cancellation for this request.
    pub cancellation: CancellationHandle,
}

impl Request {
    /// A request with a null root value and a fresh cancellation handle.
    pub fn new(document: ExecutableDocument) -> Self {
        Self {
            document,
            root_value: serde_json::Value::Null,
            cancellation: CancellationHandle::new(),
        }
    }

    /// Attach a root value.
    #[must_use]
    pub fn with_root_value(mut self, root_value: serde_json::Value) -> Self {
        self.root_value = root_value;
        self
    }

    /// Attach an externally held cancellation handle.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationHandle) -> Self {
        self.cancellation = cancellation;
        self
    }
}

impl From<ExecutableDocument> for Request {
    fn from(document: ExecutableDocument) -> Self {
        Request::new(document)
    }
}

/// Builds a [`Schema`] from a registry. Finishing the build registers
/// the built-in scalars and the introspection meta-types and freezes
/// the registry; the schema is immutable from then on.
pub struct SchemaBuilder {
    registry: Registry,
}

impl SchemaBuilder {
    /// Reject `__schema` and `__type` at execution time.
    #[must_use]
    pub fn disable_introspection(mut self) -> Self {
        self.registry.disable_introspection = true;
        self
    }

    /// Freeze the registry into an executable schema.
    pub fn finish(mut self) -> Schema {
        self.registry.add_builtin_scalars();
        introspection::create_introspection_types(&mut self.registry);
        Schema {
            env: SchemaEnv(Arc::new(SchemaEnvInner {
                registry: self.registry,
            })),
        }
    }
}

/// An executable schema. Cheap to clone and safe to share; every
/// execution runs against the same frozen registry.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) env: SchemaEnv,
}

impl Schema {
    /// Start building a schema from a registry.
    pub fn build(registry: Registry) -> SchemaBuilder {
        SchemaBuilder { registry }
    }

    /// Build a schema with the default settings.
    pub fn new(registry: Registry) -> Self {
        Self::build(registry).finish()
    }

    /// The frozen registry.
    pub fn registry(&self) -> &Registry {
        &self.env.registry
    }

    /// Execute one request to completion.
    ///
    /// Execution never panics on bad input: every failure surfaces in
    /// the response's error list, and the data tree reflects null
    /// propagation from wherever errors occurred.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let Request {
            document,
            root_value,
            cancellation,
        } = request.into();

        let registry = &self.env.registry;
        let root_type_name = match document.operation_type {
            OperationType::Query => registry.query_type.as_str(),
            OperationType::Mutation => match registry.mutation_type.as_deref() {
                Some(name) => name,
                None => {
                    return Response::from_errors(vec![ServerError::new(
                        "The schema does not support mutations",
                        None,
                    )]);
                }
            },
        };
        let root_type = match registry.lookup_type(root_type_name) {
            Ok(ty) => ty,
            Err(error) => {
                return Response::from_errors(vec![ServerError::new(error.to_string(), None)]);
            }
        };

        tracing::debug!(
            target: "quill",
            "executing a {} against {root_type_name}",
            document.operation_type.as_str(),
        );

        let query_env = QueryEnv::new(cancellation);
        let ctx = ContextSelectionSet {
            path: QueryPath::empty(),
            ty: root_type,
            item: &document.selection_set,
            schema_env: &self.env,
            query_env: &query_env,
        };

        let result = match document.operation_type {
            OperationType::Query => resolve_container(&ctx, ResolvedValue::new(root_value)).await,
            OperationType::Mutation => {
                resolve_container_serial(&ctx, ResolvedValue::new(root_value)).await
            }
        };

        let mut errors: Vec<ServerError> = query_env
            .errors
            .lock()
            .expect("to be able to lock the error sink")
            .drain(..)
            .collect();

        match result {
            Ok(data) => Response::new(data, errors),
            Err(error) => {
                errors.push(error);
                Response::from_errors(errors)
            }
        }
    }
}
