//! Execution contexts threaded through resolution.
//!
//! A context pairs the piece of the request currently being resolved
//! with the two environments that outlive it: the schema environment
//! (the frozen registry) and the query environment (per-request state
//! such as the error sink and the cancellation flag). Contexts are cheap
//! to clone; they hold references and a path.

use std::sync::Mutex;

use quill_ast::{Field, Positioned, SelectionSet};

use crate::{
    error::ServerError,
    query_path::{QueryPath, QueryPathSegment},
    registry::{MetaType, Registry},
    schema::CancellationHandle,
};

/// The part of the environment fixed when the schema was built.
#[derive(Debug)]
pub struct SchemaEnvInner {
    /// The frozen type registry.
    pub registry: Registry,
}

/// Shared handle to the schema environment.
#[derive(Clone, Debug)]
pub struct SchemaEnv(pub(crate) std::sync::Arc<SchemaEnvInner>);

impl std::ops::Deref for SchemaEnv {
    type Target = SchemaEnvInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The per-request part of the environment.
#[derive(Debug)]
pub struct QueryEnvInner {
    /// Field-scoped errors collected while resolving.
    pub errors: Mutex<Vec<ServerError>>,
    /// Checked at every field boundary; when set, remaining fields fail.
    pub cancellation: CancellationHandle,
}

/// Shared handle to the query environment.
#[derive(Clone, Debug)]
pub struct QueryEnv(pub(crate) std::sync::Arc<QueryEnvInner>);

impl QueryEnv {
    pub(crate) fn new(cancellation: CancellationHandle) -> Self {
        Self(std::sync::Arc::new(QueryEnvInner {
            errors: Mutex::new(Vec::new()),
            cancellation,
        }))
    }
}

impl std::ops::Deref for QueryEnv {
    type Target = QueryEnvInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Context while resolving a selection set against a composite type.
#[derive(Clone, Debug)]
pub struct ContextSelectionSet<'a> {
    /// Path from the response root to this selection set.
    pub path: QueryPath,
    /// The composite type the selections apply to.
    pub ty: &'a MetaType,
    /// The selection set being resolved.
    pub item: &'a Positioned<SelectionSet>,
    /// The schema environment.
    pub schema_env: &'a SchemaEnv,
    /// The query environment.
    pub query_env: &'a QueryEnv,
}

impl<'a> ContextSelectionSet<'a> {
    /// Narrow to one field of this selection set.
    pub fn with_field(&'a self, field: &'a Positioned<Field>) -> ContextField<'a> {
        ContextField {
            path: self
                .path
                .child(QueryPathSegment::Field(field.node.response_key().node.clone())),
            parent_type: self.ty,
            item: field,
            schema_env: self.schema_env,
            query_env: self.query_env,
        }
    }
}

/// Context while resolving one field.
#[derive(Clone, Debug)]
pub struct ContextField<'a> {
    /// Path from the response root to this field's slot.
    pub path: QueryPath,
    /// The composite type the field was selected on.
    pub parent_type: &'a MetaType,
    /// The field being resolved.
    pub item: &'a Positioned<Field>,
    /// The schema environment.
    pub schema_env: &'a SchemaEnv,
    /// The query environment.
    pub query_env: &'a QueryEnv,
}

impl<'a> ContextField<'a> {
    /// Descend into this field's sub-selection against `ty`.
    pub fn with_selection_set(
        &'a self,
        selection_set: &'a Positioned<SelectionSet>,
        ty: &'a MetaType,
    ) -> ContextSelectionSet<'a> {
        ContextSelectionSet {
            path: self.path.clone(),
            ty,
            item: selection_set,
            schema_env: self.schema_env,
            query_env: self.query_env,
        }
    }
}

/// Shared behavior of the context types.
pub trait ContextExt {
    /// The path from the response root to the current slot.
    fn path(&self) -> &QueryPath;

    /// The schema environment.
    fn schema_env(&self) -> &SchemaEnv;

    /// The query environment.
    fn query_env(&self) -> &QueryEnv;

    /// The type registry.
    fn registry(&self) -> &Registry {
        &self.schema_env().registry
    }

    /// Record a field-scoped error without failing the caller.
    fn add_error(&self, error: ServerError) {
        self.query_env()
            .errors
            .lock()
            .expect("to be able to lock the error sink")
            .push(error);
    }

    /// Attach the current path to an error that has none yet.
    fn set_error_path(&self, mut error: ServerError) -> ServerError {
        if error.path.is_empty() {
            error.path = self.path().segments().to_vec();
        }
        error
    }

    /// Whether the request has been cancelled.
    fn is_cancelled(&self) -> bool {
        self.query_env().cancellation.is_cancelled()
    }
}

impl ContextExt for ContextSelectionSet<'_> {
    fn path(&self) -> &QueryPath {
        &self.path
    }

    fn schema_env(&self) -> &SchemaEnv {
        self.schema_env
    }

    fn query_env(&self) -> &QueryEnv {
        self.query_env
    }
}

impl ContextExt for ContextField<'_> {
    fn path(&self) -> &QueryPath {
        &self.path
    }

    fn schema_env(&self) -> &SchemaEnv {
        self.schema_env
    }

    fn query_env(&self) -> &QueryEnv {
        self.query_env
    }
}
