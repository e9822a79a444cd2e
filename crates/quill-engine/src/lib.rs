//! A runtime engine for typed, hierarchical queries.
//!
//! A host program registers named types in a [`Registry`], wires fields
//! to [`Resolver`]s, freezes the registry into a [`Schema`] and executes
//! [`Request`]s against it. Execution walks the request's selection sets
//! recursively, coercing arguments on the way in and serializing scalars
//! on the way out, and assembles a response tree in request order with
//! field-scoped errors and null propagation.
//!
//! ```
//! use quill_engine::{
//!     registry::{resolvers::Resolver, MetaField, ObjectType, Registry},
//!     ExecutableDocument, Field, Request, Schema, SelectionSet,
//! };
//!
//! # async fn example() {
//! let mut registry = Registry::default();
//! registry
//!     .register(ObjectType::new("Query").with_field(
//!         MetaField::new("hello", "String!")
//!             .with_resolver(Resolver::function(|_, _| Ok(serde_json::json!("world")))),
//!     ))
//!     .unwrap();
//!
//! let schema = Schema::new(registry);
//! let document = ExecutableDocument::query(SelectionSet::new([Field::new("hello")]));
//! let response = schema.execute(Request::new(document)).await;
//! assert!(response.is_ok());
//! # }
//! ```
//!
//! [`Registry`]: registry::Registry
//! [`Resolver`]: registry::resolvers::Resolver

pub mod coercion;
pub mod context;
pub mod registry;
pub mod resolver_utils;

mod error;
mod query_path;
mod response;
mod schema;

pub use quill_ast::{ExecutableDocument, Field, OperationType, Pos, Positioned, SelectionSet};
pub use quill_value::{ConstValue, Name};

pub use context::{ContextExt, ContextField, ContextSelectionSet, QueryEnv, SchemaEnv};
pub use error::{
    Error, InputValueError, InputValueResult, RegistryError, ServerError, ServerResult,
};
pub use query_path::{QueryPath, QueryPathSegment};
pub use response::{Response, ResponseNode};
pub use schema::{CancellationHandle, Request, Schema, SchemaBuilder};
