//! Error types for schema construction and query execution.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use quill_ast::Pos;

use crate::query_path::QueryPathSegment;

/// A failure reported while building or mutating a [`Registry`].
///
/// Registry errors are fatal to schema construction; they are never
/// surfaced inside a query response.
///
/// [`Registry`]: crate::registry::Registry
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A type with this name has already been registered.
    #[error("a type named `{0}` has already been registered")]
    DuplicateType(String),
    /// No type with this name has been registered.
    #[error("could not find a type named `{0}`")]
    UnknownType(String),
    /// A type was used in a position its kind does not support.
    #[error("the type `{name}` was used where {expected} was expected")]
    UnexpectedKind {
        /// The name of the offending type.
        name: String,
        /// What the operation needed, e.g. "an object or interface type".
        expected: &'static str,
    },
}

/// An error raised by a resolver callable.
///
/// Carries only a message; position and path are attached by the engine
/// when it converts the error into a [`ServerError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    /// The error message.
    pub message: String,
}

impl Error {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Convert into a [`ServerError`] located at `pos`.
    pub fn into_server_error(self, pos: Pos) -> ServerError {
        ServerError::new(self.message, Some(pos))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// An error in a query, scoped to the field it occurred in.
///
/// Server errors accumulate in the response's `errors` list; `path` points
/// at the response slot the error belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServerError {
    /// An explanatory message of the error.
    pub message: String,
    /// Where the error occurred in the request document.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Pos>,
    /// The response slot the error is attached to, from the root down.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<QueryPathSegment>,
}

impl ServerError {
    /// Create a new server error with a message.
    pub fn new(message: impl Into<String>, pos: Option<Pos>) -> Self {
        Self {
            message: message.into(),
            locations: pos.map(|pos| vec![pos]).unwrap_or_default(),
            path: Vec::new(),
        }
    }
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServerError {}

/// An alias for `Result<T, ServerError>`.
pub type ServerResult<T> = Result<T, ServerError>;

/// An error rejecting an input value during scalar or argument coercion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputValueError {
    message: String,
}

impl InputValueError {
    /// A custom error message prefixed with the expected type.
    pub fn ty_custom(ty: impl Display, message: impl Display) -> Self {
        Self {
            message: format!("Invalid value for {ty}: {message}"),
        }
    }

    /// Convert into a [`ServerError`] located at `pos`.
    pub fn into_server_error(self, pos: Pos) -> ServerError {
        ServerError::new(self.message, Some(pos))
    }
}

impl Display for InputValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// An alias for `Result<T, InputValueError>`.
pub type InputValueResult<T> = Result<T, InputValueError>;
