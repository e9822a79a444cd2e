//! How fields produce their values.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use quill_value::Name;

use crate::error::Error;

mod resolved_value;

pub use resolved_value::ResolvedValue;

/// The signature of a host-supplied resolver callable.
///
/// Receives the parent's resolved value and the field's coerced
/// arguments, and returns the field's raw value or fails the field.
pub type ResolverFn =
    Arc<dyn Fn(&serde_json::Value, &ArgumentSet) -> Result<serde_json::Value, Error> + Send + Sync>;

/// How a field computes its value from its parent.
#[derive(Clone, Default)]
pub enum Resolver {
    /// Pass the parent value through unchanged. Useful for grouping
    /// fields whose children read off the same value.
    #[default]
    Parent,
    /// Read a fixed attribute off the parent value; absent attributes
    /// resolve to null.
    Property {
        /// The attribute to read.
        key: String,
    },
    /// Invoke a host-supplied callable.
    Function(ResolverFn),
}

impl Resolver {
    /// A resolver reading `key` off the parent value.
    pub fn property(key: impl Into<String>) -> Self {
        Resolver::Property { key: key.into() }
    }

    /// A resolver invoking the given callable.
    pub fn function(
        f: impl Fn(&serde_json::Value, &ArgumentSet) -> Result<serde_json::Value, Error>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Resolver::Function(Arc::new(f))
    }

    /// Produce the field's value from the parent's.
    pub(crate) fn resolve(
        &self,
        parent: ResolvedValue,
        args: &ArgumentSet,
    ) -> Result<ResolvedValue, Error> {
        match self {
            Resolver::Parent => Ok(parent),
            Resolver::Property { key } => Ok(parent.get_field(key).unwrap_or_default()),
            Resolver::Function(f) => f(parent.data_resolved(), args).map(ResolvedValue::new),
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Parent => f.write_str("Parent"),
            Resolver::Property { key } => f.debug_struct("Property").field("key", key).finish(),
            Resolver::Function(_) => f.write_str("Function"),
        }
    }
}

/// The coerced arguments handed to a resolver.
///
/// Nullable arguments that were omitted and carry no default are absent
/// from the set; an explicit null literal is present as JSON null.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgumentSet(IndexMap<Name, serde_json::Value>);

impl ArgumentSet {
    pub(crate) fn new(values: IndexMap<Name, serde_json::Value>) -> Self {
        Self(values)
    }

    /// Get an argument by name.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Whether an argument was bound, even to an explicit null.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns `true` if no arguments were bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of bound arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the bound arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &serde_json::Value)> {
        self.0.iter()
    }
}
