//! Walking a request against the registry to build the response tree.

mod container;
mod field;
mod introspection;
mod list;

pub use container::{resolve_container, resolve_container_serial};
pub(crate) use field::resolve_field;
