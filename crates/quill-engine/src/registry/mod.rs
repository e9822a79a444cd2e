//! The type registry: every named type the schema knows about.
//!
//! Types refer to each other by name, so registration order never
//! matters; a type can be registered first and have fields attached
//! later, which is how self-referential and mutually-referential types
//! are built.

use std::collections::BTreeMap;

use crate::error::RegistryError;

mod field_types;
mod fields;
mod input_value;
mod types;

pub mod introspection;
pub mod resolvers;
pub mod scalars;

pub use field_types::{MetaFieldType, WrappingType, WrappingTypeIter};
pub use fields::MetaField;
pub use input_value::MetaInputValue;
pub use types::{
    InputObjectType, InterfaceType, MetaType, ObjectType, ScalarType, TypeKind,
};

use scalars::PossibleScalar;

/// The registry of named types making up a schema.
#[derive(Clone, Debug)]
pub struct Registry {
    /// Every registered type, keyed by name.
    pub types: BTreeMap<String, MetaType>,
    /// The name of the query root type.
    pub query_type: String,
    /// The name of the mutation root type, if mutations are supported.
    pub mutation_type: Option<String>,
    /// When set, `__schema` and `__type` are rejected.
    pub disable_introspection: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            types: BTreeMap::new(),
            query_type: "Query".to_string(),
            mutation_type: None,
            disable_introspection: false,
        }
    }
}

impl Registry {
    /// Create a registry whose query root is named `query_type`.
    pub fn new(query_type: impl Into<String>) -> Self {
        Self {
            query_type: query_type.into(),
            ..Default::default()
        }
    }

    /// Register a named type. Names are registered exactly once.
    pub fn register(&mut self, ty: impl Into<MetaType>) -> Result<(), RegistryError> {
        let ty = ty.into();
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        self.types.insert(name, ty);
        Ok(())
    }

    /// Look up a type by name.
    pub fn lookup_type(&self, name: &str) -> Result<&MetaType, RegistryError> {
        self.types
            .get(name)
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    /// Attach a field to an already-registered object or interface.
    ///
    /// This is the second half of two-phase construction: register the
    /// type, then attach the fields that mention it.
    pub fn attach_field(&mut self, type_name: &str, field: MetaField) -> Result<(), RegistryError> {
        match self.types.get_mut(type_name) {
            Some(MetaType::Object(object)) => {
                object.fields.insert(field.name.clone(), field);
                Ok(())
            }
            Some(MetaType::Interface(interface)) => {
                interface.fields.insert(field.name.clone(), field);
                Ok(())
            }
            Some(other) => Err(RegistryError::UnexpectedKind {
                name: other.name().to_string(),
                expected: "an object or interface type",
            }),
            None => Err(RegistryError::UnknownType(type_name.to_string())),
        }
    }

    /// Attach an input field to an already-registered input object.
    pub fn attach_input_field(
        &mut self,
        type_name: &str,
        field: MetaInputValue,
    ) -> Result<(), RegistryError> {
        match self.types.get_mut(type_name) {
            Some(MetaType::InputObject(input_object)) => {
                input_object.input_fields.insert(field.name.clone(), field);
                Ok(())
            }
            Some(other) => Err(RegistryError::UnexpectedKind {
                name: other.name().to_string(),
                expected: "an input object type",
            }),
            None => Err(RegistryError::UnknownType(type_name.to_string())),
        }
    }

    /// Register the built-in scalars, skipping any the host already
    /// registered under the same name.
    pub(crate) fn add_builtin_scalars(&mut self) {
        for name in PossibleScalar::NAMES {
            self.types
                .entry(name.to_string())
                .or_insert_with(|| MetaType::Scalar(ScalarType::new(name)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::default();
        registry.register(ObjectType::new("Person")).unwrap();

        assert_eq!(
            registry.register(ObjectType::new("Person")),
            Err(RegistryError::DuplicateType("Person".to_string()))
        );
    }

    #[test]
    fn lookup_of_unregistered_type_fails() {
        let registry = Registry::default();
        assert_eq!(
            registry.lookup_type("Ghost").err(),
            Some(RegistryError::UnknownType("Ghost".to_string()))
        );
    }

    #[test]
    fn two_phase_construction_supports_cycles() {
        let mut registry = Registry::default();
        registry.register(ObjectType::new("Person")).unwrap();
        registry
            .attach_field("Person", MetaField::new("friend", "Person"))
            .unwrap();
        registry
            .attach_field("Person", MetaField::new("name", "String!"))
            .unwrap();

        let person = registry.lookup_type("Person").unwrap();
        assert_eq!(
            person.field("friend").unwrap().ty.named_type(),
            "Person"
        );
    }

    #[test]
    fn fields_cannot_attach_to_scalars() {
        let mut registry = Registry::default();
        registry.register(ScalarType::new("Instant")).unwrap();

        assert!(matches!(
            registry.attach_field("Instant", MetaField::new("x", "Int")),
            Err(RegistryError::UnexpectedKind { .. })
        ));
    }

    #[test]
    fn builtin_scalars_do_not_clobber_host_types() {
        let mut registry = Registry::default();
        registry
            .register(ScalarType::new("ID").with_description("host override"))
            .unwrap();
        registry.add_builtin_scalars();

        assert_eq!(
            registry.lookup_type("ID").unwrap().description(),
            Some("host override")
        );
        assert!(registry.lookup_type("Float").is_ok());
    }
}
