//! The kinds of named types a schema can register.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;

use super::{fields::MetaField, input_value::MetaInputValue};

/// A named type registered in a [`Registry`](super::Registry).
#[derive(Clone, Debug)]
pub enum MetaType {
    /// A leaf type with engine-defined coercion rules.
    Scalar(ScalarType),
    /// A composite output type with named fields.
    Object(ObjectType),
    /// An abstract composite type; resolved like an object.
    Interface(InterfaceType),
    /// A composite input type, usable only in argument position.
    InputObject(InputObjectType),
}

impl MetaType {
    /// The name of the type.
    pub fn name(&self) -> &str {
        match self {
            MetaType::Scalar(inner) => &inner.name,
            MetaType::Object(inner) => &inner.name,
            MetaType::Interface(inner) => &inner.name,
            MetaType::InputObject(inner) => &inner.name,
        }
    }

    /// The description of the type, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            MetaType::Scalar(inner) => inner.description.as_deref(),
            MetaType::Object(inner) => inner.description.as_deref(),
            MetaType::Interface(inner) => inner.description.as_deref(),
            MetaType::InputObject(inner) => inner.description.as_deref(),
        }
    }

    /// The kind of the type.
    pub fn kind(&self) -> TypeKind {
        match self {
            MetaType::Scalar(_) => TypeKind::Scalar,
            MetaType::Object(_) => TypeKind::Object,
            MetaType::Interface(_) => TypeKind::Interface,
            MetaType::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// The output fields of the type, for objects and interfaces.
    pub fn fields(&self) -> Option<&IndexMap<String, MetaField>> {
        match self {
            MetaType::Object(inner) => Some(&inner.fields),
            MetaType::Interface(inner) => Some(&inner.fields),
            _ => None,
        }
    }

    /// Look up an output field by name.
    pub fn field(&self, name: &str) -> Option<&MetaField> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// The input fields of the type, for input objects.
    pub fn input_fields(&self) -> Option<&IndexMap<String, MetaInputValue>> {
        match self {
            MetaType::InputObject(inner) => Some(&inner.input_fields),
            _ => None,
        }
    }

    /// Whether the type has output fields of its own.
    pub fn is_composite(&self) -> bool {
        matches!(self, MetaType::Object(_) | MetaType::Interface(_))
    }

    /// Whether the type is a response leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, MetaType::Scalar(_))
    }

    /// Whether the type may appear in argument position.
    pub fn is_input(&self) -> bool {
        matches!(self, MetaType::Scalar(_) | MetaType::InputObject(_))
    }
}

/// The kind of a [`MetaType`], as reported by introspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    InputObject,
}

impl TypeKind {
    /// The introspection spelling of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::InputObject => "INPUT_OBJECT",
        }
    }
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar type. Coercion behavior is keyed off the name; see
/// [`scalars`](super::scalars).
#[derive(Clone, Debug)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An object type: a named collection of output fields.
#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    /// The fields, in declaration order.
    pub fields: IndexMap<String, MetaField>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a field.
    #[must_use]
    pub fn with_field(mut self, field: MetaField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }
}

/// An interface type. Execution treats it like an object; membership is
/// recorded in `possible_types` for introspection.
#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, MetaField>,
    /// Names of the object types implementing this interface.
    pub possible_types: Vec<String>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            possible_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: MetaField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    #[must_use]
    pub fn with_possible_type(mut self, name: impl Into<String>) -> Self {
        self.possible_types.push(name.into());
        self
    }
}

/// An input object type: a named collection of input fields.
#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    /// The input fields, in declaration order.
    pub input_fields: IndexMap<String, MetaInputValue>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare an input field.
    #[must_use]
    pub fn with_input_field(mut self, field: MetaInputValue) -> Self {
        self.input_fields.insert(field.name.clone(), field);
        self
    }
}

impl From<ScalarType> for MetaType {
    fn from(ty: ScalarType) -> Self {
        MetaType::Scalar(ty)
    }
}

impl From<ObjectType> for MetaType {
    fn from(ty: ObjectType) -> Self {
        MetaType::Object(ty)
    }
}

impl From<InterfaceType> for MetaType {
    fn from(ty: InterfaceType) -> Self {
        MetaType::Interface(ty)
    }
}

impl From<InputObjectType> for MetaType {
    fn from(ty: InputObjectType) -> Self {
        MetaType::InputObject(ty)
    }
}
