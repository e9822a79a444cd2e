use indexmap::IndexMap;

use super::{
    field_types::MetaFieldType,
    input_value::MetaInputValue,
    resolvers::Resolver,
};

/// A field on an object or interface type.
#[derive(Clone, Debug)]
pub struct MetaField {
    /// The name of the field.
    pub name: String,
    /// An optional description.
    pub description: Option<String>,
    /// The field's arguments, in declaration order.
    pub args: IndexMap<String, MetaInputValue>,
    /// The field's return type.
    pub ty: MetaFieldType,
    /// How the field produces its value.
    pub resolver: Resolver,
}

impl MetaField {
    /// Create a field that reads the attribute of the same name off its
    /// parent value. Attach a different [`Resolver`] with
    /// [`with_resolver`](Self::with_resolver).
    pub fn new(name: impl Into<String>, ty: impl Into<MetaFieldType>) -> Self {
        let name = name.into();
        MetaField {
            resolver: Resolver::property(&name),
            name,
            description: None,
            args: IndexMap::new(),
            ty: ty.into(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare an argument.
    #[must_use]
    pub fn with_argument(mut self, argument: MetaInputValue) -> Self {
        self.args.insert(argument.name.clone(), argument);
        self
    }

    /// Replace the resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }
}
