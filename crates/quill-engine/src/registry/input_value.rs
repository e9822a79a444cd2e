use quill_value::ConstValue;

use super::field_types::MetaFieldType;

/// The shape of one argument or input-object field: its name, its
/// expected type and an optional default.
#[derive(Clone, Debug)]
pub struct MetaInputValue {
    /// The name of the input value.
    pub name: String,
    /// An optional description.
    pub description: Option<String>,
    /// The expected type.
    pub ty: MetaFieldType,
    /// The value used when the input is omitted.
    pub default_value: Option<ConstValue>,
}

impl MetaInputValue {
    /// Create an input value with no description or default.
    pub fn new(name: impl Into<String>, ty: impl Into<MetaFieldType>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: ty.into(),
            default_value: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a default value.
    #[must_use]
    pub fn with_default(mut self, default: ConstValue) -> Self {
        self.default_value = Some(default);
        self
    }

    /// Whether the input must be provided: non-null type and no default.
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}
