//! Query AST node types.
//!
//! The engine never parses text: an external parser (or the host program
//! directly) supplies an [`ExecutableDocument`] built from these nodes. The
//! constructors on [`Field`] and [`SelectionSet`] exist so hosts and tests
//! can assemble documents without a parser.

mod pos;

use serde::{Deserialize, Serialize};

use quill_value::{ConstValue, Name};

pub use pos::{Pos, Positioned};

/// The type of an operation; `query` or `mutation`.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
pub enum OperationType {
    /// A query. Root fields may be resolved in parallel.
    #[default]
    Query,
    /// A mutation. Root fields are resolved in request order, serially.
    Mutation,
}

impl OperationType {
    /// Operation type as str.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// An executable document: a single operation with its selection set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutableDocument {
    /// The type of the operation.
    pub operation_type: OperationType,
    /// The operation's top-level selection set.
    pub selection_set: Positioned<SelectionSet>,
}

impl ExecutableDocument {
    /// Create a query document from a selection set.
    pub fn query(selection_set: SelectionSet) -> Self {
        Self {
            operation_type: OperationType::Query,
            selection_set: Positioned::pos_free(selection_set),
        }
    }

    /// Create a mutation document from a selection set.
    pub fn mutation(selection_set: SelectionSet) -> Self {
        Self {
            operation_type: OperationType::Mutation,
            selection_set: Positioned::pos_free(selection_set),
        }
    }
}

/// A set of fields requested on a type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    /// The fields, in request order.
    pub items: Vec<Positioned<Field>>,
}

impl SelectionSet {
    /// Create a selection set from fields, attaching default positions.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            items: fields.into_iter().map(Positioned::pos_free).collect(),
        }
    }

    /// Returns `true` if no fields were requested.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Field> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        SelectionSet::new(iter)
    }
}

/// A single requested field, with optional alias, arguments and sub-selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// The optional field alias.
    pub alias: Option<Positioned<Name>>,
    /// The name of the field.
    pub name: Positioned<Name>,
    /// The arguments to the field, in request order.
    pub arguments: Vec<(Positioned<Name>, Positioned<ConstValue>)>,
    /// The field's sub-selection, empty for leaf fields.
    pub selection_set: Positioned<SelectionSet>,
}

impl Field {
    /// Create a field with no alias, arguments or sub-selection.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            alias: None,
            name: Positioned::pos_free(Name::new(name)),
            arguments: Vec::new(),
            selection_set: Positioned::pos_free(SelectionSet::default()),
        }
    }

    /// Attach an alias.
    #[must_use]
    pub fn aliased(mut self, alias: impl AsRef<str>) -> Self {
        self.alias = Some(Positioned::pos_free(Name::new(alias)));
        self
    }

    /// Append an argument.
    #[must_use]
    pub fn argument(mut self, name: impl AsRef<str>, value: impl Into<ConstValue>) -> Self {
        self.arguments.push((
            Positioned::pos_free(Name::new(name)),
            Positioned::pos_free(value.into()),
        ));
        self
    }

    /// Attach a sub-selection.
    #[must_use]
    pub fn with_selection_set(mut self, selection_set: SelectionSet) -> Self {
        self.selection_set = Positioned::pos_free(selection_set);
        self
    }

    /// Get the argument with the given name, if any.
    pub fn get_argument(&self, name: &str) -> Option<&Positioned<ConstValue>> {
        self.arguments
            .iter()
            .find(|(key, _)| key.node == name)
            .map(|(_, value)| value)
    }

    /// The response key of this field: the alias if present, else the name.
    pub fn response_key(&self) -> &Positioned<Name> {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}
