//! The response tree and the serialized query result.

use indexmap::IndexMap;

use serde::{Serialize, Serializer};

use quill_value::{ConstValue, Name};

use crate::error::ServerError;

/// One node of the response tree.
///
/// Containers keep their entries in request order, so the serialized
/// response mirrors the shape of the request.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseNode {
    /// An explicit null, from a null value or a nulled-out error slot.
    Null,
    /// A leaf value produced by scalar serialization.
    Primitive(ConstValue),
    /// A list of nodes.
    List(Vec<ResponseNode>),
    /// A container of response-key/node entries, in request order.
    Container(IndexMap<Name, ResponseNode>),
}

impl ResponseNode {
    /// Whether this node is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ResponseNode::Null)
    }

    /// Convert the tree into plain JSON.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            ResponseNode::Null => serde_json::Value::Null,
            ResponseNode::Primitive(value) => value.into_json(),
            ResponseNode::List(items) => {
                serde_json::Value::Array(items.into_iter().map(ResponseNode::into_json).collect())
            }
            ResponseNode::Container(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(key, node)| (key.as_str().to_string(), node.into_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ResponseNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseNode::Null => serializer.serialize_unit(),
            ResponseNode::Primitive(value) => value.serialize(serializer),
            ResponseNode::List(items) => items.serialize(serializer),
            ResponseNode::Container(entries) => entries.serialize(serializer),
        }
    }
}

/// The result of executing a request: the data tree plus any errors
/// collected along the way.
#[derive(Debug, Serialize)]
pub struct Response {
    /// The response data; null when an error reached the root.
    pub data: ResponseNode,
    /// Field-scoped errors, in the order they were recorded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServerError>,
}

impl Response {
    /// A response carrying data and any collected errors.
    pub fn new(data: ResponseNode, errors: Vec<ServerError>) -> Self {
        Self { data, errors }
    }

    /// A response that failed before producing any data.
    pub fn from_errors(errors: Vec<ServerError>) -> Self {
        Self {
            data: ResponseNode::Null,
            errors,
        }
    }

    /// Whether the response carries no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
