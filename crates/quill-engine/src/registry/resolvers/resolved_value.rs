use std::sync::Arc;

use quill_value::Name;

use crate::query_path::QueryPathSegment;

static NULL: serde_json::Value = serde_json::Value::Null;

/// The output of a resolver, as handed from a field to its children.
///
/// Wraps the resolver's JSON in an `Arc` plus a path into it, so the many
/// children and list items that read off one parent value share a single
/// allocation instead of cloning subtrees.
#[derive(Clone, Debug)]
pub struct ResolvedValue {
    /// The root of the JSON the resolver returned.
    data_root: Arc<serde_json::Value>,
    /// The path from the root to the value this instance refers to.
    data_path: Vec<QueryPathSegment>,
}

impl Default for ResolvedValue {
    fn default() -> Self {
        Self::null()
    }
}

impl ResolvedValue {
    /// Wrap a freshly resolved value.
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            data_root: Arc::new(value),
            data_path: Vec::new(),
        }
    }

    /// A resolved null.
    pub fn null() -> Self {
        Self::new(serde_json::Value::Null)
    }

    /// The value this instance refers to. Paths that no longer exist in
    /// the root resolve to null.
    pub fn data_resolved(&self) -> &serde_json::Value {
        let mut current = self.data_root.as_ref();
        for segment in &self.data_path {
            let next = match segment {
                QueryPathSegment::Field(name) => current.get(name.as_str()),
                QueryPathSegment::Index(index) => current.get(index),
            };
            match next {
                Some(value) => current = value,
                None => return &NULL,
            }
        }
        current
    }

    /// Whether the referred-to value is null.
    pub fn is_null(&self) -> bool {
        self.data_resolved().is_null()
    }

    /// Narrow to the named attribute, sharing the root allocation.
    /// Returns `None` if the value is not an object with that key.
    pub fn get_field(&self, name: &str) -> Option<ResolvedValue> {
        if !self
            .data_resolved()
            .as_object()
            .is_some_and(|object| object.contains_key(name))
        {
            return None;
        }
        let mut child = self.clone();
        child.data_path.push(QueryPathSegment::Field(Name::new(name)));
        Some(child)
    }

    /// Narrow to the item at `index`, sharing the root allocation.
    /// Returns `None` if the value is not an array that long.
    pub fn get_index(&self, index: usize) -> Option<ResolvedValue> {
        if !self
            .data_resolved()
            .as_array()
            .is_some_and(|array| index < array.len())
        {
            return None;
        }
        let mut child = self.clone();
        child.data_path.push(QueryPathSegment::Index(index));
        Some(child)
    }

    /// Iterate the items of an array value. Returns `None` for non-arrays.
    pub fn item_iter(&self) -> Option<impl Iterator<Item = ResolvedValue> + '_> {
        let len = self.data_resolved().as_array()?.len();
        Some((0..len).map(|index| {
            self.get_index(index)
                .unwrap_or_else(ResolvedValue::null)
        }))
    }

    /// Take the referred-to value out, cloning only when the root is
    /// shared or the path is narrowed.
    pub fn take(self) -> serde_json::Value {
        if self.data_path.is_empty() {
            Arc::try_unwrap(self.data_root).unwrap_or_else(|shared| shared.as_ref().clone())
        } else {
            self.data_resolved().clone()
        }
    }
}
