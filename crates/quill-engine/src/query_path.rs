//! Paths into the response being built.

use std::fmt::{self, Display, Formatter, Write};

use serde::Serialize;

use quill_value::Name;

/// A segment of a [`QueryPath`]: a response key or a list index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryPathSegment {
    /// The response key of a field.
    Field(Name),
    /// An index into a list.
    Index(usize),
}

/// The path from the response root to the slot currently being resolved.
///
/// Each nested field appends its response key; each list item appends its
/// index. Errors raised while resolving a slot carry the slot's path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPath(Vec<QueryPathSegment>);

impl QueryPath {
    /// The empty path, i.e. the response root.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A copy of this path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: QueryPathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }

    /// The segments of the path, root first.
    pub fn segments(&self) -> &[QueryPathSegment] {
        &self.0
    }

    /// The final segment, if the path is not the root.
    pub fn last(&self) -> Option<&QueryPathSegment> {
        self.0.last()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the segments out of the path.
    pub fn into_segments(self) -> Vec<QueryPathSegment> {
        self.0
    }
}

impl Display for QueryPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                QueryPathSegment::Field(name) => {
                    if i != 0 {
                        f.write_char('.')?;
                    }
                    f.write_str(name)?;
                }
                QueryPathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl IntoIterator for QueryPath {
    type Item = QueryPathSegment;
    type IntoIter = std::vec::IntoIter<QueryPathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<QueryPath> for Vec<QueryPathSegment> {
    fn from(path: QueryPath) -> Self {
        path.0
    }
}
