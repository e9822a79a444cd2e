use std::fmt;

use serde::{Deserialize, Serialize};

/// A source position: line and column, both one-based.
///
/// Positions are attached by whichever parser produced the document; a
/// document assembled programmatically carries the zero default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    /// One-based line number.
    pub line: usize,
    /// One-based column number.
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An AST node paired with its source position.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Positioned<T: ?Sized> {
    /// The position of the node.
    pub pos: Pos,
    /// The node itself.
    pub node: T,
}

impl<T> Positioned<T> {
    /// Create a new positioned node.
    pub const fn new(node: T, pos: Pos) -> Self {
        Self { pos, node }
    }

    /// Wrap a node with the default position, for programmatic construction.
    pub fn pos_free(node: T) -> Self {
        Self {
            pos: Pos::default(),
            node,
        }
    }

    /// Take the node, dropping the position.
    pub fn into_inner(self) -> T {
        self.node
    }

    /// Map the node, keeping the position.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Positioned<U> {
        Positioned {
            pos: self.pos,
            node: f(self.node),
        }
    }
}

impl<T: PartialEq> PartialEq for Positioned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T: Eq> Eq for Positioned<T> {}

impl<T: fmt::Display> fmt::Display for Positioned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}
