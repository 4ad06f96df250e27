use std::fmt;

use contracts::*;

/// Position of a node in the adjacency table of one [`crate::Graph`].
///
/// Indices are dense (`0..node_count`) and only meaningful for the graph
/// that issued them. [`crate::Graph::disjoint_union`] shifts the indices
/// of its right operand with [`NodeIdx::offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(u32);

impl NodeIdx {
    /// Wraps a raw adjacency-table position.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position for indexing per-node tables.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Index of the same node once `offset` nodes are placed in front of it.
    #[debug_ensures(ret.as_usize() == self.as_usize() + offset)]
    pub fn offset(self, offset: usize) -> Self {
        Self(self.0 + offset as u32)
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for NodeIdx {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl From<NodeIdx> for usize {
    #[inline]
    fn from(node: NodeIdx) -> Self {
        node.as_usize()
    }
}
