//! Enumeration of connected induced vertex subsets.
//!
//! The enumerator keeps the node set partitioned into `included`,
//! `excluded` and `undecided` nodes. Without a component it seeds one from
//! the lowest undecided node; with a component it only ever branches on an
//! undecided neighbor of it, so every included set is connected by
//! construction. Once no undecided neighbor is left the component is sealed
//! and reported immediately. Each nonempty connected subset is reported
//! exactly once.
//!
//! ```ignore
//! use cis_common::Graph;
//! use cis_subsets::ConnectedSubsetEnumerator;
//!
//! let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
//! assert_eq!(ConnectedSubsetEnumerator::new(&g).count(), 6);
//! ```

mod brute;
mod search;
mod state;

pub use brute::{BRUTE_FORCE_LIMIT, brute_force_count};
pub use state::NodeState;

use cis_common::{Graph, NodeIdx};
use thiserror::Error;
use tracing::debug;

use crate::state::Partition;

/// Errors raised by the counting helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubsetError {
    /// The graph is too large for exhaustive subset testing.
    #[error("Graph with {node_count} nodes exceeds the brute force limit of {limit}")]
    TooLarge {
        /// Nodes in the graph.
        node_count: usize,
        /// Largest graph the brute force counter accepts.
        limit: usize,
    },
}

/// A connected induced subset, as sorted node indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectedSubset {
    nodes: Vec<NodeIdx>,
}

impl ConnectedSubset {
    fn from_unsorted(nodes: &[NodeIdx]) -> Self {
        let mut nodes = nodes.to_vec();
        nodes.sort_unstable();
        Self { nodes }
    }

    /// Member nodes in ascending order.
    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    /// Whether `node` is a member.
    pub fn contains(&self, node: NodeIdx) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    /// Number of members. Never zero.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the subset has no members. The enumerator never reports one.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Stateless enumerator of the connected induced subsets of one graph.
///
/// Every call runs a fresh search with its own partition, so an enumerator
/// can be shared freely. A single search runs to completion; recursion
/// depth is bounded by the node count.
#[derive(Clone, Copy, Debug)]
pub struct ConnectedSubsetEnumerator<'g> {
    graph: &'g Graph,
}

impl<'g> ConnectedSubsetEnumerator<'g> {
    /// Creates an enumerator over `graph`.
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Calls `visit` once per nonempty connected induced subset.
    ///
    /// Members are passed in inclusion order, not sorted. The slice is only
    /// valid for the duration of the call.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&[NodeIdx]),
    {
        let mut st = Partition::new(self.graph.node_count());
        search::backtrack(self.graph, &mut st, &mut visit);
    }

    /// Collects every nonempty connected induced subset.
    pub fn collect(&self) -> Vec<ConnectedSubset> {
        let mut out = Vec::new();
        self.for_each(|members| out.push(ConnectedSubset::from_unsorted(members)));
        debug!(
            "enumerated {} connected subsets over {} nodes",
            out.len(),
            self.graph.node_count()
        );
        out
    }

    /// Number of nonempty connected induced subsets (#CIS).
    pub fn count(&self) -> u64 {
        let mut count = 0u64;
        self.for_each(|_| count += 1);
        debug!(
            "counted {} connected subsets over {} nodes",
            count,
            self.graph.node_count()
        );
        count
    }
}

/// Calls `visit` once per nonempty connected induced subset of `graph`.
pub fn for_each_connected_subset<F>(graph: &Graph, visit: F)
where
    F: FnMut(&[NodeIdx]),
{
    ConnectedSubsetEnumerator::new(graph).for_each(visit);
}

/// #CIS of `graph`.
pub fn count_connected_subsets(graph: &Graph) -> u64 {
    ConnectedSubsetEnumerator::new(graph).count()
}

/// The exponent `c` in `#CIS = 2^(c * n)`.
///
/// Returns `0.0` for the empty graph.
pub fn cis_exponent(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    let cis = count_connected_subsets(graph) as f64;
    cis.log2() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_path_subsets() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut subsets = ConnectedSubsetEnumerator::new(&g).collect();
        subsets.sort();

        let as_raw: Vec<Vec<usize>> = subsets
            .iter()
            .map(|s| s.nodes().iter().map(|n| n.as_usize()).collect())
            .collect();
        assert_eq!(
            as_raw,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 1, 2],
                vec![1],
                vec![1, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn test_edgeless_graph_counts_singletons() {
        let g = Graph::with_nodes(7);
        assert_eq!(count_connected_subsets(&g), 7);
    }

    #[test]
    fn test_cis_exponent_of_complete_graph() {
        let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let expected = 3f64.log2() / 2.0;
        assert!((cis_exponent(&g) - expected).abs() < 1e-12);
        assert_eq!(cis_exponent(&Graph::new()), 0.0);
    }
}
