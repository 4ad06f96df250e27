//! Simple undirected graph used for gadgets and the graphs built from them.
//!
//! Nodes are dense [`NodeIdx`] values with a printable label each. Edges are
//! unordered pairs without self loops or duplicates. Adjacency is stored as
//! sorted neighbor lists, which keeps iteration order deterministic.

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::NodeIdx;

/// Errors raised by structural graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node index that does not belong to this graph.
    #[error("Unknown node {node} (graph has {node_count} nodes)")]
    UnknownNode {
        /// The offending index.
        node: NodeIdx,
        /// Nodes in the graph.
        node_count: usize,
    },

    /// Edges from a node to itself are not allowed.
    #[error("Self loop on node {0}")]
    SelfLoop(NodeIdx),

    /// Multi-edges are not allowed.
    #[error("Duplicate edge {0} - {1}")]
    DuplicateEdge(NodeIdx, NodeIdx),

    /// Removing an edge that is not present.
    #[error("Missing edge {0} - {1}")]
    MissingEdge(NodeIdx, NodeIdx),
}

/// Undirected simple graph with labelled nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<String>,
    adjacency: Vec<Vec<NodeIdx>>,
    edge_count: usize,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `n` nodes labelled `0..n` and no edges.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::new();
        for i in 0..n {
            graph.add_node(i.to_string());
        }
        graph
    }

    /// Builds a graph on `n` nodes from a list of index pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if any pair is out of range, a self loop or a duplicate.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = Self::with_nodes(n);
        for &(u, v) in edges {
            graph.add_edge(NodeIdx::from(u), NodeIdx::from(v))?;
        }
        Ok(graph)
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeIdx {
        let idx = NodeIdx::from(self.labels.len());
        self.labels.push(label.into());
        self.adjacency.push(Vec::new());
        idx
    }

    /// Adds the undirected edge `u - v`.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for unknown endpoints, self loops and duplicate edges.
    pub fn add_edge(&mut self, u: NodeIdx, v: NodeIdx) -> Result<(), GraphError> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        if self.has_edge(u, v) {
            return Err(GraphError::DuplicateEdge(u, v));
        }

        insert_sorted(&mut self.adjacency[u.as_usize()], v);
        insert_sorted(&mut self.adjacency[v.as_usize()], u);
        self.edge_count += 1;
        Ok(())
    }

    /// Removes the undirected edge `u - v`.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for unknown endpoints or when the edge is absent.
    pub fn remove_edge(&mut self, u: NodeIdx, v: NodeIdx) -> Result<(), GraphError> {
        self.check_node(u)?;
        self.check_node(v)?;

        let Ok(pos_v) = self.adjacency[u.as_usize()].binary_search(&v) else {
            return Err(GraphError::MissingEdge(u, v));
        };
        self.adjacency[u.as_usize()].remove(pos_v);

        if let Ok(pos_u) = self.adjacency[v.as_usize()].binary_search(&u) {
            self.adjacency[v.as_usize()].remove(pos_u);
        }
        self.edge_count -= 1;
        Ok(())
    }

    /// Checks that `node` belongs to this graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] when it does not.
    pub fn check_node(&self, node: NodeIdx) -> Result<(), GraphError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Whether `node` belongs to this graph.
    pub fn contains(&self, node: NodeIdx) -> bool {
        node.as_usize() < self.labels.len()
    }

    /// Whether the edge `u - v` is present. Unknown nodes have no edges.
    pub fn has_edge(&self, u: NodeIdx, v: NodeIdx) -> bool {
        self.adjacency
            .get(u.as_usize())
            .is_some_and(|ns| ns.binary_search(&v).is_ok())
    }

    /// Sorted neighbors of `node`.
    pub fn neighbors(&self, node: NodeIdx) -> &[NodeIdx] {
        self.adjacency
            .get(node.as_usize())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of neighbors of `node`.
    pub fn degree(&self, node: NodeIdx) -> usize {
        self.neighbors(node).len()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of undirected edges.
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All node indices in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.labels.len()).map(NodeIdx::from)
    }

    /// Every edge once, as `(u, v)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + '_ {
        self.nodes().flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    /// Label of `node`, if it exists.
    pub fn label(&self, node: NodeIdx) -> Option<&str> {
        self.labels.get(node.as_usize()).map(String::as_str)
    }

    /// Finds a node by its label.
    pub fn find_by_label(&self, label: &str) -> Option<NodeIdx> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(NodeIdx::from)
    }

    /// Breadth-first reachability from `source`, returned as a visited mask.
    pub fn reachable_from(&self, source: NodeIdx) -> Vec<bool> {
        let mut visited = vec![false; self.node_count()];
        if !self.contains(source) {
            return visited;
        }

        let mut queue = VecDeque::from([source]);
        visited[source.as_usize()] = true;
        while let Some(u) = queue.pop_front() {
            for &v in self.neighbors(u) {
                if !visited[v.as_usize()] {
                    visited[v.as_usize()] = true;
                    queue.push_back(v);
                }
            }
        }
        visited
    }

    /// Whether every node is reachable from every other. The empty graph is connected.
    pub fn is_connected(&self) -> bool {
        match self.nodes().next() {
            None => true,
            Some(source) => self.reachable_from(source).into_iter().all(|seen| seen),
        }
    }

    /// Whether the subgraph induced by `members` is connected.
    ///
    /// `members[i]` says whether node `i` is part of the subset. The empty
    /// subset counts as connected, matching [`Graph::is_connected`].
    pub fn induced_is_connected(&self, members: &[bool]) -> bool {
        let Some(source) = members.iter().position(|&m| m).map(NodeIdx::from) else {
            return true;
        };

        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::from([source]);
        visited[source.as_usize()] = true;
        let mut reached = 1;
        while let Some(u) = queue.pop_front() {
            for &v in self.neighbors(u) {
                let i = v.as_usize();
                if members.get(i).copied().unwrap_or(false) && !visited[i] {
                    visited[i] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }

        reached == members.iter().filter(|&&m| m).count()
    }

    /// Places `self` and `other` side by side without connecting them.
    ///
    /// Labels are prefixed with `1.` and `2.` respectively. Nodes of `self`
    /// keep their indices; nodes of `other` are shifted by `self.node_count()`
    /// (see [`NodeIdx::offset`]).
    pub fn disjoint_union(&self, other: &Self) -> Self {
        let offset = self.node_count();
        let mut graph = Self::new();

        for label in &self.labels {
            graph.add_node(format!("1.{label}"));
        }
        for label in &other.labels {
            graph.add_node(format!("2.{label}"));
        }

        graph.adjacency[..offset].clone_from_slice(&self.adjacency);
        for (i, ns) in other.adjacency.iter().enumerate() {
            graph.adjacency[offset + i] = ns.iter().map(|v| v.offset(offset)).collect();
        }
        graph.edge_count = self.edge_count + other.edge_count;
        debug!(
            "disjoint union: {} + {} nodes, {} edges",
            offset,
            other.node_count(),
            graph.edge_count
        );
        graph
    }

    /// The graph on the same nodes whose edges are exactly the non-edges of `self`.
    pub fn complement(&self) -> Self {
        let mut graph = Self::new();
        graph.labels.clone_from(&self.labels);
        graph.adjacency = self
            .nodes()
            .map(|u| self.nodes().filter(|&v| v != u && !self.has_edge(u, v)).collect())
            .collect();
        let n = self.node_count();
        graph.edge_count = n * n.saturating_sub(1) / 2 - self.edge_count;
        debug!("complement: {} nodes, {} -> {} edges", n, self.edge_count, graph.edge_count);
        graph
    }

    /// Row-major 0/1 adjacency matrix in `[[0, 1], [1, 0]]` form, as written to reports.
    pub fn adjacency_matrix_string(&self) -> String {
        let rows: Vec<String> = self
            .nodes()
            .map(|u| {
                let cells: Vec<&str> = self
                    .nodes()
                    .map(|v| if self.has_edge(u, v) { "1" } else { "0" })
                    .collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph(n={}, m={}) {{", self.node_count(), self.edge_count)?;
        let mut first = true;
        for (u, v) in self.edges() {
            if !first {
                write!(f, ",")?;
            }
            first = false;
            let lu = self.label(u).unwrap_or("?");
            let lv = self.label(v).unwrap_or("?");
            write!(f, " {lu}-{lv}")?;
        }
        write!(f, " }}")
    }
}

fn insert_sorted(list: &mut Vec<NodeIdx>, node: NodeIdx) {
    if let Err(pos) = list.binary_search(&node) {
        list.insert(pos, node);
    }
}
