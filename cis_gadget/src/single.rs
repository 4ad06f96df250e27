use std::sync::OnceLock;

use cis_common::{Graph, NodeIdx};

use crate::GadgetError;
use crate::classify::classify_unchecked;

/// A graph with a single link node, chained through a shared joint node.
#[derive(Clone, Debug)]
pub struct SingleLinkGadget {
    graph: Graph,
    link: NodeIdx,
    cisp: OnceLock<u64>,
}

impl SingleLinkGadget {
    /// # Errors
    ///
    /// Returns [`GadgetError::Graph`] when `link` is not a node of `graph`.
    pub fn new(graph: Graph, link: NodeIdx) -> Result<Self, GadgetError> {
        graph.check_node(link)?;
        Ok(Self {
            graph,
            link,
            cisp: OnceLock::new(),
        })
    }

    /// The underlying graph.
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The link node.
    pub const fn link(&self) -> NodeIdx {
        self.link
    }

    /// Vertices of the underlying graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of connected subsets containing the link node.
    pub fn cisp(&self) -> u64 {
        *self.cisp.get_or_init(|| {
            let mut bit_of = vec![0u32; self.graph.node_count()];
            bit_of[self.link.as_usize()] = 1;
            classify_unchecked(&self.graph, 1, &bit_of).as_slice()[1]
        })
    }
}
