//! Graph families and random gadget construction.
//!
//! Deterministic families (`cycle`, `ladder`, ...) build fixed shapes.
//! Random generators take an explicit `&mut impl Rng`, so a seeded
//! `StdRng` reproduces a run exactly.

mod families;
mod gadgets;
mod matching;
mod random;

pub use families::{
    closed_ladder, complete, cycle, grid_like_cycle, ladder, quarter_chord_cycle, spokes,
};
pub use gadgets::{
    gadgetize, random_cycle_gadget, random_cycle_gadget1, random_cycle_gadget2,
    random_cycle_gadget4, random_gadget, square_gadget,
};
pub use matching::{Matching, random_matching, random_maximal_matching};
pub use random::{random_graph, random_linked_cycle};

use cis_common::GraphError;
use cis_gadget::GadgetError;
use thiserror::Error;

/// Errors raised while generating graphs and gadgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Not enough vertices for the requested gadget shape.
    #[error("Gadget needs at least {minimum} nodes, got {node_count}")]
    TooSmall {
        /// Requested vertex count.
        node_count: usize,
        /// Fewest vertices the shape needs.
        minimum: usize,
    },

    /// More link nodes requested than the graph has vertices.
    #[error("{link_pairs} link pairs do not fit on {node_count} nodes")]
    TooManyLinks {
        /// Requested link pairs.
        link_pairs: usize,
        /// Vertices available.
        node_count: usize,
    },

    /// The graph has no matching of the requested size.
    #[error("Requested a matching of {requested} edges, found only {found}")]
    NoMatching {
        /// Edges asked for.
        requested: usize,
        /// Edges in the largest matching found.
        found: usize,
    },

    /// Fewer than two vertex-disjoint edges to cut.
    #[error("No two vertex-disjoint edges to cut")]
    NoDisjointEdges,

    /// Underlying graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Gadget construction failed.
    #[error(transparent)]
    Gadget(#[from] GadgetError),
}
