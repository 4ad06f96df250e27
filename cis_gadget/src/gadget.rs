use std::sync::OnceLock;

use cis_common::{Graph, NodeIdx};
use contracts::*;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::classify::classify_unchecked;
use crate::path_values::check_permutation;
use crate::{GadgetError, PathValues, TransferMatrix};

/// Largest supported number of link nodes; masks stay within `u32` and
/// path-value vectors within `2^16` entries.
pub const MAX_LINK_NODES: usize = 16;

/// A graph with an even number of distinguished link nodes.
///
/// The first half of the links is the left side, the second half the right
/// side. Path values are computed on first use and cached until the links
/// are reassigned.
#[derive(Clone, Debug)]
pub struct Gadget {
    graph: Graph,
    links: Vec<NodeIdx>,
    path_values: OnceLock<PathValues>,
}

impl Gadget {
    /// Creates a gadget, validating the link nodes against `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::DegenerateGadget`] when the number of links is
    /// zero, odd, above [`MAX_LINK_NODES`] or larger than the graph, or when
    /// a link repeats. Returns [`GadgetError::Graph`] for a link outside the graph.
    pub fn new(graph: Graph, links: Vec<NodeIdx>) -> Result<Self, GadgetError> {
        validate_links(&graph, &links)?;
        Ok(Self {
            graph,
            links,
            path_values: OnceLock::new(),
        })
    }

    /// Like [`Gadget::new`], after shuffling `links` with `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`Gadget::new`].
    pub fn with_shuffled_links<R: Rng + ?Sized>(
        graph: Graph,
        mut links: Vec<NodeIdx>,
        rng: &mut R,
    ) -> Result<Self, GadgetError> {
        links.shuffle(rng);
        Self::new(graph, links)
    }

    /// The underlying graph.
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Link nodes in order: left side first, then right side.
    pub fn link_nodes(&self) -> &[NodeIdx] {
        &self.links
    }

    /// Number of link nodes `k`.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of link nodes per side, `k / 2`.
    pub fn side_width(&self) -> usize {
        self.links.len() / 2
    }

    /// The first `k / 2` link nodes.
    pub fn left_links(&self) -> &[NodeIdx] {
        &self.links[..self.side_width()]
    }

    /// The last `k / 2` link nodes.
    pub fn right_links(&self) -> &[NodeIdx] {
        &self.links[self.side_width()..]
    }

    /// Vertices of the underlying graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Path values of the current link assignment, computed on first use.
    pub fn path_values(&self) -> &PathValues {
        self.path_values.get_or_init(|| {
            let mut bit_of = vec![0u32; self.graph.node_count()];
            for (i, link) in self.links.iter().enumerate() {
                bit_of[link.as_usize()] = 1 << i;
            }
            classify_unchecked(&self.graph, self.links.len(), &bit_of)
        })
    }

    /// Whether path values are cached for the current links.
    pub fn is_classified(&self) -> bool {
        self.path_values.get().is_some()
    }

    /// #CIS of the whole gadget graph.
    pub fn cis(&self) -> u64 {
        self.path_values().total()
    }

    /// Number of connected subsets touching both sides.
    pub fn left_right_count(&self) -> u64 {
        self.path_values().left_right()
    }

    /// Number of connected subsets containing both links of a two-link gadget.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] unless the gadget has exactly two links.
    pub fn pair_cisp(&self) -> Result<u64, GadgetError> {
        if self.link_count() != 2 {
            return Err(GadgetError::SizeMismatch {
                what: "link count",
                expected: 2,
                actual: self.link_count(),
            });
        }
        self.path_values().containing_all(0b11)
    }

    /// Replaces the link nodes and drops the cached path values.
    ///
    /// # Errors
    ///
    /// Same as [`Gadget::new`]. The gadget is unchanged on error.
    #[debug_ensures(ret.is_err() || !self.is_classified())]
    pub fn set_link_nodes(&mut self, links: Vec<NodeIdx>) -> Result<(), GadgetError> {
        validate_links(&self.graph, &links)?;
        self.links = links;
        self.path_values = OnceLock::new();
        Ok(())
    }

    /// Reorders the links so that new link `i` is old link `perm[i]`.
    ///
    /// Cached path values are remapped instead of recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] or [`GadgetError::InvalidPermutation`]
    /// when `perm` is not a permutation of `0..k`.
    #[debug_ensures(self.links.len() == old(self.links.len()))]
    pub fn permute_links(&mut self, perm: &[usize]) -> Result<(), GadgetError> {
        check_permutation(perm, self.links.len())?;

        let remapped = match self.path_values.get() {
            Some(values) => Some(values.permuted(perm)?),
            None => None,
        };
        self.links = perm.iter().map(|&src| self.links[src]).collect();
        self.path_values = remapped.map_or_else(OnceLock::new, OnceLock::from);

        debug!("permuted links by {:?}", perm);
        Ok(())
    }

    /// Transfer matrix of a chain of copies of this gadget.
    ///
    /// # Errors
    ///
    /// Never fails for a validated gadget; the error is forwarded from
    /// [`TransferMatrix::from_path_values`].
    pub fn transfer_matrix(&self) -> Result<TransferMatrix, GadgetError> {
        TransferMatrix::from_path_values(self.path_values())
    }

    /// Splits the gadget into its graph and link nodes.
    pub fn into_parts(self) -> (Graph, Vec<NodeIdx>) {
        (self.graph, self.links)
    }
}

fn validate_links(graph: &Graph, links: &[NodeIdx]) -> Result<(), GadgetError> {
    let k = links.len();
    if k == 0 || k % 2 != 0 {
        return Err(GadgetError::degenerate(format!(
            "need a positive even number of link nodes, got {k}"
        )));
    }
    if k > MAX_LINK_NODES {
        return Err(GadgetError::degenerate(format!(
            "{k} link nodes exceeds the limit of {MAX_LINK_NODES}"
        )));
    }
    if k > graph.node_count() {
        return Err(GadgetError::degenerate(format!(
            "{k} link nodes on a graph of {} nodes",
            graph.node_count()
        )));
    }

    let mut seen = vec![false; graph.node_count()];
    for &link in links {
        graph.check_node(link)?;
        if std::mem::replace(&mut seen[link.as_usize()], true) {
            return Err(GadgetError::degenerate(format!("link node {link} listed twice")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square() -> Gadget {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let links = [0, 1, 3, 2].map(NodeIdx::new).to_vec();
        Gadget::new(g, links).unwrap()
    }

    #[test]
    fn test_validation() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let n = NodeIdx::new;
        assert!(matches!(
            Gadget::new(g.clone(), vec![n(0)]),
            Err(GadgetError::DegenerateGadget(_))
        ));
        assert!(matches!(
            Gadget::new(g.clone(), vec![]),
            Err(GadgetError::DegenerateGadget(_))
        ));
        assert!(matches!(
            Gadget::new(g.clone(), vec![n(1), n(1)]),
            Err(GadgetError::DegenerateGadget(_))
        ));
        assert!(matches!(
            Gadget::new(g.clone(), vec![n(1), n(9)]),
            Err(GadgetError::Graph(_))
        ));
        assert!(matches!(
            Gadget::new(g, vec![n(0), n(1), n(2), n(0)]),
            Err(GadgetError::DegenerateGadget(_))
        ));
    }

    #[test]
    fn test_cache_is_idempotent() {
        let gadget = square();
        assert!(!gadget.is_classified());
        let first = gadget.path_values().clone();
        assert!(gadget.is_classified());
        assert_eq!(gadget.path_values(), &first);
        assert_eq!(gadget.cis(), 13);
    }

    #[test]
    fn test_set_links_invalidates_cache() {
        let mut gadget = square();
        let before = gadget.path_values().clone();
        gadget
            .set_link_nodes([0, 2, 1, 3].map(NodeIdx::new).to_vec())
            .unwrap();
        assert!(!gadget.is_classified());
        assert_ne!(gadget.path_values(), &before);
        assert_eq!(gadget.cis(), before.total());
    }

    #[test]
    fn test_permute_links_matches_reclassification() {
        let mut permuted = square();
        let _ = permuted.path_values();
        permuted.permute_links(&[0, 2, 1, 3]).unwrap();
        assert!(permuted.is_classified());

        let fresh = Gadget::new(permuted.graph().clone(), permuted.link_nodes().to_vec()).unwrap();
        assert_eq!(permuted.path_values(), fresh.path_values());
    }

    #[test]
    fn test_pair_cisp() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let gadget = Gadget::new(g, vec![NodeIdx::new(0), NodeIdx::new(2)]).unwrap();
        assert_eq!(gadget.pair_cisp(), Ok(1));
        assert!(square().pair_cisp().is_err());
    }

    #[test]
    fn test_shuffled_links_keep_the_same_nodes() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let links = (0..4).map(NodeIdx::new).collect::<Vec<_>>();
        let gadget = Gadget::with_shuffled_links(g, links.clone(), &mut rng).unwrap();
        let mut got = gadget.link_nodes().to_vec();
        got.sort();
        assert_eq!(got, links);
        assert_eq!(gadget.left_links().len(), 2);
        assert_eq!(gadget.right_links().len(), 2);
    }
}
