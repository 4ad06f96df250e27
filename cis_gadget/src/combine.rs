//! Chaining gadgets into larger gadgets.
//!
//! `chain(g1, g2)` places the graphs side by side and wires right link `i`
//! of `g1` to left link `i` of `g2`. The result keeps `g1`'s left side and
//! `g2`'s right side, so it can be chained again. Node indices of `g2` are
//! shifted by `g1.node_count()`.

use cis_common::Graph;
use tracing::{debug, instrument};

use crate::{Gadget, Gadget4, GadgetError, SingleLinkGadget};

/// Chains `first` into `second`.
///
/// # Errors
///
/// Returns [`GadgetError::SizeMismatch`] when the gadgets have different link counts.
pub fn chain(first: &Gadget, second: &Gadget) -> Result<Gadget, GadgetError> {
    if first.link_count() != second.link_count() {
        return Err(GadgetError::SizeMismatch {
            what: "link count of chained gadget",
            expected: first.link_count(),
            actual: second.link_count(),
        });
    }

    let offset = first.node_count();
    let mut graph = first.graph().disjoint_union(second.graph());
    for (&out, &inp) in first.right_links().iter().zip(second.left_links()) {
        graph.add_edge(out, inp.offset(offset))?;
    }

    let links = first
        .left_links()
        .iter()
        .copied()
        .chain(second.right_links().iter().map(|r| r.offset(offset)))
        .collect();
    Gadget::new(graph, links)
}

/// Chains `repeats` copies of `gadget` left to right.
///
/// # Errors
///
/// Returns [`GadgetError::InvalidChainCount`] when `repeats` is zero.
#[instrument(skip(gadget), fields(nodes = gadget.node_count()))]
pub fn chain_repeat(gadget: &Gadget, repeats: usize) -> Result<Gadget, GadgetError> {
    if repeats == 0 {
        return Err(GadgetError::InvalidChainCount {
            repeats,
            reason: "at least one copy is required",
        });
    }

    let mut chained = gadget.clone();
    for _ in 1..repeats {
        chained = chain(&chained, gadget)?;
    }
    debug!("chained {} copies into {} nodes", repeats, chained.node_count());
    Ok(chained)
}

/// [`chain`] for four-link gadgets: `c` of `first` meets `a` of `second`
/// and `d` meets `b`.
///
/// # Errors
///
/// Same as [`chain`].
pub fn chain4(first: &Gadget4, second: &Gadget4) -> Result<Gadget4, GadgetError> {
    Gadget4::from_gadget(chain(first.gadget(), second.gadget())?)
}

/// Joins two single-link gadgets through a new joint node adjacent to both
/// links. The joint node is the new link.
///
/// # Errors
///
/// Forwarded from the graph operations; never fails for valid gadgets.
pub fn chain_single(
    first: &SingleLinkGadget,
    second: &SingleLinkGadget,
) -> Result<SingleLinkGadget, GadgetError> {
    let offset = first.node_count();
    let mut graph: Graph = first.graph().disjoint_union(second.graph());
    let joint = graph.add_node("joint");
    graph.add_edge(first.link(), joint)?;
    graph.add_edge(second.link().offset(offset), joint)?;
    SingleLinkGadget::new(graph, joint)
}

/// Doubles `gadget` until `repeats` copies are joined.
///
/// # Errors
///
/// Returns [`GadgetError::InvalidChainCount`] unless `repeats` is a power of two.
pub fn chain_single_repeat(
    gadget: &SingleLinkGadget,
    repeats: usize,
) -> Result<SingleLinkGadget, GadgetError> {
    if !repeats.is_power_of_two() {
        return Err(GadgetError::InvalidChainCount {
            repeats,
            reason: "single-link chains double, so the count must be a power of two",
        });
    }

    let mut chained = gadget.clone();
    for _ in 0..repeats.trailing_zeros() {
        chained = chain_single(&chained, &chained)?;
    }
    Ok(chained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cis_common::NodeIdx;

    fn edge_gadget() -> Gadget {
        let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
        Gadget::new(g, vec![NodeIdx::new(0), NodeIdx::new(1)]).unwrap()
    }

    #[test]
    fn test_chained_edges_form_a_path() {
        let path = chain_repeat(&edge_gadget(), 3).unwrap();
        assert_eq!(path.node_count(), 6);
        assert_eq!(path.graph().edge_count(), 5);
        // A path on 6 nodes has 21 connected subsets.
        assert_eq!(path.cis(), 21);
        assert_eq!(path.link_nodes(), &[NodeIdx::new(0), NodeIdx::new(5)]);
    }

    #[test]
    fn test_chain_rejects_mismatched_link_counts() {
        let g = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let four = Gadget::new(g, (0..4).map(NodeIdx::new).collect()).unwrap();
        assert!(matches!(
            chain(&edge_gadget(), &four),
            Err(GadgetError::SizeMismatch { expected: 2, actual: 4, .. })
        ));
    }

    #[test]
    fn test_chain_repeat_zero_fails() {
        assert!(matches!(
            chain_repeat(&edge_gadget(), 0),
            Err(GadgetError::InvalidChainCount { repeats: 0, .. })
        ));
        assert_eq!(chain_repeat(&edge_gadget(), 1).unwrap().node_count(), 2);
    }

    #[test]
    fn test_single_link_doubling() {
        let g = Graph::with_nodes(1);
        let leaf = SingleLinkGadget::new(g, NodeIdx::new(0)).unwrap();

        let twice = chain_single_repeat(&leaf, 2).unwrap();
        // Path 0 - joint - 1, link in the middle: 4 subsets contain it.
        assert_eq!(twice.node_count(), 3);
        assert_eq!(twice.cisp(), 4);

        let four = chain_single_repeat(&leaf, 4).unwrap();
        assert_eq!(four.node_count(), 7);

        assert_eq!(chain_single_repeat(&leaf, 1).unwrap().node_count(), 1);
        for bad in [0, 3, 6] {
            assert!(matches!(
                chain_single_repeat(&leaf, bad),
                Err(GadgetError::InvalidChainCount { .. })
            ));
        }
    }
}
