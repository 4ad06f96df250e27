use cis_common::{Graph, NodeIdx};
use cis_subsets::for_each_connected_subset;
use tracing::{debug, trace};

use crate::{GadgetError, MAX_LINK_NODES, PathValues};

/// Enumerates the connected subsets of `graph` once and buckets them by
/// which of `links` they contain.
///
/// Link node `i` owns bit `i` of the mask. Any number of link nodes up to
/// [`MAX_LINK_NODES`] is accepted, including an odd number.
///
/// # Errors
///
/// Returns [`GadgetError::Graph`] for a link outside the graph and
/// [`GadgetError::DegenerateGadget`] for repeated link nodes or too many of them.
pub fn classify(graph: &Graph, links: &[NodeIdx]) -> Result<PathValues, GadgetError> {
    if links.len() > MAX_LINK_NODES {
        return Err(GadgetError::degenerate(format!(
            "{} link nodes exceeds the limit of {}",
            links.len(),
            MAX_LINK_NODES
        )));
    }

    let mut bit_of = vec![0u32; graph.node_count()];
    for (i, &link) in links.iter().enumerate() {
        graph.check_node(link)?;
        let slot = &mut bit_of[link.as_usize()];
        if *slot != 0 {
            return Err(GadgetError::degenerate(format!("link node {link} listed twice")));
        }
        *slot = 1 << i;
    }

    Ok(classify_unchecked(graph, links.len(), &bit_of))
}

/// Classification over a precomputed node-to-bit table.
pub(crate) fn classify_unchecked(graph: &Graph, link_count: usize, bit_of: &[u32]) -> PathValues {
    let mut values = PathValues::empty(link_count);
    for_each_connected_subset(graph, |members| {
        let mask = members
            .iter()
            .fold(0u32, |acc, m| acc | bit_of[m.as_usize()]);
        trace!("subset of {} nodes -> mask {:#b}", members.len(), mask);
        values.record(mask);
    });

    debug!(
        "classified {} connected subsets over {} nodes by {} link nodes",
        values.total(),
        graph.node_count(),
        link_count
    );
    values
}
