//! Random gadgets cut out of linked cycles.
//!
//! A gadget is made by removing edges from a connected graph and using the
//! endpoints of the removed edges as link nodes. Chaining such gadgets puts
//! the removed edges back between neighboring copies.

use cis_common::{Graph, NodeIdx};
use cis_gadget::{Gadget, Gadget4, SingleLinkGadget};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::{GenerateError, cycle, random_graph, random_linked_cycle, random_matching};

/// Turns `graph` into a gadget with `2 * link_pairs` links by removing a
/// random matching of `link_pairs` edges. Link order is shuffled.
///
/// # Errors
///
/// Returns [`GenerateError::NoMatching`] when `graph` has no matching that
/// large, and gadget errors for `link_pairs == 0`.
pub fn gadgetize<R: Rng + ?Sized>(
    mut graph: Graph,
    link_pairs: usize,
    rng: &mut R,
) -> Result<Gadget, GenerateError> {
    let matching = random_matching(&graph, link_pairs, rng)?;

    let mut links = vec![NodeIdx::new(0); 2 * link_pairs];
    for (i, &(u, v)) in matching.iter().enumerate() {
        links[i] = u;
        links[link_pairs + i] = v;
        graph.remove_edge(u, v)?;
    }

    Ok(Gadget::with_shuffled_links(graph, links, rng)?)
}

fn check_size(n: usize, link_pairs: usize) -> Result<(), GenerateError> {
    if n < 2 {
        return Err(GenerateError::TooSmall {
            node_count: n,
            minimum: 2,
        });
    }
    if 2 * link_pairs > n {
        return Err(GenerateError::TooManyLinks {
            link_pairs,
            node_count: n,
        });
    }
    Ok(())
}

/// A gadget on a random linked cycle with `2 * link_pairs` links.
///
/// # Errors
///
/// Returns [`GenerateError::TooSmall`] for `n < 2`,
/// [`GenerateError::TooManyLinks`] when the links do not fit, and
/// [`GenerateError::NoMatching`] when the cut matching cannot be found.
pub fn random_cycle_gadget<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    link_pairs: usize,
    rng: &mut R,
) -> Result<Gadget, GenerateError> {
    check_size(n, link_pairs)?;
    let graph = random_linked_cycle(n, d, rng)?;
    gadgetize(graph, link_pairs, rng)
}

/// A gadget on a random graph of maximum degree `d`.
///
/// # Errors
///
/// Same as [`random_cycle_gadget`].
pub fn random_gadget<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    link_pairs: usize,
    rng: &mut R,
) -> Result<Gadget, GenerateError> {
    check_size(n, link_pairs)?;
    let graph = random_graph(n, d, rng)?;
    gadgetize(graph, link_pairs, rng)
}

/// A four-link gadget from a linked cycle with two vertex-disjoint edges
/// cut, using the pairing with the most cross-side subsets.
///
/// # Errors
///
/// Returns [`GenerateError::TooSmall`] for `n < 4` and
/// [`GenerateError::NoDisjointEdges`] when no second edge avoids the first.
pub fn random_cycle_gadget4<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    rng: &mut R,
) -> Result<Gadget4, GenerateError> {
    if n < 4 {
        return Err(GenerateError::TooSmall {
            node_count: n,
            minimum: 4,
        });
    }

    let mut graph = random_linked_cycle(n, d, rng)?;
    let mut edges: Vec<_> = graph.edges().collect();
    edges.shuffle(rng);

    let first = *edges.first().ok_or(GenerateError::NoDisjointEdges)?;
    let second = edges
        .iter()
        .copied()
        .find(|&(u, v)| ![first.0, first.1].contains(&u) && ![first.0, first.1].contains(&v))
        .ok_or(GenerateError::NoDisjointEdges)?;
    graph.remove_edge(first.0, first.1)?;
    graph.remove_edge(second.0, second.1)?;

    let links = vec![first.0, first.1, second.0, second.1];
    let gadget = Gadget::with_shuffled_links(graph, links, rng)?;
    let mut gadget = Gadget4::from_gadget(gadget)?;
    let pairing = gadget.optimize_link_pairing()?;
    debug!("four-link gadget on {} nodes, pairing {}", n, pairing);
    Ok(gadget)
}

/// A two-link gadget whose links are the endpoints of a random edge, cut
/// unless the graph is a triangle or smaller.
///
/// # Errors
///
/// Returns [`GenerateError::TooSmall`] for `n < 2`.
pub fn random_cycle_gadget2<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    rng: &mut R,
) -> Result<Gadget, GenerateError> {
    if n < 2 {
        return Err(GenerateError::TooSmall {
            node_count: n,
            minimum: 2,
        });
    }

    let mut graph = random_linked_cycle(n, d, rng)?;
    let edges: Vec<_> = graph.edges().collect();
    let (u, v) = *edges.choose(rng).ok_or(GenerateError::TooSmall {
        node_count: n,
        minimum: 2,
    })?;
    if n > 3 {
        graph.remove_edge(u, v)?;
    }
    Ok(Gadget::with_shuffled_links(graph, vec![u, v], rng)?)
}

/// A single-link gadget linked at a vertex of minimum degree.
///
/// On a regular graph a random edge is cut first and one of its endpoints
/// becomes the link.
///
/// # Errors
///
/// Returns [`GenerateError::TooSmall`] for `n == 0`.
pub fn random_cycle_gadget1<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    rng: &mut R,
) -> Result<SingleLinkGadget, GenerateError> {
    if n == 0 {
        return Err(GenerateError::TooSmall {
            node_count: n,
            minimum: 1,
        });
    }

    let mut graph = random_linked_cycle(n, d, rng)?;
    let mut vertices: Vec<NodeIdx> = graph.nodes().collect();
    vertices.shuffle(rng);

    let degree = |u: &NodeIdx| graph.degree(*u);
    let min_degree = vertices.iter().map(degree).min().unwrap_or(0);
    let max_degree = vertices.iter().map(degree).max().unwrap_or(0);
    let mut link = vertices
        .iter()
        .copied()
        .find(|u| graph.degree(*u) == min_degree)
        .unwrap_or(NodeIdx::new(0));

    if min_degree == max_degree {
        let edges: Vec<_> = graph.edges().collect();
        if let Some(&(u, v)) = edges.choose(rng) {
            graph.remove_edge(u, v)?;
            link = if rng.gen_bool(0.5) { u } else { v };
        }
    }

    Ok(SingleLinkGadget::new(graph, link)?)
}

/// The 4-cycle `0-1-2-3` with links `a = 0, b = 1, c = 3, d = 2`.
///
/// # Errors
///
/// Never fails; errors are forwarded from construction.
pub fn square_gadget() -> Result<Gadget4, GenerateError> {
    let graph = cycle(4)?;
    Ok(Gadget4::new(graph, [0, 1, 3, 2].map(NodeIdx::new))?)
}
