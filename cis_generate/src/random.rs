use cis_common::{Graph, NodeIdx};
use rand::Rng;
use tracing::debug;

use crate::{GenerateError, complete, random_maximal_matching};

/// A cycle on `n` nodes plus up to `d - 2` random matchings, so that no
/// vertex exceeds degree `d`.
///
/// Built by removing the cycle from `K_n`, peeling `d - 2` random maximal
/// matchings off the remainder and taking the complement. When `n <= d + 1`
/// the result is `K_n`.
///
/// # Errors
///
/// Never fails; errors are forwarded from edge updates.
pub fn random_linked_cycle<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    rng: &mut R,
) -> Result<Graph, GenerateError> {
    let mut graph = complete(n)?;
    if n <= d + 1 || n <= 3 {
        return Ok(graph);
    }

    for i in 0..n {
        graph.remove_edge(NodeIdx::from(i), NodeIdx::from((i + 1) % n))?;
    }
    peel_matchings(&mut graph, d.saturating_sub(2), rng)?;

    let linked = graph.complement();
    debug!(
        "linked cycle: {} nodes, {} edges, max degree {}",
        n,
        linked.edge_count(),
        d
    );
    Ok(linked)
}

/// The union of `d` random maximal matchings of `K_n`.
///
/// # Errors
///
/// Never fails; errors are forwarded from edge updates.
pub fn random_graph<R: Rng + ?Sized>(n: usize, d: usize, rng: &mut R) -> Result<Graph, GenerateError> {
    let mut graph = complete(n)?;
    peel_matchings(&mut graph, d, rng)?;
    Ok(graph.complement())
}

fn peel_matchings<R: Rng + ?Sized>(
    graph: &mut Graph,
    rounds: usize,
    rng: &mut R,
) -> Result<(), GenerateError> {
    for _ in 0..rounds {
        for (u, v) in random_maximal_matching(graph, rng) {
            graph.remove_edge(u, v)?;
        }
    }
    Ok(())
}
