//! Deterministic graph families on nodes labelled `0..n`.

use cis_common::{Graph, GraphError, NodeIdx, complete_edges, cycle_edges};

/// Cycle on `n` nodes. Two nodes give a single edge, fewer give no edges.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn cycle(n: usize) -> Result<Graph, GraphError> {
    match n {
        0 | 1 => Ok(Graph::with_nodes(n)),
        2 => Graph::from_edges(2, &[(0, 1)]),
        _ => Graph::from_edges(n, &cycle_edges(n)),
    }
}

/// Complete graph on `n` nodes.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn complete(n: usize) -> Result<Graph, GraphError> {
    Graph::from_edges(n, &complete_edges(n))
}

/// A `2 x n/2` grid drawn as a cycle with rungs `(1, n-2), (2, n-3), ...`.
///
/// For odd `n` one end of the ladder is capped by a single vertex.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn ladder(n: usize) -> Result<Graph, GraphError> {
    let mut graph = cycle(n)?;
    if n < 4 {
        return Ok(graph);
    }

    let (mut i1, mut i2) = (1, n - 2);
    while i1 + 1 < i2 {
        add_missing(&mut graph, i1, i2)?;
        i1 += 1;
        i2 -= 1;
    }
    Ok(graph)
}

/// A ladder whose two rails are closed into cycles.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn closed_ladder(n: usize) -> Result<Graph, GraphError> {
    let mut graph = ladder(n)?;
    if n <= 4 {
        return Ok(graph);
    }

    add_missing(&mut graph, 0, n / 2 - 1)?;
    add_missing(&mut graph, n / 2, n - 1)?;
    Ok(graph)
}

/// A cycle where each vertex also meets the vertex opposite to it.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn spokes(n: usize) -> Result<Graph, GraphError> {
    let mut graph = cycle(n)?;
    if n <= 3 {
        return Ok(graph);
    }

    for i in 0..n / 2 {
        add_missing(&mut graph, i, i + n / 2)?;
    }
    Ok(graph)
}

/// A cycle folded into a grid: chords `(i, 3n/4 - 1 - i)` for `i < n/4`
/// and `(i, n - 1 - i + n/4)` for `n/4 <= i < n/2`.
///
/// Four nodes give `K_4`; for `n` divisible by four the result is cubic.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn grid_like_cycle(n: usize) -> Result<Graph, GraphError> {
    let mut graph = cycle(n)?;
    if n <= 3 {
        return Ok(graph);
    }

    for i in 0..n / 4 {
        add_missing(&mut graph, i, n * 3 / 4 - 1 - i)?;
    }
    for (step, i) in (n / 4..n / 2).enumerate() {
        add_missing(&mut graph, i, n - 1 - step)?;
    }
    Ok(graph)
}

/// A cycle with chords `(i, i + n/4)` along two opposite quarters,
/// starting at nodes `0` and `n/2`.
///
/// Cycles of up to seven nodes are returned unchanged.
///
/// # Errors
///
/// Never fails; the error is forwarded from edge insertion.
pub fn quarter_chord_cycle(n: usize) -> Result<Graph, GraphError> {
    let mut graph = cycle(n)?;
    if n <= 7 {
        return Ok(graph);
    }

    let quarter = n / 4;
    for start in [0, n / 2] {
        for i in start..start + quarter {
            add_missing(&mut graph, i, i + quarter)?;
        }
    }
    Ok(graph)
}

fn add_missing(graph: &mut Graph, u: usize, v: usize) -> Result<(), GraphError> {
    let (u, v) = (NodeIdx::from(u), NodeIdx::from(v));
    if graph.has_edge(u, v) {
        Ok(())
    } else {
        graph.add_edge(u, v)
    }
}
