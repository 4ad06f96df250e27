use cis_common::{Graph, NodeIdx};
use tracing::trace;

use crate::state::{NodeState, Partition};

pub mod frontier;
pub(crate) use frontier::frontier_node;

/// Frontier-pruned backtracking over the node partition.
///
/// Calls `visit` once per nonempty connected induced subset, with the
/// members in the order they were included.
pub(crate) fn backtrack<F>(graph: &Graph, st: &mut Partition, visit: &mut F)
where
    F: FnMut(&[NodeIdx]),
{
    if st.undecided_count() == 0 {
        emit(st, visit);
        return;
    }

    let next = if st.included().is_empty() {
        // No component yet: any undecided node may seed one.
        st.first_undecided()
    } else {
        let frontier = frontier_node(graph, st);
        if frontier.is_none() {
            // Sealed component: the remaining undecided nodes cannot join it.
            trace!(
                "sealed component of {} nodes, {} undecided left",
                st.included().len(),
                st.undecided_count()
            );
            emit(st, visit);
            return;
        }
        frontier
    };

    let Some(next) = next else {
        return;
    };

    with_decision(st, next, NodeState::Excluded, |st_inner| {
        backtrack(graph, st_inner, visit);
    });
    with_decision(st, next, NodeState::Included, |st_inner| {
        backtrack(graph, st_inner, visit);
    });
}

/// Scoped helper that decides `node`, runs `f`, then reverts the decision.
fn with_decision(
    st: &mut Partition,
    node: NodeIdx,
    decision: NodeState,
    f: impl FnOnce(&mut Partition),
) {
    st.decide(node, decision);
    f(st);
    st.undo();
}

fn emit<F>(st: &Partition, visit: &mut F)
where
    F: FnMut(&[NodeIdx]),
{
    if !st.included().is_empty() {
        visit(st.included());
    }
}

#[cfg(test)]
mod tests {
    use cis_common::cycle_edges;

    use super::*;

    #[test]
    fn backtrack_restores_partition() {
        let graph = Graph::from_edges(5, &cycle_edges(5)).unwrap();
        let mut st = Partition::new(graph.node_count());
        let mut seen = 0;

        backtrack(&graph, &mut st, &mut |_| seen += 1);

        assert_eq!(seen, 21);
        assert_eq!(st.undecided_count(), 5);
        assert!(st.included().is_empty());
        assert!(st.is_consistent());
    }

    #[test]
    fn backtrack_on_empty_graph_visits_nothing() {
        let graph = Graph::new();
        let mut st = Partition::new(0);
        let mut seen = 0;
        backtrack(&graph, &mut st, &mut |_| seen += 1);
        assert_eq!(seen, 0);
    }
}
