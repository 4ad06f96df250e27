use cis_common::{Graph, NodeIdx};

use crate::state::{NodeState, Partition};

/// First undecided neighbor of the included component, scanning included
/// nodes in inclusion order and their neighbors in index order.
///
/// `None` means the component is sealed.
pub(crate) fn frontier_node(graph: &Graph, st: &Partition) -> Option<NodeIdx> {
    st.included().iter().find_map(|&u| {
        graph
            .neighbors(u)
            .iter()
            .copied()
            .find(|&v| st.state(v) == NodeState::Undecided)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_prefers_earliest_included_node() {
        // 0 - 1 - 2, 0 - 3
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 3)]).unwrap();
        let mut st = Partition::new(4);
        st.decide(NodeIdx::new(1), NodeState::Included);
        st.decide(NodeIdx::new(0), NodeState::Included);

        assert_eq!(frontier_node(&graph, &st), Some(NodeIdx::new(2)));

        st.decide(NodeIdx::new(2), NodeState::Excluded);
        assert_eq!(frontier_node(&graph, &st), Some(NodeIdx::new(3)));

        st.decide(NodeIdx::new(3), NodeState::Excluded);
        assert_eq!(frontier_node(&graph, &st), None);
    }
}
