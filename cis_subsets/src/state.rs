use cis_common::NodeIdx;
use contracts::*;

/// Where a node currently stands in the enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// Not yet branched on.
    Undecided,
    /// Member of the growing connected subset.
    Included,
    /// Ruled out for every subset below this branch.
    Excluded,
}

/// The `included` / `excluded` / `undecided` partition of the node set.
///
/// Every node has exactly one state at any time. Decisions are pushed onto
/// an undo log and reverted in LIFO order, so a branch restores exactly the
/// state it started from.
#[derive(Clone, Debug)]
pub(crate) struct Partition {
    state: Vec<NodeState>,
    // Included nodes in the order they joined, the scan order for the frontier.
    included: Vec<NodeIdx>,
    // Undo log: every decided node, most recent last.
    decisions: Vec<NodeIdx>,
    undecided: usize,
}

impl Partition {
    /// All `node_count` nodes start undecided.
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            state: vec![NodeState::Undecided; node_count],
            included: Vec::with_capacity(node_count),
            decisions: Vec::with_capacity(node_count),
            undecided: node_count,
        }
    }

    pub(crate) fn state(&self, node: NodeIdx) -> NodeState {
        self.state[node.as_usize()]
    }

    pub(crate) fn included(&self) -> &[NodeIdx] {
        &self.included
    }

    pub(crate) const fn undecided_count(&self) -> usize {
        self.undecided
    }

    /// Lowest-index node that is still undecided.
    pub(crate) fn first_undecided(&self) -> Option<NodeIdx> {
        self.state
            .iter()
            .position(|&s| s == NodeState::Undecided)
            .map(NodeIdx::from)
    }

    /// Moves an undecided node into `included` or `excluded`.
    #[debug_requires(self.state(node) == NodeState::Undecided)]
    #[debug_requires(decision != NodeState::Undecided)]
    #[debug_ensures(self.is_consistent())]
    pub(crate) fn decide(&mut self, node: NodeIdx, decision: NodeState) {
        self.state[node.as_usize()] = decision;
        if decision == NodeState::Included {
            self.included.push(node);
        }
        self.decisions.push(node);
        self.undecided -= 1;
    }

    /// Reverts the most recent decision and returns the node it concerned.
    #[debug_ensures(self.is_consistent())]
    pub(crate) fn undo(&mut self) -> Option<NodeIdx> {
        let node = self.decisions.pop()?;
        if self.state[node.as_usize()] == NodeState::Included {
            self.included.pop();
        }
        self.state[node.as_usize()] = NodeState::Undecided;
        self.undecided += 1;
        Some(node)
    }

    /// Counts agree with the per-node states.
    pub(crate) fn is_consistent(&self) -> bool {
        let undecided = self
            .state
            .iter()
            .filter(|&&s| s == NodeState::Undecided)
            .count();
        let included = self
            .state
            .iter()
            .filter(|&&s| s == NodeState::Included)
            .count();
        undecided == self.undecided
            && included == self.included.len()
            && self.decisions.len() + self.undecided == self.state.len()
    }
}
