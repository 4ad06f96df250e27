use cis_common::Graph;
use tracing::debug;

use crate::SubsetError;

/// Largest graph [`brute_force_count`] accepts.
pub const BRUTE_FORCE_LIMIT: usize = 30;

/// Counts connected induced subsets by testing all `2^|V| - 1` nonempty subsets.
///
/// This is the reference the pruned enumerator is checked against; it is
/// exponential in every case, not just the worst one.
///
/// # Errors
///
/// Returns [`SubsetError::TooLarge`] for graphs above [`BRUTE_FORCE_LIMIT`] nodes.
pub fn brute_force_count(graph: &Graph) -> Result<u64, SubsetError> {
    let n = graph.node_count();
    if n > BRUTE_FORCE_LIMIT {
        return Err(SubsetError::TooLarge {
            node_count: n,
            limit: BRUTE_FORCE_LIMIT,
        });
    }

    let mut members = vec![false; n];
    let mut count = 0u64;
    for mask in 1u64..(1u64 << n) {
        for (i, member) in members.iter_mut().enumerate() {
            *member = (mask >> i) & 1 == 1;
        }
        if graph.induced_is_connected(&members) {
            count += 1;
        }
    }

    debug!("brute force: {} connected subsets over {} nodes", count, n);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_large_graphs() {
        let g = Graph::with_nodes(BRUTE_FORCE_LIMIT + 1);
        assert!(matches!(
            brute_force_count(&g),
            Err(SubsetError::TooLarge { node_count: 31, .. })
        ));
    }

    #[test]
    fn test_triangle() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(brute_force_count(&g).unwrap(), 7);
    }
}
