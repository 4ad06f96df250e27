//! Common test cases shared by the CIS crates.
//!
//! Each case is a small named graph together with its number of nonempty
//! connected induced vertex subsets, computed by hand.

use crate::Graph;

/// A named graph with a known #CIS value.
#[derive(Debug, Clone)]
pub struct CisTestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The graph under test.
    pub graph: Graph,
    /// The expected number of nonempty connected induced subsets.
    pub expected_cis: u64,
}

impl CisTestCase {
    fn new(name: &'static str, n: usize, edges: &[(usize, usize)], expected_cis: u64) -> Self {
        Self {
            name,
            graph: Graph::from_edges(n, edges).unwrap_or_else(|e| panic!("fixture {name}: {e}")),
            expected_cis,
        }
    }
}

/// Cycle on `n` vertices as an edge list.
pub fn cycle_edges(n: usize) -> Vec<(usize, usize)> {
    (0..n).map(|i| (i, (i + 1) % n)).collect()
}

/// Path on `n` vertices as an edge list.
pub fn path_edges(n: usize) -> Vec<(usize, usize)> {
    (1..n).map(|i| (i - 1, i)).collect()
}

/// Complete graph on `n` vertices as an edge list.
pub fn complete_edges(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
        .collect()
}

lazy_static::lazy_static! {
    /// Every shared case, in a stable order.
    pub static ref ALL_CIS_CASES: Vec<CisTestCase> = vec![
        CisTestCase::new("edgeless_5", 5, &[], 5),
        CisTestCase::new("single_edge", 2, &[(0, 1)], 3),
        CisTestCase::new("path_3", 3, &path_edges(3), 6),
        CisTestCase::new("path_5", 5, &path_edges(5), 15),
        CisTestCase::new("cycle_4", 4, &cycle_edges(4), 13),
        CisTestCase::new("cycle_6", 6, &cycle_edges(6), 31),
        CisTestCase::new("complete_4", 4, &complete_edges(4), 15),
        CisTestCase::new("complete_6", 6, &complete_edges(6), 63),
        CisTestCase::new("star_3", 4, &[(0, 1), (0, 2), (0, 3)], 11),
        CisTestCase::new(
            "two_triangles",
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)],
            14,
        ),
    ];
}

/// Looks up a shared case by name.
pub fn cis_case(name: &str) -> Option<&'static CisTestCase> {
    ALL_CIS_CASES.iter().find(|c| c.name == name)
}
