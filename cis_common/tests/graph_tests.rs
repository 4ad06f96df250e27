use std::sync::OnceLock;

use cis_common::{ALL_CIS_CASES, Graph, NodeIdx, cis_case, cycle_edges};
use rstest::rstest;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[rstest]
#[case("edgeless_5", false)]
#[case("single_edge", true)]
#[case("cycle_6", true)]
#[case("star_3", true)]
#[case("two_triangles", false)]
fn test_fixture_connectivity(#[case] name: &str, #[case] connected: bool) {
    init_test_logger();
    let case = cis_case(name).expect("fixture exists");
    assert_eq!(case.graph.is_connected(), connected, "{name}");
}

#[test]
fn test_fixture_names_are_unique() {
    let mut names: Vec<&str> = ALL_CIS_CASES.iter().map(|c| c.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ALL_CIS_CASES.len());
}

#[test]
fn test_union_with_bridge_is_connected() {
    init_test_logger();
    let c = Graph::from_edges(4, &cycle_edges(4)).unwrap();
    let mut u = c.disjoint_union(&c);
    assert!(!u.is_connected());

    u.add_edge(NodeIdx::from(2), NodeIdx::from(4)).unwrap();
    assert!(u.is_connected());
    assert_eq!(u.edge_count(), 9);
}

mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    #[derive(Clone, Debug)]
    struct SmallGraph(Graph);

    impl Arbitrary for SmallGraph {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = usize::arbitrary(g) % 8 + 1;
            let mut graph = Graph::with_nodes(n);
            for u in 0..n {
                for v in u + 1..n {
                    if bool::arbitrary(g) {
                        graph
                            .add_edge(NodeIdx::from(u), NodeIdx::from(v))
                            .expect("fresh pair");
                    }
                }
            }
            Self(graph)
        }
    }

    quickcheck! {
        fn prop_complement_is_involution(g: SmallGraph) -> bool {
            g.0.complement().complement() == g.0
        }

        fn prop_complement_edge_count(g: SmallGraph) -> bool {
            let n = g.0.node_count();
            g.0.edge_count() + g.0.complement().edge_count() == n * (n - 1) / 2
        }

        fn prop_edges_listed_once(g: SmallGraph) -> bool {
            g.0.edges().count() == g.0.edge_count()
        }

        fn prop_full_subset_matches_is_connected(g: SmallGraph) -> bool {
            let all = vec![true; g.0.node_count()];
            g.0.induced_is_connected(&all) == g.0.is_connected()
        }
    }
}
