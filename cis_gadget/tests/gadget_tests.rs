use std::sync::OnceLock;

use cis_common::{Graph, NodeIdx, cis_case};
use cis_gadget::combine::{chain, chain4, chain_repeat};
use cis_gadget::optimize::{best_pairing, same_side_count};
use cis_gadget::{
    Gadget, Gadget4, GrowthRateEstimator, LinkPairing, MAX_PER_VERTEX_BASE, PathValues,
    TransferMatrix,
};
use cis_subsets::brute_force_count;
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

fn links(raw: &[u32]) -> Vec<NodeIdx> {
    raw.iter().copied().map(NodeIdx::new).collect()
}

fn square() -> Gadget4 {
    let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    Gadget4::new(g, [0, 1, 3, 2].map(NodeIdx::new)).unwrap()
}

#[rstest]
#[case("cycle_4", &[0, 2])]
#[case("cycle_6", &[0, 1, 3, 4])]
#[case("complete_6", &[5, 0, 1, 2, 3, 4])]
#[case("two_triangles", &[0, 3])]
fn test_path_values_sum_to_cis(#[case] name: &str, #[case] raw_links: &[u32]) {
    init_test_logger();
    let case = cis_case(name).expect("fixture exists");
    let gadget = Gadget::new(case.graph.clone(), links(raw_links)).unwrap();

    assert_eq!(gadget.cis(), case.expected_cis, "Test '{}' failed", case.name);
    assert_eq!(gadget.cis(), brute_force_count(&case.graph).unwrap());
}

#[test]
fn test_square_matches_hand_count() {
    let sq = square();
    assert_eq!(sq.lr(), 7);
    assert_eq!(sq.abcd(), 1);
}

#[test]
fn test_chaining_is_associative() {
    init_test_logger();
    let g1 = square().into_gadget();
    let g2 = Gadget::new(
        Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)]).unwrap(),
        links(&[0, 1, 3, 4]),
    )
    .unwrap();
    let g3 = Gadget::new(
        Graph::from_edges(4, &[(0, 2), (1, 3), (2, 3)]).unwrap(),
        links(&[0, 1, 2, 3]),
    )
    .unwrap();

    let left = chain(&chain(&g1, &g2).unwrap(), &g3).unwrap();
    let right = chain(&g1, &chain(&g2, &g3).unwrap()).unwrap();

    assert_eq!(left.link_nodes(), right.link_nodes());
    assert_eq!(
        left.graph().edges().collect::<Vec<_>>(),
        right.graph().edges().collect::<Vec<_>>()
    );
    assert_eq!(left.path_values(), right.path_values());
}

#[test]
fn test_chained_cis_matches_brute_force() {
    let sq = square();
    let chained = chain4(&sq, &sq).unwrap();
    assert_eq!(chained.graph().node_count(), 8);
    assert_eq!(
        chained.gadget().cis(),
        brute_force_count(chained.graph()).unwrap()
    );
}

#[test]
fn test_general_matrix_matches_four_link_matrix_on_gadgets() {
    let plain = square();
    let mut optimized = square();
    optimized.optimize_link_pairing().unwrap();

    for gadget in [plain, optimized] {
        let pv = gadget.path_values();
        assert_eq!(
            TransferMatrix::from_path_values(pv).unwrap(),
            gadget.recursion_matrix().unwrap()
        );
    }
}

#[test]
fn test_path_chain_grows_polynomially() {
    // Chaining single edges builds a path: #CIS is quadratic, so R = 1.
    let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
    let edge = Gadget::new(g, links(&[0, 1])).unwrap();
    let estimate = GrowthRateEstimator::new()
        .estimate_gadget(&edge)
        .unwrap()
        .unwrap();
    assert!((estimate.spectral_radius() - 1.0).abs() < 1e-9);
    assert!((estimate.per_vertex_base() - 1.0).abs() < 1e-9);
}

#[test]
fn test_transfer_matrix_predicts_chain_growth() {
    // Ratios of #CIS between successive chain lengths approach R.
    let sq = square().into_gadget();
    let radius = GrowthRateEstimator::new()
        .estimate_gadget(&sq)
        .unwrap()
        .unwrap()
        .spectral_radius();

    let c4 = chain_repeat(&sq, 4).unwrap().cis() as f64;
    let c5 = chain_repeat(&sq, 5).unwrap().cis() as f64;
    assert!((c5 / c4 - radius).abs() / radius < 0.05);
}

mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    #[derive(Clone, Debug)]
    struct FourLinkValues(PathValues);

    impl Arbitrary for FourLinkValues {
        fn arbitrary(g: &mut Gen) -> Self {
            let values = (0..16).map(|_| u64::from(u16::arbitrary(g))).collect();
            Self(PathValues::from_counts(4, values).expect("16 entries"))
        }
    }

    #[derive(Clone, Debug)]
    struct SmallGadget(Gadget);

    impl Arbitrary for SmallGadget {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = usize::arbitrary(g) % 6 + 4;
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
            let links = (0..4).map(NodeIdx::from).collect();
            Self(Gadget::new(graph, links).expect("four distinct links"))
        }
    }

    quickcheck! {
        fn prop_optimizer_never_lowers_lr(values: FourLinkValues) -> bool {
            let pairing = best_pairing(&values.0).unwrap();
            let adopted = values.0.permuted(&pairing.permutation()).unwrap();
            adopted.left_right() >= values.0.left_right()
                && LinkPairing::ALL
                    .iter()
                    .all(|&p| same_side_count(&values.0, pairing).unwrap()
                        <= same_side_count(&values.0, p).unwrap())
        }

        fn prop_path_values_sum_to_brute_force(g: SmallGadget) -> bool {
            g.0.cis() == brute_force_count(g.0.graph()).unwrap()
        }

        fn prop_growth_estimates_respect_base_cap(g: SmallGadget) -> bool {
            GrowthRateEstimator::new()
                .estimate_gadget(&g.0)
                .unwrap()
                .is_none_or(|e| e.per_vertex_base() <= MAX_PER_VERTEX_BASE)
        }

        fn prop_real_maximum_is_the_spectral_radius(values: FourLinkValues) -> bool {
            // The recursion matrix is nonnegative, so its spectral radius is
            // itself an eigenvalue.
            let matrix = TransferMatrix::four_link(&values.0).unwrap();
            let estimator = GrowthRateEstimator::new();
            let radius = estimator.spectral_radius(&matrix);
            estimator
                .max_real_eigenvalue(&matrix)
                .is_none_or(|max| (max - radius).abs() <= 1e-6 * radius.max(1.0))
        }

        fn prop_permuting_matches_reclassifying(g: SmallGadget) -> bool {
            let mut gadget = Gadget4::from_gadget(g.0).unwrap();
            gadget.optimize_link_pairing().unwrap();
            let fresh = Gadget::new(
                gadget.graph().clone(),
                gadget.gadget().link_nodes().to_vec(),
            )
            .unwrap();
            gadget.path_values() == fresh.path_values()
        }
    }
}
