use std::sync::OnceLock;

use cis_common::SearchConfig;
use cis_driver::{GadgetSearch, SearchReport};
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

fn small_config(parallel: bool) -> SearchConfig {
    SearchConfig::builder()
        .sizes(8, 8)
        .degrees(3, 3)
        .link_pairs(1, 1)
        .iterations(6)
        .notify_interval(2)
        .seed(42)
        .parallel(parallel)
        .build()
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_small_search_finds_plausible_gadget(#[case] parallel: bool) {
    init_test_logger();
    let report = GadgetSearch::new(small_config(parallel)).run().unwrap();

    assert_eq!(report.tag, "D3_N8_L1_I6");
    assert_eq!(report.cells.len(), 1);
    let cell = &report.cells[0];
    let base = cell.lower_bound.expect("a connected two-link gadget always passes the cap");
    assert!(base > 1.0 && base <= 2.0);
    assert_eq!(cell.disconnected, 0);
    assert!(cell.adjacency.as_deref().is_some_and(|a| a.starts_with("[[")));
}

#[test]
fn test_parallel_and_serial_agree() {
    init_test_logger();
    let serial = GadgetSearch::new(small_config(false)).run().unwrap();
    let parallel = GadgetSearch::new(small_config(true)).run().unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn test_inadmissible_cells_are_skipped() {
    let cfg = SearchConfig::builder()
        .sizes(8, 8)
        .link_pairs(1, 4)
        .iterations(1)
        .build();
    let report = GadgetSearch::new(cfg).run().unwrap();
    let pairs: Vec<usize> = report.cells.iter().map(|c| c.link_pairs).collect();
    assert_eq!(pairs, vec![1, 2, 3]);
}

#[test]
fn test_chain_check_records_chained_cis() {
    let cfg = SearchConfig::builder()
        .sizes(6, 6)
        .link_pairs(1, 1)
        .iterations(2)
        .chain_check(2)
        .build();
    let report = GadgetSearch::new(cfg).run().unwrap();
    let chained = report.cells[0].chained_cis.expect("chain check enabled");
    assert!(chained > 0);
}

#[test]
fn test_reports_are_written_with_tag_prefix() {
    let report: SearchReport = GadgetSearch::new(small_config(false)).run().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (values, graphs) = report.write_files(dir.path()).unwrap();

    assert!(values.ends_with("D3_N8_L1_I6_values.csv"));
    assert!(graphs.ends_with("D3_N8_L1_I6_graphs.csv"));
    let text = std::fs::read_to_string(values).unwrap();
    assert_eq!(text.lines().count(), 2);
}
