//! Shared test utilities for `grafstat-core`.

use grafstat_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};

use crate::graph::Graph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `GRAFSTAT_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Generates arbitrary simple graphs with up to `max_nodes` nodes.
pub(crate) fn arbitrary_graph(max_nodes: usize) -> impl Strategy<Value = Graph> {
    (0..=max_nodes).prop_flat_map(|nodes| {
        let pairs = nodes * nodes.saturating_sub(1) / 2;
        prop::collection::vec(any::<bool>(), pairs).prop_map(move |present| {
            let edges: Vec<(usize, usize)> = (0..nodes)
                .flat_map(|left| (left + 1..nodes).map(move |right| (left, right)))
                .zip(present)
                .filter_map(|(edge, keep)| keep.then_some(edge))
                .collect();
            Graph::from_edges(nodes, &edges).expect("generated edges are in bounds")
        })
    })
}

/// Size of the largest clique, by enumerating every node subset.
pub(crate) fn brute_force_max_clique(graph: &Graph) -> usize {
    let nodes = graph.node_count();
    assert!(nodes < 20, "brute force is limited to small graphs");
    (0_u32..1 << nodes)
        .filter(|&mask| {
            let members: Vec<usize> = (0..nodes).filter(|&node| mask & (1 << node) != 0).collect();
            members.iter().enumerate().all(|(index, &left)| {
                members[index + 1..]
                    .iter()
                    .all(|&right| graph.has_edge(left, right))
            })
        })
        .map(|mask| mask.count_ones() as usize)
        .max()
        .unwrap_or(0)
}

/// Size of the smallest dominating set, by enumerating every node subset.
pub(crate) fn brute_force_domination(graph: &Graph) -> usize {
    let nodes = graph.node_count();
    assert!(nodes < 20, "brute force is limited to small graphs");
    (0_u32..1 << nodes)
        .filter(|&mask| {
            (0..nodes).all(|node| {
                mask & (1 << node) != 0
                    || graph
                        .neighbours(node)
                        .iter()
                        .any(|&other| mask & (1 << other) != 0)
            })
        })
        .map(|mask| mask.count_ones() as usize)
        .min()
        .unwrap_or(0)
}
