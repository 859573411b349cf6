//! Property suites for graph construction and the threshold clique number.

mod common;

use common::{brute_force_window, proptest_config, scalar_samples, scalars};
use grafstat_core::{GraphAnalyzer, build_distance_graph, build_knn_graph};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest_config(64))]

    #[test]
    fn knn_graphs_are_symmetric_loop_free_and_cover_every_node(
        values in scalar_samples(2, 40),
        k_seed in any::<usize>(),
    ) {
        let sample = scalars(&values);
        let k = 1 + k_seed % (values.len() - 1);
        let graph = build_knn_graph(&sample, k).expect("k is in range");

        for node in 0..graph.node_count() {
            prop_assert!(!graph.has_edge(node, node));
            prop_assert!(graph.degree(node) >= k);
            for &other in graph.neighbours(node) {
                prop_assert!(graph.has_edge(other, node));
            }
        }
    }

    #[test]
    fn threshold_edges_are_exactly_the_close_pairs(
        values in scalar_samples(1, 40),
        d in 0.01_f64..5.0,
    ) {
        let graph = build_distance_graph(&scalars(&values), d).expect("d is positive");
        for left in 0..values.len() {
            prop_assert!(!graph.has_edge(left, left));
            for right in left + 1..values.len() {
                let close = (values[left] - values[right]).abs() <= d;
                prop_assert_eq!(graph.has_edge(left, right), close);
            }
        }
    }

    #[test]
    fn widening_the_threshold_only_adds_edges(
        values in scalar_samples(1, 40),
        d in 0.01_f64..3.0,
        extra in 0.0_f64..3.0,
    ) {
        let sample = scalars(&values);
        let narrow = build_distance_graph(&sample, d).expect("d is positive");
        let wide = build_distance_graph(&sample, d + extra).expect("d is positive");
        prop_assert!(narrow.edge_count() <= wide.edge_count());
        for (left, right) in narrow.edges() {
            prop_assert!(wide.has_edge(left, right));
        }
    }

    #[test]
    fn threshold_clique_number_is_the_widest_window(
        values in scalar_samples(1, 14),
        d in 0.05_f64..4.0,
    ) {
        let graph = build_distance_graph(&scalars(&values), d).expect("d is positive");
        let analyzer = GraphAnalyzer::new(&graph);
        let window = analyzer.clique_number(d).expect("graph carries scalar coordinates");
        prop_assert_eq!(window, brute_force_window(&values, d));
        prop_assert_eq!(window, analyzer.max_clique());
    }

    #[test]
    fn threshold_graph_colouring_meets_the_clique_number(
        values in scalar_samples(1, 30),
        d in 0.05_f64..4.0,
    ) {
        let graph = build_distance_graph(&scalars(&values), d).expect("d is positive");
        let analyzer = GraphAnalyzer::new(&graph);
        let colouring = analyzer.colouring();
        prop_assert!(colouring.is_proper_for(&graph));
        prop_assert!(colouring.colour_count() >= analyzer.clique_number(d).expect("scalar coordinates"));
    }
}
