//! Unit tests for the canonical graph representation.

use rstest::rstest;

use super::Graph;
use crate::{GraphError, Sample};

#[test]
fn from_edges_canonicalises_duplicates_and_self_loops() {
    let graph = Graph::from_edges(4, &[(0, 1), (1, 0), (2, 2), (3, 1), (1, 3)])
        .expect("edges are in bounds");
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 3)]);
    assert_eq!(graph.degree(2), 0);
}

#[test]
fn from_edges_rejects_out_of_bounds_nodes() {
    let err = Graph::from_edges(3, &[(0, 3)]).expect_err("node 3 does not exist");
    assert_eq!(
        err,
        GraphError::NodeOutOfBounds {
            node: 3,
            node_count: 3
        }
    );
}

#[test]
fn unknown_nodes_have_no_neighbours() {
    let graph = Graph::from_edges(2, &[(0, 1)]).expect("valid edges");
    assert!(graph.neighbours(7).is_empty());
    assert_eq!(graph.degree(7), 0);
    assert!(!graph.has_edge(7, 0));
}

#[test]
fn complement_of_path_is_single_edge() {
    let path = Graph::from_edges(3, &[(0, 1), (1, 2)]).expect("valid edges");
    let complement = path.complement();
    assert_eq!(complement.edges().collect::<Vec<_>>(), vec![(0, 2)]);
    assert_eq!(complement.complement(), path);
}

#[test]
fn complement_keeps_coordinates() {
    let sample = Sample::from_scalars(vec![0.0, 1.0]).expect("valid sample");
    let graph = Graph::empty(2)
        .with_coordinates(sample.clone())
        .expect("lengths match");
    let complement = graph.complement();
    assert_eq!(complement.edge_count(), 1);
    assert_eq!(complement.coordinates(), Some(&sample));
}

#[test]
fn with_coordinates_rejects_length_mismatch() {
    let sample = Sample::from_scalars(vec![0.0]).expect("valid sample");
    let err = Graph::empty(2)
        .with_coordinates(sample)
        .expect_err("lengths differ");
    assert_eq!(
        err,
        GraphError::CoordinateCountMismatch {
            nodes: 2,
            points: 1
        }
    );
}

#[test]
fn adjacency_matrix_round_trip_preserves_structure() {
    let matrix = vec![
        vec![0_u8, 1, 1, 0],
        vec![1, 0, 1, 0],
        vec![1, 1, 0, 1],
        vec![0, 0, 1, 0],
    ];
    let graph = Graph::from_adjacency_matrix(&matrix).expect("matrix is valid");
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.to_adjacency_matrix(), matrix);
}

#[rstest]
#[case::ragged(vec![vec![0_u8, 1], vec![1]], "row 1 has 1 entries")]
#[case::diagonal(vec![vec![1_u8, 0], vec![0, 0]], "diagonal entry (0, 0)")]
#[case::non_binary(vec![vec![0_u8, 2], vec![2, 0]], "expected 0 or 1")]
#[case::asymmetric(vec![vec![0_u8, 1], vec![0, 0]], "not symmetric at (0, 1)")]
fn adjacency_matrix_validation(#[case] matrix: Vec<Vec<u8>>, #[case] fragment: &str) {
    let err = Graph::from_adjacency_matrix(&matrix).expect_err("matrix must be rejected");
    match err {
        GraphError::InvalidAdjacencyMatrix { reason } => {
            assert!(
                reason.contains(fragment),
                "reason `{reason}` should mention `{fragment}`"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_matrix_yields_empty_graph() {
    let matrix: Vec<Vec<u8>> = Vec::new();
    let graph = Graph::from_adjacency_matrix(&matrix).expect("empty matrix is square");
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}
