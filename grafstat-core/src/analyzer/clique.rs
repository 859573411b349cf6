//! Clique statistics.
//!
//! Two very different routines live here. [`window_clique`] is the exact
//! O(n log n) answer for one-dimensional distance-threshold graphs, where every
//! clique is a run of sorted coordinates spanning at most `d`. The general
//! maximum clique is found by [`maximum_clique`], a Bron–Kerbosch search with
//! Tomita pivoting whose running time is exponential in the worst case.

use super::bitset::NodeSet;

/// Returns the largest number of values inside any closed window of width `d`.
pub(super) fn window_clique(values: &[f64], d: f64) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mut best = 0;
    let mut left = 0;
    for right in 0..sorted.len() {
        while sorted[right] - sorted[left] > d {
            left += 1;
        }
        best = best.max(right - left + 1);
    }
    best
}

/// Returns the members of a maximum clique in ascending order.
pub(super) fn maximum_clique(adjacency: &[NodeSet]) -> Vec<usize> {
    let mut search = CliqueSearch {
        adjacency,
        best: Vec::new(),
    };
    let mut current = Vec::new();
    search.expand(&mut current, NodeSet::full(adjacency.len()));
    search.best.sort_unstable();
    search.best
}

struct CliqueSearch<'a> {
    adjacency: &'a [NodeSet],
    best: Vec<usize>,
}

impl CliqueSearch<'_> {
    fn expand(&mut self, current: &mut Vec<usize>, mut candidates: NodeSet) {
        if candidates.is_empty() {
            if current.len() > self.best.len() {
                self.best.clone_from(current);
            }
            return;
        }
        if current.len() + candidates.len() <= self.best.len() {
            return;
        }

        let Some(pivot) = candidates
            .iter()
            .max_by_key(|&node| self.adjacency[node].intersection_len(&candidates))
        else {
            return;
        };
        let branches: Vec<usize> = candidates.difference(&self.adjacency[pivot]).iter().collect();
        for node in branches {
            current.push(node);
            self.expand(current, candidates.intersection(&self.adjacency[node]));
            current.pop();
            candidates.remove(node);
        }
    }
}

/// Size of a clique grown greedily from every node; a cheap lower bound on the
/// clique number.
pub(super) fn greedy_clique_size(adjacency: &[NodeSet]) -> usize {
    let mut best = 0;
    for seed in 0..adjacency.len() {
        let mut size = 1;
        let mut candidates = adjacency[seed].clone();
        while let Some(next) = candidates
            .iter()
            .max_by_key(|&node| adjacency[node].intersection_len(&candidates))
        {
            size += 1;
            candidates = candidates.intersection(&adjacency[next]);
        }
        best = best.max(size);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyzer::bitset::adjacency_sets, graph::Graph};
    use rstest::rstest;

    #[rstest]
    #[case::empty(&[], 1.0, 0)]
    #[case::single(&[4.0], 1.0, 1)]
    #[case::unit_window(&[0.0, 1.0, 3.0], 1.0, 2)]
    #[case::wide_window(&[0.0, 1.0, 3.0], 3.0, 3)]
    #[case::unsorted(&[3.0, 0.0, 2.5, 1.0, 2.0], 1.0, 3)]
    #[case::duplicates(&[1.0, 1.0, 1.0, 5.0], 0.5, 3)]
    fn window_clique_counts_points(#[case] values: &[f64], #[case] d: f64, #[case] expected: usize) {
        assert_eq!(window_clique(values, d), expected);
    }

    #[test]
    fn maximum_clique_finds_k4_inside_noise() {
        let graph = Graph::from_edges(
            7,
            &[
                (1, 3),
                (1, 4),
                (1, 6),
                (3, 4),
                (3, 6),
                (4, 6),
                (0, 1),
                (0, 2),
                (2, 5),
                (5, 6),
            ],
        )
        .expect("edges are in bounds");
        let clique = maximum_clique(&adjacency_sets(&graph));
        assert_eq!(clique, vec![1, 3, 4, 6]);
    }

    #[test]
    fn maximum_clique_of_edgeless_graph_is_a_single_node() {
        let graph = Graph::empty(3);
        assert_eq!(maximum_clique(&adjacency_sets(&graph)).len(), 1);
        assert!(maximum_clique(&adjacency_sets(&Graph::empty(0))).is_empty());
    }

    #[test]
    fn greedy_clique_is_a_lower_bound() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4)])
            .expect("edges are in bounds");
        let sets = adjacency_sets(&graph);
        let greedy = greedy_clique_size(&sets);
        assert!(greedy <= maximum_clique(&sets).len());
        assert_eq!(greedy, 3);
    }
}
