//! Greedy independent and dominating sets.

use super::bitset::{NodeSet, adjacency_sets};
use crate::graph::Graph;

/// Builds a maximal independent set by repeatedly taking the node with the
/// fewest remaining neighbours and discarding its neighbourhood.
pub(super) fn greedy_independent_set(graph: &Graph) -> Vec<usize> {
    let nodes = graph.node_count();
    let mut alive = vec![true; nodes];
    let mut residual: Vec<usize> = (0..nodes).map(|node| graph.degree(node)).collect();
    let mut chosen = Vec::new();

    while let Some(node) = (0..nodes)
        .filter(|&node| alive[node])
        .min_by_key(|&node| (residual[node], node))
    {
        chosen.push(node);
        let mut removed = vec![node];
        removed.extend(graph.neighbours(node).iter().copied().filter(|&other| alive[other]));
        for &gone in &removed {
            alive[gone] = false;
        }
        for &gone in &removed {
            for &other in graph.neighbours(gone) {
                if alive[other] {
                    residual[other] -= 1;
                }
            }
        }
    }
    chosen
}

/// Builds a dominating set by repeatedly taking the node whose closed
/// neighbourhood covers the most undominated nodes.
pub(super) fn greedy_dominating_set(graph: &Graph) -> Vec<usize> {
    let nodes = graph.node_count();
    let closed: Vec<NodeSet> = adjacency_sets(graph)
        .into_iter()
        .enumerate()
        .map(|(node, mut set)| {
            set.insert(node);
            set
        })
        .collect();
    let mut undominated = NodeSet::full(nodes);
    let mut chosen = Vec::new();

    while !undominated.is_empty() {
        let Some(node) = (0..nodes)
            .max_by_key(|&node| (closed[node].intersection_len(&undominated), std::cmp::Reverse(node)))
        else {
            break;
        };
        chosen.push(node);
        undominated.subtract(&closed[node]);
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn graph(nodes: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::from_edges(nodes, edges).expect("edges are in bounds")
    }

    fn is_independent(graph: &Graph, set: &[usize]) -> bool {
        set.iter()
            .enumerate()
            .all(|(i, &left)| set[i + 1..].iter().all(|&right| !graph.has_edge(left, right)))
    }

    fn is_dominating(graph: &Graph, set: &[usize]) -> bool {
        (0..graph.node_count()).all(|node| {
            set.contains(&node) || graph.neighbours(node).iter().any(|other| set.contains(other))
        })
    }

    #[rstest]
    #[case::no_nodes(graph(0, &[]), 0)]
    #[case::isolated(graph(3, &[]), 3)]
    #[case::path(graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]), 3)]
    #[case::star(graph(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]), 4)]
    #[case::triangle(graph(3, &[(0, 1), (1, 2), (0, 2)]), 1)]
    fn greedy_independent_set_on_known_graphs(#[case] graph: Graph, #[case] expected: usize) {
        let set = greedy_independent_set(&graph);
        assert!(is_independent(&graph, &set));
        assert_eq!(set.len(), expected);
    }

    #[rstest]
    #[case::no_nodes(graph(0, &[]), 0)]
    #[case::isolated(graph(3, &[]), 3)]
    #[case::star(graph(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]), 1)]
    #[case::path(graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]), 2)]
    fn greedy_dominating_set_on_known_graphs(#[case] graph: Graph, #[case] expected: usize) {
        let set = greedy_dominating_set(&graph);
        assert!(is_dominating(&graph, &set));
        assert_eq!(set.len(), expected);
    }
}
