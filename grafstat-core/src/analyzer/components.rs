//! Connectivity statistics: component counting and cut vertices.

use crate::graph::Graph;

/// Disjoint set union with path compression and union by rank.
#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the sets holding `left` and `right`, returning `false` when they
    /// were already joined.
    pub(super) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.sets -= 1;
        true
    }

    pub(super) fn set_count(&self) -> usize {
        self.sets
    }
}

pub(super) fn connected_components(graph: &Graph) -> usize {
    let mut sets = DisjointSet::new(graph.node_count());
    for (left, right) in graph.edges() {
        sets.union(left, right);
    }
    sets.set_count()
}

const UNVISITED: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: usize,
    parent: Option<usize>,
    next: usize,
}

/// Counts cut vertices with an explicit-stack Tarjan low-link traversal so deep
/// path-like graphs cannot overflow the call stack.
pub(super) fn articulation_points(graph: &Graph) -> usize {
    let nodes = graph.node_count();
    let mut discovery = vec![UNVISITED; nodes];
    let mut low = vec![0; nodes];
    let mut is_cut = vec![false; nodes];
    let mut timer = 0;
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..nodes {
        if discovery[root] != UNVISITED {
            continue;
        }
        discovery[root] = timer;
        low[root] = timer;
        timer += 1;
        let mut root_children = 0_usize;
        stack.push(Frame {
            node: root,
            parent: None,
            next: 0,
        });

        while let Some(&Frame { node, parent, next }) = stack.last() {
            if let Some(&child) = graph.neighbours(node).get(next) {
                let top = stack.len() - 1;
                stack[top].next += 1;
                if Some(child) == parent {
                    continue;
                }
                if discovery[child] == UNVISITED {
                    discovery[child] = timer;
                    low[child] = timer;
                    timer += 1;
                    if node == root {
                        root_children += 1;
                    }
                    stack.push(Frame {
                        node: child,
                        parent: Some(node),
                        next: 0,
                    });
                } else {
                    low[node] = low[node].min(discovery[child]);
                }
                continue;
            }

            stack.pop();
            if let Some(parent) = parent {
                low[parent] = low[parent].min(low[node]);
                if parent != root && low[node] >= discovery[parent] {
                    is_cut[parent] = true;
                }
            }
        }

        if root_children > 1 {
            is_cut[root] = true;
        }
    }

    is_cut.iter().filter(|&&cut| cut).count()
}
