//! Fixed-capacity node sets backed by 64-bit words.
//!
//! The exact clique search and the colouring routines intersect neighbourhoods
//! in their inner loops; packing adjacency rows into words keeps those
//! intersections cheap.

use crate::graph::Graph;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct NodeSet {
    words: Vec<u64>,
}

impl NodeSet {
    pub(super) fn empty(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
        }
    }

    pub(super) fn full(capacity: usize) -> Self {
        let mut set = Self::empty(capacity);
        for node in 0..capacity {
            set.insert(node);
        }
        set
    }

    pub(super) fn insert(&mut self, node: usize) {
        self.words[node / WORD_BITS] |= 1_u64 << (node % WORD_BITS);
    }

    pub(super) fn remove(&mut self, node: usize) {
        self.words[node / WORD_BITS] &= !(1_u64 << (node % WORD_BITS));
    }

    pub(super) fn contains(&self, node: usize) -> bool {
        self.words
            .get(node / WORD_BITS)
            .is_some_and(|word| word & (1_u64 << (node % WORD_BITS)) != 0)
    }

    pub(super) fn len(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    pub(super) fn intersection(&self, other: &Self) -> Self {
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(left, right)| left & right)
                .collect(),
        }
    }

    pub(super) fn intersection_len(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(left, right)| (left & right).count_ones() as usize)
            .sum()
    }

    pub(super) fn difference(&self, other: &Self) -> Self {
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(left, right)| left & !right)
                .collect(),
        }
    }

    pub(super) fn subtract(&mut self, other: &Self) {
        for (left, right) in self.words.iter_mut().zip(&other.words) {
            *left &= !right;
        }
    }

    pub(super) fn union_with(&mut self, other: &Self) {
        for (left, right) in self.words.iter_mut().zip(&other.words) {
            *left |= right;
        }
    }

    /// Iterates members in ascending order.
    pub(super) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(index * WORD_BITS + bit)
            })
        })
    }
}

/// Packs every adjacency list of `graph` into a [`NodeSet`].
pub(super) fn adjacency_sets(graph: &Graph) -> Vec<NodeSet> {
    let nodes = graph.node_count();
    (0..nodes)
        .map(|node| {
            let mut set = NodeSet::empty(nodes);
            for &other in graph.neighbours(node) {
                set.insert(other);
            }
            set
        })
        .collect()
}
