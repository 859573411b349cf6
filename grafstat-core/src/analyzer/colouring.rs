//! Vertex colouring: DSATUR and a budgeted exact refinement.
//!
//! [`dsatur`] is the greedy saturation-degree heuristic. [`estimate`] runs it
//! and, for graphs below [`EXACT_COLOURING_CUTOFF`] nodes, tries to improve the
//! result with a DSATUR-ordered backtracking search capped at
//! [`EXACT_COLOURING_BUDGET`] search nodes. The search only ever replaces the
//! incumbent with a proper colouring that uses fewer colours, so the estimate
//! remains an upper bound on the chromatic number whether or not the budget
//! runs out.

use std::cmp::Reverse;

use tracing::debug;

use super::{bitset::adjacency_sets, clique::greedy_clique_size};
use crate::graph::Graph;

/// Graphs with at least this many nodes skip the exact colouring search.
pub const EXACT_COLOURING_CUTOFF: usize = 1000;

/// Maximum number of search nodes explored by the exact colouring search.
pub const EXACT_COLOURING_BUDGET: usize = 100_000;

/// A proper vertex colouring using colours `0..colour_count`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Colouring {
    colours: Vec<usize>,
    colour_count: usize,
}

impl Colouring {
    fn from_colours(colours: Vec<usize>) -> Self {
        let colour_count = colours.iter().max().map_or(0, |colour| colour + 1);
        Self {
            colours,
            colour_count,
        }
    }

    /// Returns the colour of every node, indexed by node id.
    #[must_use]
    pub fn colours(&self) -> &[usize] {
        &self.colours
    }

    /// Returns the number of distinct colours used.
    #[must_use]
    pub fn colour_count(&self) -> usize {
        self.colour_count
    }

    /// Reports whether no edge of `graph` joins two nodes of the same colour.
    #[must_use]
    pub fn is_proper_for(&self, graph: &Graph) -> bool {
        self.colours.len() == graph.node_count()
            && graph
                .edges()
                .all(|(left, right)| self.colours[left] != self.colours[right])
    }
}

/// Incremental saturation bookkeeping shared by the heuristic and the search.
struct SaturationState<'g> {
    graph: &'g Graph,
    palette: usize,
    colours: Vec<Option<usize>>,
    neighbour_colours: Vec<u32>,
    saturation: Vec<usize>,
}

impl<'g> SaturationState<'g> {
    fn new(graph: &'g Graph, palette: usize) -> Self {
        let nodes = graph.node_count();
        Self {
            graph,
            palette,
            colours: vec![None; nodes],
            neighbour_colours: vec![0; nodes * palette],
            saturation: vec![0; nodes],
        }
    }

    fn is_free(&self, node: usize, colour: usize) -> bool {
        self.neighbour_colours[node * self.palette + colour] == 0
    }

    fn assign(&mut self, node: usize, colour: usize) {
        self.colours[node] = Some(colour);
        for &other in self.graph.neighbours(node) {
            let slot = &mut self.neighbour_colours[other * self.palette + colour];
            if *slot == 0 {
                self.saturation[other] += 1;
            }
            *slot += 1;
        }
    }

    fn unassign(&mut self, node: usize) {
        let Some(colour) = self.colours[node].take() else {
            return;
        };
        for &other in self.graph.neighbours(node) {
            let slot = &mut self.neighbour_colours[other * self.palette + colour];
            *slot -= 1;
            if *slot == 0 {
                self.saturation[other] -= 1;
            }
        }
    }

    /// Picks the uncoloured node with the highest saturation, breaking ties by
    /// degree and then by the lowest node id.
    fn select(&self) -> Option<usize> {
        (0..self.colours.len())
            .filter(|&node| self.colours[node].is_none())
            .max_by_key(|&node| (self.saturation[node], self.graph.degree(node), Reverse(node)))
    }

    fn snapshot(&self) -> Colouring {
        Colouring::from_colours(self.colours.iter().flatten().copied().collect())
    }
}

/// Colours `graph` with the DSATUR heuristic.
pub(super) fn dsatur(graph: &Graph) -> Colouring {
    let max_degree = (0..graph.node_count())
        .map(|node| graph.degree(node))
        .max();
    let Some(max_degree) = max_degree else {
        return Colouring::from_colours(Vec::new());
    };
    // A node has at most `max_degree` coloured neighbours, so one of the first
    // `max_degree + 1` colours is always free.
    let palette = max_degree + 1;
    let mut state = SaturationState::new(graph, palette);
    while let Some(node) = state.select() {
        let colour = (0..palette)
            .find(|&colour| state.is_free(node, colour))
            .unwrap_or(max_degree);
        state.assign(node, colour);
    }
    state.snapshot()
}

struct ExactSearch<'g> {
    state: SaturationState<'g>,
    best: Colouring,
    lower_bound: usize,
    budget: usize,
    visited: usize,
    exhausted: bool,
}

impl ExactSearch<'_> {
    fn proven_optimal(&self) -> bool {
        self.best.colour_count <= self.lower_bound
    }

    fn search(&mut self, used: usize) {
        if self.proven_optimal() {
            return;
        }
        if self.visited >= self.budget {
            self.exhausted = true;
            return;
        }
        self.visited += 1;

        let Some(node) = self.state.select() else {
            // Every branch keeps `used` below the incumbent's colour count.
            self.best = self.state.snapshot();
            return;
        };

        for colour in 0..=used {
            if colour + 1 >= self.best.colour_count {
                break;
            }
            if !self.state.is_free(node, colour) {
                continue;
            }
            self.state.assign(node, colour);
            self.search(used.max(colour + 1));
            self.state.unassign(node);
            if self.exhausted || self.proven_optimal() {
                break;
            }
        }
    }
}

/// Returns the best colouring found by DSATUR and, below the size cutoff, the
/// budgeted exact search.
pub(super) fn estimate(graph: &Graph) -> Colouring {
    let heuristic = dsatur(graph);
    let nodes = graph.node_count();
    // Two colours are optimal for any graph with an edge.
    if nodes >= EXACT_COLOURING_CUTOFF || heuristic.colour_count <= 2 {
        return heuristic;
    }

    let lower_bound = greedy_clique_size(&adjacency_sets(graph));
    if lower_bound >= heuristic.colour_count {
        return heuristic;
    }

    let heuristic_colours = heuristic.colour_count;
    let mut search = ExactSearch {
        state: SaturationState::new(graph, heuristic_colours),
        best: heuristic,
        lower_bound,
        budget: EXACT_COLOURING_BUDGET,
        visited: 0,
        exhausted: false,
    };
    search.search(0);
    debug!(
        nodes,
        heuristic_colours,
        lower_bound,
        colours = search.best.colour_count,
        visited = search.visited,
        exhausted = search.exhausted,
        "exact colouring search finished"
    );
    search.best
}
