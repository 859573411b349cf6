//! Structural statistics over a single [`Graph`].
//!
//! [`GraphAnalyzer`] is a read-only view: every method takes `&self`, is
//! idempotent and only emits `tracing` diagnostics as a side effect. Several
//! statistics are NP-hard in general; each method documents whether its
//! answer is exact or a bound.

mod bitset;
mod clique;
mod colouring;
mod components;
mod cover;


use tracing::warn;

use crate::{Result, error::GraphError, graph::Graph};

pub use colouring::{Colouring, EXACT_COLOURING_BUDGET, EXACT_COLOURING_CUTOFF};

/// Node count above which the exact independent-set path emits a warning.
pub const DEFAULT_EXACT_WARN_THRESHOLD: usize = 30;

/// Selects how [`GraphAnalyzer::max_independent_set`] is computed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum IndependenceMode {
    /// Greedy minimum-degree heuristic; the size of a maximal independent set.
    #[default]
    Approximate,
    /// Maximum clique of the complement; exponential in the worst case.
    Exact {
        /// Node count above which a `tracing` warning is emitted first.
        warn_threshold: usize,
    },
}

impl IndependenceMode {
    /// The exact mode with [`DEFAULT_EXACT_WARN_THRESHOLD`].
    #[must_use]
    pub const fn exact() -> Self {
        Self::Exact {
            warn_threshold: DEFAULT_EXACT_WARN_THRESHOLD,
        }
    }
}

/// A read-only view computing statistics over one graph.
///
/// # Examples
/// ```
/// use grafstat_core::{Graph, GraphAnalyzer};
///
/// let triangle = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)])?;
/// let analyzer = GraphAnalyzer::new(&triangle);
/// assert_eq!(analyzer.max_degree()?, 2);
/// assert_eq!(analyzer.chromatic_number(), 3);
/// assert_eq!(analyzer.count_triangles(), 1);
/// # Ok::<(), grafstat_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GraphAnalyzer<'g> {
    graph: &'g Graph,
    nodes: usize,
}

impl<'g> GraphAnalyzer<'g> {
    /// Wraps `graph`.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            nodes: graph.node_count(),
        }
    }

    /// Returns the analysed graph.
    #[must_use]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    fn ensure_nodes(&self, statistic: &'static str) -> Result<()> {
        if self.nodes == 0 {
            return Err(GraphError::EmptyGraph { statistic });
        }
        Ok(())
    }

    /// Returns the degree of every node.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.nodes).map(|node| self.graph.degree(node)).collect()
    }

    /// Returns the largest node degree.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] when the graph has no nodes.
    pub fn max_degree(&self) -> Result<usize> {
        self.ensure_nodes("max_degree")?;
        Ok(self.degrees().into_iter().max().unwrap_or_default())
    }

    /// Returns the smallest node degree.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] when the graph has no nodes.
    pub fn min_degree(&self) -> Result<usize> {
        self.ensure_nodes("min_degree")?;
        Ok(self.degrees().into_iter().min().unwrap_or_default())
    }

    /// Counts maximal connected subgraphs.
    #[must_use]
    pub fn connected_components(&self) -> usize {
        components::connected_components(self.graph)
    }

    /// Counts nodes whose removal increases the number of components.
    #[must_use]
    pub fn articulation_points(&self) -> usize {
        components::articulation_points(self.graph)
    }

    /// Returns, for every node, the number of triangles containing it.
    #[must_use]
    pub fn triangles_per_node(&self) -> Vec<usize> {
        let mut counts = vec![0; self.nodes];
        for (left, right) in self.graph.edges() {
            // Only count each triangle from its lowest edge.
            let upper_left = self.graph.neighbours(left).iter().filter(|&&node| node > right);
            for &third in upper_left {
                if self.graph.has_edge(right, third) {
                    counts[left] += 1;
                    counts[right] += 1;
                    counts[third] += 1;
                }
            }
        }
        counts
    }

    /// Counts 3-cliques exactly.
    #[must_use]
    pub fn count_triangles(&self) -> usize {
        self.triangles_per_node().iter().sum::<usize>() / 3
    }

    /// Returns the best proper colouring found; see
    /// [`chromatic_number`](Self::chromatic_number).
    #[must_use]
    pub fn colouring(&self) -> Colouring {
        colouring::estimate(self.graph)
    }

    /// Returns an upper bound on the chromatic number.
    ///
    /// The value is the DSATUR colour count, improved below
    /// [`EXACT_COLOURING_CUTOFF`] nodes by a DSATUR-ordered branch-and-bound
    /// capped at [`EXACT_COLOURING_BUDGET`] search nodes. When the search
    /// completes inside its budget the result is exact. A graph without nodes
    /// needs no colours.
    #[must_use]
    pub fn chromatic_number(&self) -> usize {
        self.colouring().colour_count()
    }

    /// Returns the clique number of a one-dimensional distance-threshold graph.
    ///
    /// The nodes' scalar coordinates are sorted and the widest run spanning at
    /// most `d` is reported. This equals the clique number only when the graph
    /// was built by distance-threshold construction with the same `d`; for any
    /// other graph the value says nothing about its cliques.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] for a graph without nodes,
    /// [`GraphError::InvalidThreshold`] unless `d` is finite and positive,
    /// [`GraphError::MissingCoordinates`] when nodes carry no coordinates and
    /// [`GraphError::NotOneDimensional`] for vector coordinates.
    pub fn clique_number(&self, d: f64) -> Result<usize> {
        self.ensure_nodes("clique_number")?;
        if !d.is_finite() || d <= 0.0 {
            return Err(GraphError::InvalidThreshold { threshold: d });
        }
        let coordinates = self
            .graph
            .coordinates()
            .ok_or(GraphError::MissingCoordinates)?;
        let values = coordinates
            .scalars()
            .ok_or(GraphError::NotOneDimensional {
                dimension: coordinates.dimension(),
            })?;
        Ok(clique::window_clique(values, d))
    }

    /// Returns the size of a maximum clique, found by exhaustive search.
    #[must_use]
    pub fn max_clique(&self) -> usize {
        clique::maximum_clique(&bitset::adjacency_sets(self.graph)).len()
    }

    /// Returns the size of an independent set.
    ///
    /// [`IndependenceMode::Approximate`] yields a maximal (not necessarily
    /// maximum) independent set, so the value is a lower bound.
    /// [`IndependenceMode::Exact`] computes the maximum clique of the
    /// complement and warns first when the graph exceeds `warn_threshold`
    /// nodes.
    #[must_use]
    pub fn max_independent_set(&self, mode: IndependenceMode) -> usize {
        match mode {
            IndependenceMode::Approximate => cover::greedy_independent_set(self.graph).len(),
            IndependenceMode::Exact { warn_threshold } => {
                if self.nodes > warn_threshold {
                    warn!(
                        nodes = self.nodes,
                        warn_threshold,
                        "exact independent set search may be slow on graphs this large"
                    );
                }
                let complement = self.graph.complement();
                clique::maximum_clique(&bitset::adjacency_sets(&complement)).len()
            }
        }
    }

    /// Returns the size of a greedy dominating set, an upper bound on the
    /// domination number.
    #[must_use]
    pub fn dominating_number(&self) -> usize {
        cover::greedy_dominating_set(self.graph).len()
    }

    /// Returns the DSATUR colour count of the complement, an upper bound on the
    /// minimum clique cover.
    #[must_use]
    pub fn min_clique_cover(&self) -> usize {
        colouring::dsatur(&self.graph.complement()).colour_count()
    }
}
