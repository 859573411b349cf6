//! Canonical undirected simple graph shared by the builders and the analyzer.
//!
//! Nodes are the integers `0..n` in sample order. Adjacency lists are sorted
//! and deduplicated, self-loops are never stored, and every edge appears in
//! both endpoint lists. Graphs are immutable once constructed; adjacency
//! matrices enter and leave only through the explicit conversions
//! [`Graph::from_adjacency_matrix`] and [`Graph::to_adjacency_matrix`].

mod matrix;

use std::sync::Arc;

use crate::{Result, error::GraphError, sample::Sample};

/// An undirected simple graph with an optional coordinate attribute per node.
///
/// # Examples
/// ```
/// use grafstat_core::Graph;
///
/// let path = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 1), (1, 1)])?;
/// assert_eq!(path.node_count(), 3);
/// assert_eq!(path.edge_count(), 2);
/// assert_eq!(path.neighbours(1), &[0, 2]);
/// assert!(path.has_edge(2, 1));
/// assert!(!path.has_edge(0, 2));
/// # Ok::<(), grafstat_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
    coordinates: Option<Arc<Sample>>,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn empty(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
            coordinates: None,
        }
    }

    /// Builds a graph from an undirected edge list.
    ///
    /// Edges are canonicalised: self-loops are dropped and duplicates (in
    /// either orientation) collapse to a single edge.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when an endpoint is not smaller
    /// than `node_count`.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); node_count];
        for &(left, right) in edges {
            for node in [left, right] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfBounds { node, node_count });
                }
            }
            if left == right {
                continue;
            }
            adjacency[left].push(right);
            adjacency[right].push(left);
        }
        Ok(Self::from_adjacency_lists(adjacency))
    }

    /// Normalises raw adjacency lists into the canonical form.
    ///
    /// Lists must already be symmetric; each list is sorted, deduplicated and
    /// stripped of self-references.
    pub(crate) fn from_adjacency_lists(mut adjacency: Vec<Vec<usize>>) -> Self {
        let mut degree_sum = 0;
        for (node, neighbours) in adjacency.iter_mut().enumerate() {
            neighbours.retain(|&other| other != node);
            neighbours.sort_unstable();
            neighbours.dedup();
            degree_sum += neighbours.len();
        }
        Self {
            adjacency,
            edge_count: degree_sum / 2,
            coordinates: None,
        }
    }

    /// Attaches the sample the graph was built from as node coordinates.
    ///
    /// # Errors
    /// Returns [`GraphError::CoordinateCountMismatch`] when the sample length
    /// differs from the node count.
    ///
    /// # Examples
    /// ```
    /// use grafstat_core::{Graph, Sample};
    ///
    /// let sample = Sample::from_scalars(vec![0.0, 0.4])?;
    /// let graph = Graph::from_edges(2, &[(0, 1)])?.with_coordinates(sample)?;
    /// assert_eq!(graph.coordinates().map(Sample::len), Some(2));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_coordinates(self, sample: Sample) -> Result<Self> {
        self.with_shared_coordinates(Arc::new(sample))
    }

    pub(crate) fn with_shared_coordinates(mut self, sample: Arc<Sample>) -> Result<Self> {
        if sample.len() != self.node_count() {
            return Err(GraphError::CoordinateCountMismatch {
                nodes: self.node_count(),
                points: sample.len(),
            });
        }
        self.coordinates = Some(sample);
        Ok(self)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the sorted neighbours of `node`; empty for unknown nodes.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the degree of `node`; zero for unknown nodes.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }

    /// Returns whether `left` and `right` are adjacent.
    #[must_use]
    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.neighbours(left).binary_search(&right).is_ok()
    }

    /// Iterates over edges as `(smaller, larger)` pairs in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(node, neighbours)| {
                neighbours
                    .iter()
                    .copied()
                    .filter(move |&other| other > node)
                    .map(move |other| (node, other))
            })
    }

    /// Returns the node coordinates when the graph was built from a sample.
    #[must_use]
    pub fn coordinates(&self) -> Option<&Sample> {
        self.coordinates.as_deref()
    }

    /// Returns the complement graph on the same node set.
    ///
    /// Coordinates are carried over unchanged.
    #[must_use]
    pub fn complement(&self) -> Self {
        let node_count = self.node_count();
        let adjacency: Vec<Vec<usize>> = self
            .adjacency
            .iter()
            .enumerate()
            .map(|(node, neighbours)| {
                let mut present = neighbours.iter().peekable();
                (0..node_count)
                    .filter(|&other| {
                        if present.next_if(|&&next| next == other).is_some() {
                            return false;
                        }
                        other != node
                    })
                    .collect()
            })
            .collect();
        let degree_sum: usize = adjacency.iter().map(Vec::len).sum();
        Self {
            adjacency,
            edge_count: degree_sum / 2,
            coordinates: self.coordinates.clone(),
        }
    }

    pub(crate) fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }
}

#[cfg(test)]
mod tests;
