//! Boundary conversions between [`Graph`] and dense 0/1 adjacency matrices.

use std::sync::Arc;

use super::Graph;
use crate::{Result, error::GraphError};

impl Graph {
    /// Builds a graph from a square, symmetric 0/1 adjacency matrix with an
    /// empty diagonal.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidAdjacencyMatrix`] when the matrix is not
    /// square, contains entries other than 0 and 1, has a non-zero diagonal or
    /// is asymmetric.
    ///
    /// # Examples
    /// ```
    /// use grafstat_core::Graph;
    ///
    /// let graph = Graph::from_adjacency_matrix(&[[0_u8, 1, 0], [1, 0, 1], [0, 1, 0]])?;
    /// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    /// assert_eq!(graph.to_adjacency_matrix()[1], vec![1_u8, 0, 1]);
    /// # Ok::<(), grafstat_core::GraphError>(())
    /// ```
    pub fn from_adjacency_matrix<R: AsRef<[u8]>>(matrix: &[R]) -> Result<Self> {
        let node_count = matrix.len();
        let mut adjacency = vec![Vec::new(); node_count];

        for (row_index, row) in matrix.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != node_count {
                return Err(invalid(format!(
                    "row {row_index} has {} entries but the matrix has {node_count} rows",
                    row.len()
                )));
            }
            for (column, &entry) in row.iter().enumerate() {
                match entry {
                    0 => {}
                    1 if column == row_index => {
                        return Err(invalid(format!(
                            "diagonal entry ({row_index}, {row_index}) must be 0"
                        )));
                    }
                    1 => adjacency[row_index].push(column),
                    other => {
                        return Err(invalid(format!(
                            "entry ({row_index}, {column}) is {other}; expected 0 or 1"
                        )));
                    }
                }
            }
        }

        for (row_index, row) in matrix.iter().enumerate() {
            for (column, &entry) in row.as_ref().iter().enumerate().skip(row_index + 1) {
                if entry != matrix[column].as_ref()[row_index] {
                    return Err(invalid(format!(
                        "matrix is not symmetric at ({row_index}, {column})"
                    )));
                }
            }
        }

        Ok(Self::from_adjacency_lists(adjacency))
    }

    /// Renders the graph as a dense 0/1 adjacency matrix.
    #[must_use]
    pub fn to_adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let node_count = self.node_count();
        self.adjacency()
            .iter()
            .map(|neighbours| {
                let mut row = vec![0_u8; node_count];
                for &other in neighbours {
                    row[other] = 1;
                }
                row
            })
            .collect()
    }
}

fn invalid(reason: String) -> GraphError {
    GraphError::InvalidAdjacencyMatrix {
        reason: Arc::from(reason),
    }
}
