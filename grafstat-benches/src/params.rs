//! Benchmark parameter labels.

use std::fmt;

/// Parameters for a construction or statistic benchmark run.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of points per sample.
    pub point_count: usize,
    /// Short description of the construction, e.g. `knn(k=5)`.
    pub construction: String,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.point_count, self.construction)
    }
}

/// Parameters for a simulation benchmark run.
#[derive(Clone, Debug)]
pub struct SimulationBenchParams {
    /// Number of points per sample.
    pub point_count: usize,
    /// Number of simulated samples.
    pub iterations: usize,
}

impl fmt::Display for SimulationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},runs={}", self.point_count, self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_compact() {
        let graph = GraphBenchParams {
            point_count: 100,
            construction: "knn(k=5)".to_owned(),
        };
        let simulation = SimulationBenchParams {
            point_count: 50,
            iterations: 200,
        };
        assert_eq!(graph.to_string(), "n=100,knn(k=5)");
        assert_eq!(simulation.to_string(), "n=50,runs=200");
    }
}
