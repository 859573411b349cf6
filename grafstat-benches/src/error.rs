//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` before a benchmark starts.

use grafstat_core::{GraphError, SampleSourceError, SimulationError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic sample configuration was rejected.
    #[error("synthetic source configuration failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Drawing a sample failed.
    #[error("sample draw failed: {0}")]
    Source(#[from] SampleSourceError),
    /// Graph construction or analysis failed.
    #[error("graph operation failed: {0}")]
    Graph(#[from] GraphError),
    /// A simulation run failed.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// Description of the parameter that was zero.
        context: &'static str,
    },
}
