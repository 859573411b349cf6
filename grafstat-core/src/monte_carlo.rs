//! Sequential Monte Carlo runner.
//!
//! [`simulate`] repeats the sample → graph → statistic pipeline a fixed number
//! of times, drawing a fresh sample and building a fresh graph on every
//! iteration. Iterations share no state, so callers wanting parallelism can
//! run independent sources on separate threads.

use std::{num::NonZeroUsize, sync::Arc};

use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    error::{GraphError, GraphErrorCode, define_error_codes},
    sample::{SampleSource, SampleSourceError},
    statistic::StatisticValue,
    test_statistic::TestStatistic,
};

/// Error raised while running a simulation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// The sample source failed to produce a sample.
    #[error("iteration {iteration}: sample source `{source_name}` failed: {error}")]
    Source {
        /// Name of the failing source.
        source_name: Arc<str>,
        /// Zero-based iteration at which the failure occurred.
        iteration: usize,
        #[source]
        /// Underlying source error.
        error: SampleSourceError,
    },
    /// The statistic could not be computed for a drawn sample.
    #[error("iteration {iteration}: statistic `{statistic}` failed: {error}")]
    Statistic {
        /// Name of the failing test statistic.
        statistic: Arc<str>,
        /// Zero-based iteration at which the failure occurred.
        iteration: usize,
        #[source]
        /// Underlying graph error.
        error: GraphError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SimulationError`] variants.
    enum SimulationErrorCode for SimulationError {
        /// The sample source failed to produce a sample.
        SourceFailure => Source { .. } => "SIMULATION_SOURCE_FAILURE",
        /// The statistic could not be computed for a drawn sample.
        StatisticFailure => Statistic { .. } => "SIMULATION_STATISTIC_FAILURE",
    }
}

impl SimulationError {
    /// Retrieve the inner [`GraphErrorCode`] when the statistic failed.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Statistic { error, .. } => Some(error.code()),
            Self::Source { .. } => None,
        }
    }

    /// Returns the iteration at which the simulation stopped.
    #[must_use]
    pub const fn iteration(&self) -> usize {
        match self {
            Self::Source { iteration, .. } | Self::Statistic { iteration, .. } => *iteration,
        }
    }
}

/// Evaluates `statistic` on `iterations` fresh samples drawn from `source`.
///
/// Values are returned in draw order. The first failure aborts the run.
///
/// # Errors
/// Returns [`SimulationError::Source`] when the source fails and
/// [`SimulationError::Statistic`] when graph construction or analysis fails.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use grafstat_core::{FnSource, Sample, StatisticValue, TestStatistic, simulate};
///
/// let mut source = FnSource::new("fixed", || Ok(Sample::from_scalars(vec![0.0, 2.0, 4.0])?));
/// let iterations = NonZeroUsize::new(3).expect("non-zero");
/// let values = simulate(&mut source, &TestStatistic::dist(5.0), iterations)?;
/// assert_eq!(values, vec![StatisticValue::Integer(3); 3]);
/// # Ok::<(), grafstat_core::SimulationError>(())
/// ```
#[instrument(
    name = "core.simulate",
    err,
    skip(source, statistic),
    fields(
        source = source.name(),
        statistic = %statistic.name(),
        iterations = iterations.get(),
    ),
)]
pub fn simulate<S>(
    source: &mut S,
    statistic: &TestStatistic,
    iterations: NonZeroUsize,
) -> Result<Vec<StatisticValue>, SimulationError>
where
    S: SampleSource + ?Sized,
{
    let mut values = Vec::with_capacity(iterations.get());
    for iteration in 0..iterations.get() {
        let sample = source
            .next_sample()
            .map_err(|error| SimulationError::Source {
                source_name: Arc::from(source.name()),
                iteration,
                error,
            })?;
        let value = statistic
            .evaluate(&sample)
            .map_err(|error| SimulationError::Statistic {
                statistic: Arc::from(statistic.name()),
                iteration,
                error,
            })?;
        values.push(value);
    }
    info!(values = values.len(), "simulation finished");
    Ok(values)
}
