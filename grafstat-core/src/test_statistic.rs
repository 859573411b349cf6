//! Named test statistics binding a graph construction to an analyzer statistic.
//!
//! A [`TestStatistic`] is pure configuration: evaluating it builds the graph
//! for a sample and hands it to a fresh [`GraphAnalyzer`]. The two built-in
//! bindings are `T_knn` (k-NN graph, maximum degree) and `T_dist`
//! (distance-threshold graph, chromatic number).

use std::{fmt, sync::Arc};

use tracing::instrument;

use crate::{
    Result,
    analyzer::GraphAnalyzer,
    builder::{GraphConstruction, build_distance_graph, build_knn_graph},
    error::GraphError,
    sample::Sample,
    statistic::{Statistic, StatisticValue},
};

/// Name of the k-NN maximum-degree statistic.
pub const T_KNN: &str = "T_knn";

/// Name of the distance-threshold chromatic-number statistic.
pub const T_DIST: &str = "T_dist";

/// A named (construction, statistic) binding.
///
/// # Examples
/// ```
/// use grafstat_core::{Sample, StatisticValue, TestStatistic};
///
/// let sample = Sample::from_scalars(vec![0.0, 2.0, 4.0])?;
/// let t_dist = TestStatistic::named("T_dist", 5.0)?;
/// assert_eq!(t_dist.evaluate(&sample)?, StatisticValue::Integer(3));
/// # Ok::<(), grafstat_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TestStatistic {
    name: Arc<str>,
    construction: GraphConstruction,
    statistic: Statistic,
}

impl TestStatistic {
    /// Declares a binding under `name`.
    #[must_use]
    pub fn new(
        name: impl Into<Arc<str>>,
        construction: GraphConstruction,
        statistic: Statistic,
    ) -> Self {
        Self {
            name: name.into(),
            construction,
            statistic,
        }
    }

    /// `T_knn`: maximum degree of the k-NN graph.
    #[must_use]
    pub fn knn(k: usize) -> Self {
        Self::new(T_KNN, GraphConstruction::Knn { k }, Statistic::MaxDegree)
    }

    /// `T_dist`: chromatic number estimate of the distance-threshold graph.
    #[must_use]
    pub fn dist(d: f64) -> Self {
        Self::new(
            T_DIST,
            GraphConstruction::DistanceThreshold { d },
            Statistic::ChromaticNumber,
        )
    }

    /// Resolves a built-in statistic by name.
    ///
    /// For `T_knn` the parameter is the neighbour count and must be a whole
    /// number; for `T_dist` it is the distance threshold. Parameter ranges are
    /// checked when the statistic is evaluated.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownTestStatistic`] for any other name and
    /// [`GraphError::NonIntegralNeighbourCount`] when a `T_knn` parameter is
    /// not a non-negative whole number.
    pub fn named(name: &str, parameter: f64) -> Result<Self> {
        match name {
            T_KNN => Ok(Self::new(
                T_KNN,
                GraphConstruction::from_parameter("knn", parameter)?,
                Statistic::MaxDegree,
            )),
            T_DIST => Ok(Self::dist(parameter)),
            other => Err(GraphError::UnknownTestStatistic {
                name: Arc::from(other),
            }),
        }
    }

    /// Returns the binding's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the graph construction rule.
    #[must_use]
    pub fn construction(&self) -> GraphConstruction {
        self.construction
    }

    /// Returns the analyzer statistic.
    #[must_use]
    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// Builds the graph for `sample` and computes the bound statistic.
    ///
    /// # Errors
    /// Propagates construction errors (for example
    /// [`GraphError::NeighbourCountTooLarge`]) and analyzer errors.
    #[instrument(
        name = "core.evaluate",
        err,
        skip(self, sample),
        fields(
            statistic = %self.name,
            construction = %self.construction,
            points = sample.len(),
        ),
    )]
    pub fn evaluate(&self, sample: &Sample) -> Result<StatisticValue> {
        let graph = self.construction.build(sample)?;
        self.statistic.evaluate(&GraphAnalyzer::new(&graph))
    }
}

impl fmt::Display for TestStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} of {}", self.name, self.statistic, self.construction)
    }
}

/// Maximum degree of the k-NN graph of `sample`.
///
/// # Errors
/// Propagates the errors of [`build_knn_graph`].
pub fn t_knn(sample: &Sample, k: usize) -> Result<usize> {
    let graph = build_knn_graph(sample, k)?;
    GraphAnalyzer::new(&graph).max_degree()
}

/// Chromatic number estimate of the distance-threshold graph of `sample`.
///
/// # Errors
/// Propagates the errors of [`build_distance_graph`].
pub fn t_dist(sample: &Sample, d: f64) -> Result<usize> {
    let graph = build_distance_graph(sample, d)?;
    Ok(GraphAnalyzer::new(&graph).chromatic_number())
}
