//! The closed catalogue of analyzer statistics.
//!
//! [`Statistic`] names every structural statistic the [`GraphAnalyzer`]
//! exposes, together with the arguments it needs. Selecting a statistic by
//! string goes through [`Statistic::from_str`], which rejects names outside the
//! catalogue instead of silently doing nothing.
//!
//! The textual form is the statistic name, optionally followed by a colon and
//! a parameter: `clique_number:<d>` carries the threshold, and
//! `max_independent_set:exact` selects the exact mode.

use std::{fmt, str::FromStr, sync::Arc};

use crate::{
    Result,
    analyzer::{GraphAnalyzer, IndependenceMode},
    error::GraphError,
};

/// Strength of the guarantee attached to a statistic's value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Guarantee {
    /// The value is exact for every graph.
    Exact,
    /// The value is exact only for one-dimensional distance-threshold graphs
    /// built with the same threshold.
    ExactForThresholdGraph,
    /// The value never falls below the true quantity.
    UpperBound,
    /// The value never exceeds the true quantity.
    LowerBound,
}

/// A statistic computed by [`GraphAnalyzer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Statistic {
    /// Largest node degree.
    MaxDegree,
    /// Smallest node degree.
    MinDegree,
    /// Number of connected components.
    ConnectedComponents,
    /// Number of cut vertices.
    ArticulationPoints,
    /// Number of triangles.
    Triangles,
    /// Upper bound on the chromatic number.
    ChromaticNumber,
    /// Sliding-window clique number for threshold `d`.
    CliqueNumber {
        /// Threshold the graph was built with.
        d: f64,
    },
    /// Independent-set size computed in the given mode.
    MaxIndependentSet {
        /// Approximate or exact computation.
        mode: IndependenceMode,
    },
    /// Size of a greedy dominating set.
    DominatingNumber,
    /// Colour count of the complement.
    MinCliqueCover,
    /// Exact maximum clique size.
    MaxClique,
}

impl Statistic {
    /// Names accepted by [`Statistic::from_str`].
    pub const NAMES: [&'static str; 11] = [
        "max_degree",
        "min_degree",
        "connected_components",
        "articulation_points",
        "count_triangles",
        "chromatic_number",
        "clique_number",
        "max_independent_set",
        "dominating_number",
        "min_clique_cover",
        "max_clique",
    ];

    /// Returns the catalogue name of the statistic.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MaxDegree => "max_degree",
            Self::MinDegree => "min_degree",
            Self::ConnectedComponents => "connected_components",
            Self::ArticulationPoints => "articulation_points",
            Self::Triangles => "count_triangles",
            Self::ChromaticNumber => "chromatic_number",
            Self::CliqueNumber { .. } => "clique_number",
            Self::MaxIndependentSet { .. } => "max_independent_set",
            Self::DominatingNumber => "dominating_number",
            Self::MinCliqueCover => "min_clique_cover",
            Self::MaxClique => "max_clique",
        }
    }

    /// Reports how far the computed value can be trusted.
    #[must_use]
    pub const fn guarantee(&self) -> Guarantee {
        match self {
            Self::MaxDegree
            | Self::MinDegree
            | Self::ConnectedComponents
            | Self::ArticulationPoints
            | Self::Triangles
            | Self::MaxClique
            | Self::MaxIndependentSet {
                mode: IndependenceMode::Exact { .. },
            } => Guarantee::Exact,
            Self::CliqueNumber { .. } => Guarantee::ExactForThresholdGraph,
            Self::ChromaticNumber | Self::DominatingNumber | Self::MinCliqueCover => {
                Guarantee::UpperBound
            }
            Self::MaxIndependentSet {
                mode: IndependenceMode::Approximate,
            } => Guarantee::LowerBound,
        }
    }

    /// Computes the statistic with `analyzer`.
    ///
    /// # Errors
    /// Propagates the analyzer's errors, such as [`GraphError::EmptyGraph`]
    /// for degree statistics on a graph without nodes.
    pub fn evaluate(&self, analyzer: &GraphAnalyzer<'_>) -> Result<StatisticValue> {
        let value = match *self {
            Self::MaxDegree => analyzer.max_degree()?,
            Self::MinDegree => analyzer.min_degree()?,
            Self::ConnectedComponents => analyzer.connected_components(),
            Self::ArticulationPoints => analyzer.articulation_points(),
            Self::Triangles => analyzer.count_triangles(),
            Self::ChromaticNumber => analyzer.chromatic_number(),
            Self::CliqueNumber { d } => analyzer.clique_number(d)?,
            Self::MaxIndependentSet { mode } => analyzer.max_independent_set(mode),
            Self::DominatingNumber => analyzer.dominating_number(),
            Self::MinCliqueCover => analyzer.min_clique_cover(),
            Self::MaxClique => analyzer.max_clique(),
        };
        Ok(StatisticValue::Integer(value))
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliqueNumber { d } => write!(f, "clique_number:{d}"),
            Self::MaxIndependentSet {
                mode: IndependenceMode::Exact { .. },
            } => f.write_str("max_independent_set:exact"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Statistic {
    type Err = GraphError;

    /// Parses a catalogue name.
    ///
    /// # Examples
    /// ```
    /// use grafstat_core::{GraphError, Statistic};
    ///
    /// assert_eq!("max_degree".parse::<Statistic>()?, Statistic::MaxDegree);
    /// assert_eq!(
    ///     "clique_number:1.5".parse::<Statistic>()?,
    ///     Statistic::CliqueNumber { d: 1.5 }
    /// );
    /// assert!(matches!(
    ///     "diameter".parse::<Statistic>(),
    ///     Err(GraphError::UnknownStatistic { .. })
    /// ));
    /// # Ok::<(), GraphError>(())
    /// ```
    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (name, parameter) = match raw.split_once(':') {
            Some((name, parameter)) => (name.trim(), Some(parameter.trim())),
            None => (raw, None),
        };
        let unknown = || GraphError::UnknownStatistic {
            name: Arc::from(raw),
        };

        let statistic = match (name, parameter) {
            ("max_degree", None) => Self::MaxDegree,
            ("min_degree", None) => Self::MinDegree,
            ("connected_components", None) => Self::ConnectedComponents,
            ("articulation_points", None) => Self::ArticulationPoints,
            ("count_triangles", None) => Self::Triangles,
            ("chromatic_number", None) => Self::ChromaticNumber,
            ("clique_number", None) => {
                return Err(GraphError::MissingStatisticParameter {
                    name: Arc::from(name),
                });
            }
            ("clique_number", Some(parameter)) => Self::CliqueNumber {
                d: parameter.parse().map_err(|_| unknown())?,
            },
            ("max_independent_set", None | Some("approximate")) => Self::MaxIndependentSet {
                mode: IndependenceMode::Approximate,
            },
            ("max_independent_set", Some("exact")) => Self::MaxIndependentSet {
                mode: IndependenceMode::exact(),
            },
            ("dominating_number", None) => Self::DominatingNumber,
            ("min_clique_cover", None) => Self::MinCliqueCover,
            ("max_clique", None) => Self::MaxClique,
            _ => return Err(unknown()),
        };
        Ok(statistic)
    }
}

/// Value produced by a statistic.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum StatisticValue {
    /// A count.
    Integer(usize),
}

impl StatisticValue {
    /// Converts the value to `f64` for aggregation.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "statistic counts are bounded by the node count and stay far below 2^52"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
        }
    }
}

impl From<StatisticValue> for f64 {
    fn from(value: StatisticValue) -> Self {
        value.as_f64()
    }
}

impl fmt::Display for StatisticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}
