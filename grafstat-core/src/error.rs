//! Error types for the grafstat core library.
//!
//! Defines the error enum exposed by graph construction and analysis together
//! with stable machine-readable codes and a convenient result alias.

use std::sync::Arc;

use thiserror::Error;

use crate::{distance::DistanceError, sample::SampleError};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::core::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error produced while building or analysing a proximity graph.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// The k-nearest-neighbour count must be positive.
    #[error("k must be at least 1 (got {k})")]
    InvalidNeighbourCount {
        /// The rejected neighbour count.
        k: usize,
    },
    /// A neighbour count given as a real number was not a whole number.
    #[error("k must be a positive whole number (got {value})")]
    NonIntegralNeighbourCount {
        /// The rejected value.
        value: f64,
    },
    /// The k-nearest-neighbour count must be smaller than the node count.
    #[error("k must be smaller than the number of points (k={k}, points={nodes})")]
    NeighbourCountTooLarge {
        /// The rejected neighbour count.
        k: usize,
        /// Number of points in the sample.
        nodes: usize,
    },
    /// Distance thresholds must be finite and strictly positive.
    #[error("distance threshold must be finite and positive (got {threshold})")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
    /// The statistic is undefined on a graph without nodes.
    #[error("{statistic} is undefined for a graph without nodes")]
    EmptyGraph {
        /// Name of the statistic that was requested.
        statistic: &'static str,
    },
    /// An edge referenced a node outside the graph.
    #[error("edge references node {node}, but node_count is {node_count}")]
    NodeOutOfBounds {
        /// The invalid node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// Coordinates were supplied for a different number of nodes.
    #[error("graph has {nodes} nodes but {points} coordinates were supplied")]
    CoordinateCountMismatch {
        /// Number of nodes in the graph.
        nodes: usize,
        /// Number of points supplied.
        points: usize,
    },
    /// The graph carries no coordinate attribute.
    #[error("graph nodes carry no coordinates")]
    MissingCoordinates,
    /// The coordinate-aware statistic requires scalar coordinates.
    #[error("coordinates must be one-dimensional (got dimension {dimension})")]
    NotOneDimensional {
        /// Dimension of the stored coordinates.
        dimension: usize,
    },
    /// An adjacency matrix failed validation at the conversion boundary.
    #[error("invalid adjacency matrix: {reason}")]
    InvalidAdjacencyMatrix {
        /// Explanation of the violated requirement.
        reason: Arc<str>,
    },
    /// The requested analyzer statistic does not exist.
    #[error("unknown statistic `{name}`")]
    UnknownStatistic {
        /// Name supplied by the caller.
        name: Arc<str>,
    },
    /// The statistic needs a parameter that was not supplied.
    #[error("statistic `{name}` needs a parameter, e.g. `{name}:<value>`")]
    MissingStatisticParameter {
        /// Name of the statistic.
        name: Arc<str>,
    },
    /// The requested graph construction rule does not exist.
    #[error("unknown graph construction `{name}`; expected `knn` or `distance`")]
    UnknownConstruction {
        /// Name supplied by the caller.
        name: Arc<str>,
    },
    /// The requested named test statistic does not exist.
    #[error("unknown test statistic `{name}`; expected `T_knn` or `T_dist`")]
    UnknownTestStatistic {
        /// Name supplied by the caller.
        name: Arc<str>,
    },
    /// The sample could not be constructed.
    #[error("invalid sample: {0}")]
    Sample(#[from] SampleError),
    /// A pairwise distance could not be computed.
    #[error("distance computation failed: {0}")]
    Distance(#[from] DistanceError),
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The k-nearest-neighbour count must be positive.
        InvalidNeighbourCount => InvalidNeighbourCount { .. } => "GRAPH_INVALID_NEIGHBOUR_COUNT",
        /// A neighbour count given as a real number was not a whole number.
        NonIntegralNeighbourCount => NonIntegralNeighbourCount { .. } => "GRAPH_NON_INTEGRAL_NEIGHBOUR_COUNT",
        /// The k-nearest-neighbour count must be smaller than the node count.
        NeighbourCountTooLarge => NeighbourCountTooLarge { .. } => "GRAPH_NEIGHBOUR_COUNT_TOO_LARGE",
        /// Distance thresholds must be finite and strictly positive.
        InvalidThreshold => InvalidThreshold { .. } => "GRAPH_INVALID_THRESHOLD",
        /// The statistic is undefined on a graph without nodes.
        EmptyGraph => EmptyGraph { .. } => "GRAPH_EMPTY",
        /// An edge referenced a node outside the graph.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GRAPH_NODE_OUT_OF_BOUNDS",
        /// Coordinates were supplied for a different number of nodes.
        CoordinateCountMismatch => CoordinateCountMismatch { .. } => "GRAPH_COORDINATE_COUNT_MISMATCH",
        /// The graph carries no coordinate attribute.
        MissingCoordinates => MissingCoordinates => "GRAPH_MISSING_COORDINATES",
        /// The coordinate-aware statistic requires scalar coordinates.
        NotOneDimensional => NotOneDimensional { .. } => "GRAPH_NOT_ONE_DIMENSIONAL",
        /// An adjacency matrix failed validation.
        InvalidAdjacencyMatrix => InvalidAdjacencyMatrix { .. } => "GRAPH_INVALID_ADJACENCY_MATRIX",
        /// The requested analyzer statistic does not exist.
        UnknownStatistic => UnknownStatistic { .. } => "GRAPH_UNKNOWN_STATISTIC",
        /// The statistic needs a parameter that was not supplied.
        MissingStatisticParameter => MissingStatisticParameter { .. } => "GRAPH_MISSING_STATISTIC_PARAMETER",
        /// The requested graph construction rule does not exist.
        UnknownConstruction => UnknownConstruction { .. } => "GRAPH_UNKNOWN_CONSTRUCTION",
        /// The requested named test statistic does not exist.
        UnknownTestStatistic => UnknownTestStatistic { .. } => "GRAPH_UNKNOWN_TEST_STATISTIC",
        /// The sample could not be constructed.
        SampleFailure => Sample(..) => "GRAPH_SAMPLE_FAILURE",
        /// A pairwise distance could not be computed.
        DistanceFailure => Distance(..) => "GRAPH_DISTANCE_FAILURE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GraphError::InvalidNeighbourCount { k: 0 }, "GRAPH_INVALID_NEIGHBOUR_COUNT")]
    #[case(GraphError::InvalidThreshold { threshold: -1.0 }, "GRAPH_INVALID_THRESHOLD")]
    #[case(GraphError::EmptyGraph { statistic: "max_degree" }, "GRAPH_EMPTY")]
    #[case(GraphError::MissingCoordinates, "GRAPH_MISSING_COORDINATES")]
    #[case(GraphError::Sample(SampleError::Empty), "GRAPH_SAMPLE_FAILURE")]
    #[case(
        GraphError::Distance(DistanceError::ZeroLength),
        "GRAPH_DISTANCE_FAILURE"
    )]
    fn codes_are_stable(#[case] error: GraphError, #[case] expected: &str) {
        assert_eq!(error.code().as_str(), expected);
        assert_eq!(error.code().to_string(), expected);
    }

    #[test]
    fn empty_graph_message_names_statistic() {
        let error = GraphError::EmptyGraph {
            statistic: "min_degree",
        };
        assert_eq!(
            error.to_string(),
            "min_degree is undefined for a graph without nodes"
        );
    }
}
