//! Grafstat core library.
//!
//! Builds proximity graphs (k-nearest-neighbour and distance-threshold) from
//! point samples and computes structural statistics over them for use as test
//! statistics in Monte Carlo hypothesis testing. The pipeline is
//! sample → [`GraphConstruction`] → [`Graph`] → [`GraphAnalyzer`] →
//! [`StatisticValue`]; [`TestStatistic`] names a fixed construction and
//! statistic pair, and [`simulate`] repeats it over a [`SampleSource`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analyzer;
mod builder;
mod distance;
mod error;
mod graph;
mod hypothesis;
mod monte_carlo;
mod sample;
mod statistic;
mod test_statistic;
#[cfg(test)]
mod test_utils;

pub use crate::{
    analyzer::{
        Colouring, DEFAULT_EXACT_WARN_THRESHOLD, EXACT_COLOURING_BUDGET, EXACT_COLOURING_CUTOFF,
        GraphAnalyzer, IndependenceMode,
    },
    builder::{
        GraphConstruction, KNN_SYMMETRIZATION, Symmetrization, build_distance_graph,
        build_knn_graph,
    },
    distance::{Distance, DistanceError, Vector, VectorKind, euclidean_distance, scalar_distance},
    error::{GraphError, GraphErrorCode, Result},
    graph::Graph,
    hypothesis::{
        CriticalRegion, HypothesisError, HypothesisErrorCode, Summary, critical_value,
        estimate_power, quantile,
    },
    monte_carlo::{SimulationError, SimulationErrorCode, simulate},
    sample::{FnSource, Sample, SampleError, SampleSource, SampleSourceError},
    statistic::{Guarantee, Statistic, StatisticValue},
    test_statistic::{T_DIST, T_KNN, TestStatistic, t_dist, t_knn},
};
