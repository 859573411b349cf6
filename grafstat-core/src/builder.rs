//! Proximity-graph construction from samples.
//!
//! Two construction rules are supported:
//!
//! - k-nearest-neighbour graphs, symmetrised with the union rule described by
//!   [`KNN_SYMMETRIZATION`];
//! - distance-threshold graphs, connecting every pair at distance at most `d`.
//!
//! Both attach the sample to the resulting [`Graph`] as node coordinates so the
//! analyzer's coordinate-aware statistics can use it.

use std::{cmp::Ordering, fmt, sync::Arc};

use tracing::{instrument, warn};

use crate::{
    Result,
    distance::{euclidean_distance, scalar_distance},
    error::GraphError,
    graph::Graph,
    sample::Sample,
};

/// Rule used to turn directed k-nearest-neighbour lists into undirected edges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symmetrization {
    /// Keep `{i, j}` when `j` is among the nearest neighbours of `i` or `i` is
    /// among the nearest neighbours of `j`.
    Union,
}

/// The symmetrisation rule applied by [`build_knn_graph`].
///
/// Only the union rule is implemented. The mutual (intersection) rule yields
/// different graphs wherever local density is asymmetric and is therefore not
/// offered as an interchangeable alternative.
pub const KNN_SYMMETRIZATION: Symmetrization = Symmetrization::Union;

/// Graph construction rule together with its parameter.
///
/// # Examples
/// ```
/// use grafstat_core::{GraphConstruction, Sample};
///
/// let sample = Sample::from_scalars(vec![0.0, 0.5, 2.0])?;
/// let graph = GraphConstruction::DistanceThreshold { d: 1.0 }.build(&sample)?;
/// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphConstruction {
    /// Union-symmetrised k-nearest-neighbour graph.
    Knn {
        /// Number of neighbours drawn from each node.
        k: usize,
    },
    /// Graph connecting every pair at distance at most `d`.
    DistanceThreshold {
        /// Inclusive distance threshold.
        d: f64,
    },
}

impl GraphConstruction {
    /// Builds the graph for `sample` under this rule.
    ///
    /// # Errors
    /// Propagates the errors of [`build_knn_graph`] and
    /// [`build_distance_graph`].
    pub fn build(&self, sample: &Sample) -> Result<Graph> {
        match *self {
            Self::Knn { k } => build_knn_graph(sample, k),
            Self::DistanceThreshold { d } => build_distance_graph(sample, d),
        }
    }

    /// Resolves a construction rule from its short name and a real-valued
    /// parameter.
    ///
    /// `knn` takes the neighbour count, which must be a whole number;
    /// `distance` takes the threshold. Ranges are checked when the graph is
    /// built.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownConstruction`] for any other name and
    /// [`GraphError::NonIntegralNeighbourCount`] when a `knn` parameter is not
    /// a non-negative whole number.
    ///
    /// # Examples
    /// ```
    /// use grafstat_core::GraphConstruction;
    ///
    /// assert_eq!(
    ///     GraphConstruction::from_parameter("knn", 3.0)?,
    ///     GraphConstruction::Knn { k: 3 }
    /// );
    /// assert!(GraphConstruction::from_parameter("knn", 2.5).is_err());
    /// # Ok::<(), grafstat_core::GraphError>(())
    /// ```
    pub fn from_parameter(kind: &str, parameter: f64) -> Result<Self> {
        match kind {
            "knn" => Ok(Self::Knn {
                k: neighbour_count(parameter)?,
            }),
            "distance" => Ok(Self::DistanceThreshold { d: parameter }),
            other => Err(GraphError::UnknownConstruction {
                name: Arc::from(other),
            }),
        }
    }

    /// Returns the short name of the construction rule.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Knn { .. } => "knn",
            Self::DistanceThreshold { .. } => "distance",
        }
    }
}

/// Largest float below which every whole number is exactly representable.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is a whole number in [0, 2^53) before the cast"
)]
fn neighbour_count(parameter: f64) -> Result<usize> {
    let whole = parameter.is_finite() && parameter.fract() == 0.0;
    if !whole || parameter < 0.0 || parameter >= MAX_EXACT_WHOLE {
        return Err(GraphError::NonIntegralNeighbourCount { value: parameter });
    }
    Ok(parameter as usize)
}

impl fmt::Display for GraphConstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Knn { k } => write!(f, "knn(k={k})"),
            Self::DistanceThreshold { d } => write!(f, "distance(d={d})"),
        }
    }
}

/// Builds the union-symmetrised k-nearest-neighbour graph of `sample`.
///
/// Each point links to its `k` nearest other points. Distance ties are broken
/// by ascending node index, so the graph is deterministic for a given sample.
/// A point never links to itself, even when duplicates place other points at
/// distance zero.
///
/// # Errors
/// Returns [`GraphError::InvalidNeighbourCount`] when `k == 0` and
/// [`GraphError::NeighbourCountTooLarge`] when `k >= sample.len()`.
///
/// # Examples
/// ```
/// use grafstat_core::{Sample, build_knn_graph};
///
/// let sample = Sample::from_scalars(vec![0.0, 1.0, 2.0])?;
/// let graph = build_knn_graph(&sample, 1)?;
/// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
/// assert_eq!((0..3).map(|node| graph.degree(node)).collect::<Vec<_>>(), vec![1, 2, 1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.build_knn",
    err,
    skip(sample),
    fields(points = sample.len(), dimension = sample.dimension(), k = k),
)]
pub fn build_knn_graph(sample: &Sample, k: usize) -> Result<Graph> {
    let nodes = sample.len();
    if k == 0 {
        return Err(GraphError::InvalidNeighbourCount { k });
    }
    if k >= nodes {
        return Err(GraphError::NeighbourCountTooLarge { k, nodes });
    }

    let mut adjacency = vec![Vec::with_capacity(k); nodes];
    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(nodes - 1);
    for node in 0..nodes {
        candidates.clear();
        for other in (0..nodes).filter(|&other| other != node) {
            candidates.push((pair_distance(sample, node, other)?, other));
        }
        candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
        for &(_, neighbour) in &candidates[..k] {
            adjacency[node].push(neighbour);
            adjacency[neighbour].push(node);
        }
    }

    Graph::from_adjacency_lists(adjacency).with_shared_coordinates(Arc::new(sample.clone()))
}

/// Builds the distance-threshold graph of `sample`.
///
/// Nodes `i != j` are adjacent exactly when their distance is at most `d`.
/// One-dimensional samples are swept in sorted order; higher dimensions fall
/// back to comparing every pair.
///
/// An edgeless result is not an error but is reported with a `WARN` event.
///
/// # Errors
/// Returns [`GraphError::InvalidThreshold`] when `d` is not finite and strictly
/// positive.
///
/// # Examples
/// ```
/// use grafstat_core::{Sample, build_distance_graph};
///
/// let sample = Sample::from_scalars(vec![0.0, 0.5, 2.0])?;
/// let graph = build_distance_graph(&sample, 1.0)?;
/// assert!(graph.has_edge(0, 1));
/// assert_eq!(graph.degree(2), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.build_distance",
    err,
    skip(sample),
    fields(points = sample.len(), dimension = sample.dimension(), threshold = d),
)]
pub fn build_distance_graph(sample: &Sample, d: f64) -> Result<Graph> {
    if !d.is_finite() || d <= 0.0 {
        return Err(GraphError::InvalidThreshold { threshold: d });
    }

    let nodes = sample.len();
    let mut adjacency = vec![Vec::new(); nodes];
    match sample.scalars() {
        Some(values) => {
            let mut order: Vec<usize> = (0..nodes).collect();
            order.sort_unstable_by(|&a, &b| values[a].total_cmp(&values[b]).then(a.cmp(&b)));
            for (position, &left) in order.iter().enumerate() {
                for &right in &order[position + 1..] {
                    if scalar_distance(values[left], values[right]).value() > d {
                        break;
                    }
                    adjacency[left].push(right);
                    adjacency[right].push(left);
                }
            }
        }
        None => {
            for left in 0..nodes {
                for right in left + 1..nodes {
                    if pair_distance(sample, left, right)? <= d {
                        adjacency[left].push(right);
                        adjacency[right].push(left);
                    }
                }
            }
        }
    }

    let graph =
        Graph::from_adjacency_lists(adjacency).with_shared_coordinates(Arc::new(sample.clone()))?;
    if graph.edge_count() == 0 {
        warn!(nodes, threshold = d, "distance graph has no edges");
    }
    Ok(graph)
}

fn pair_distance(sample: &Sample, left: usize, right: usize) -> Result<f64> {
    if let Some(values) = sample.scalars() {
        return Ok(scalar_distance(values[left], values[right]).value());
    }
    let out_of_bounds = |node| GraphError::NodeOutOfBounds {
        node,
        node_count: sample.len(),
    };
    let a = sample.point(left).ok_or_else(|| out_of_bounds(left))?;
    let b = sample.point(right).ok_or_else(|| out_of_bounds(right))?;
    Ok(euclidean_distance(a, b)?.value())
}

fn by_distance_then_index(left: &(f64, usize), right: &(f64, usize)) -> Ordering {
    left.0.total_cmp(&right.0).then(left.1.cmp(&right.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scalars(values: &[f64]) -> Sample {
        Sample::from_scalars(values.to_vec()).expect("test sample must be valid")
    }

    #[test]
    fn knn_union_policy_on_three_points() {
        let graph = build_knn_graph(&scalars(&[0.0, 1.0, 2.0]), 1).expect("k=1 is valid");
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        let degrees: Vec<usize> = (0..3).map(|node| graph.degree(node)).collect();
        assert_eq!(degrees, vec![1, 2, 1]);
    }

    #[test]
    fn knn_union_keeps_one_sided_links() {
        // 3 picks 2 as nearest while 2 picks 1; union keeps both.
        let graph = build_knn_graph(&scalars(&[0.0, 1.0, 1.5, 4.0]), 1).expect("valid");
        assert!(graph.has_edge(2, 3));
        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(0, 1));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn knn_breaks_ties_by_lower_index() {
        // Node 1 is equidistant from nodes 0 and 2; both of those prefer
        // their own close partner, so only the tie-break links node 1.
        let graph =
            build_knn_graph(&scalars(&[-1.0, 0.0, 1.0, -1.2, 1.2]), 1).expect("valid");
        assert_eq!(graph.neighbours(1), &[0]);
        assert!(!graph.has_edge(1, 2));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn knn_excludes_self_for_duplicate_points() {
        let graph = build_knn_graph(&scalars(&[1.0, 1.0, 1.0]), 1).expect("valid");
        for node in 0..3 {
            assert!(!graph.has_edge(node, node));
            assert!(graph.degree(node) >= 1);
        }
    }

    #[test]
    fn knn_rejects_zero_k() {
        let err = build_knn_graph(&scalars(&[0.0, 1.0]), 0).expect_err("k=0 must fail");
        assert_eq!(err, GraphError::InvalidNeighbourCount { k: 0 });
    }

    #[rstest]
    #[case(2, 2)]
    #[case(5, 3)]
    fn knn_rejects_k_not_below_point_count(#[case] k: usize, #[case] points: usize) {
        let values: Vec<f64> = (0..points).map(|value| value as f64).collect();
        let err = build_knn_graph(&scalars(&values), k).expect_err("k >= n must fail");
        assert_eq!(err, GraphError::NeighbourCountTooLarge { k, nodes: points });
    }

    #[test]
    fn knn_uses_euclidean_distance_for_vectors() {
        let sample = Sample::from_rows(&[[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]]).expect("valid");
        let graph = build_knn_graph(&sample, 1).expect("valid");
        assert!(graph.has_edge(0, 2));
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_edge(0, 1));
    }

    #[test]
    fn distance_graph_connects_within_threshold() {
        let graph = build_distance_graph(&scalars(&[0.0, 0.5, 2.0]), 1.0).expect("valid");
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(graph.degree(2), 0);
    }

    #[test]
    fn distance_graph_threshold_is_inclusive() {
        let graph = build_distance_graph(&scalars(&[3.0, 0.0, 1.0]), 1.0).expect("valid");
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn distance_graph_for_vectors_compares_every_pair() {
        let sample = Sample::from_rows(&[[0.0, 0.0], [3.0, 4.0], [0.0, 5.0]]).expect("valid");
        let graph = build_distance_graph(&sample, 5.0).expect("valid");
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (1, 2)]);
        let tighter = build_distance_graph(&sample, 4.0).expect("valid");
        assert_eq!(tighter.edge_count(), 1);
        assert!(tighter.has_edge(1, 2));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn distance_graph_rejects_invalid_thresholds(#[case] d: f64) {
        let err = build_distance_graph(&scalars(&[0.0, 1.0]), d).expect_err("must fail");
        assert!(matches!(err, GraphError::InvalidThreshold { .. }));
    }

    #[test]
    fn builders_attach_coordinates() {
        let sample = scalars(&[0.0, 2.0, 4.0]);
        let knn = build_knn_graph(&sample, 1).expect("valid");
        let distance = build_distance_graph(&sample, 1.0).expect("valid");
        assert_eq!(knn.coordinates(), Some(&sample));
        assert_eq!(distance.coordinates(), Some(&sample));
    }

    #[test]
    fn construction_dispatches_and_displays() {
        let sample = scalars(&[0.0, 2.0, 4.0]);
        let knn = GraphConstruction::Knn { k: 2 };
        let threshold = GraphConstruction::DistanceThreshold { d: 5.0 };
        assert_eq!(knn.build(&sample).expect("valid").edge_count(), 3);
        assert_eq!(threshold.build(&sample).expect("valid").edge_count(), 3);
        assert_eq!(knn.to_string(), "knn(k=2)");
        assert_eq!(threshold.to_string(), "distance(d=5)");
        assert_eq!(knn.kind(), "knn");
        assert_eq!(threshold.kind(), "distance");
    }

    #[rstest]
    #[case("knn", 4.0, GraphConstruction::Knn { k: 4 })]
    #[case("distance", 0.25, GraphConstruction::DistanceThreshold { d: 0.25 })]
    fn from_parameter_resolves_kinds(
        #[case] kind: &str,
        #[case] parameter: f64,
        #[case] expected: GraphConstruction,
    ) {
        assert_eq!(GraphConstruction::from_parameter(kind, parameter), Ok(expected));
    }

    #[rstest]
    #[case("knn", 1.5, "GRAPH_NON_INTEGRAL_NEIGHBOUR_COUNT")]
    #[case("knn", -2.0, "GRAPH_NON_INTEGRAL_NEIGHBOUR_COUNT")]
    #[case("knn", f64::NAN, "GRAPH_NON_INTEGRAL_NEIGHBOUR_COUNT")]
    #[case("mst", 1.0, "GRAPH_UNKNOWN_CONSTRUCTION")]
    fn from_parameter_rejects_bad_input(
        #[case] kind: &str,
        #[case] parameter: f64,
        #[case] code: &str,
    ) {
        let err = GraphConstruction::from_parameter(kind, parameter).expect_err("invalid input");
        assert_eq!(err.code().as_str(), code);
    }
}
