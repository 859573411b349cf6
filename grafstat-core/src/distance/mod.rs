//! Distance primitives used to build proximity graphs.
//!
//! Points are compared with the Euclidean norm, which reduces to the absolute
//! difference for one-dimensional samples. The routines validate their inputs
//! and surface detailed errors so graph construction can reject malformed
//! points instead of producing silently wrong edges.

mod euclidean;
mod types;

pub use self::euclidean::{euclidean_distance, scalar_distance};
pub use self::types::{Distance, DistanceError, Vector, VectorKind};
