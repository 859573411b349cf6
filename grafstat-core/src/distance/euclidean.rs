use crate::distance::types::{Distance, DistanceError, Result, Vector, VectorKind};

/// Computes the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use grafstat_core::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0])?;
///     assert_eq!(distance.value(), 5.0);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`] when any input is empty.
/// - [`DistanceError::DimensionMismatch`] when input lengths differ.
/// - [`DistanceError::NonFinite`] when a value is NaN or infinite.
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<Distance> {
    let left = Vector::new(left, VectorKind::Left)?;
    let right = Vector::new(right, VectorKind::Right)?;
    if left.dimension() != right.dimension() {
        return Err(DistanceError::DimensionMismatch {
            left: left.dimension(),
            right: right.dimension(),
        });
    }

    if let ([l], [r]) = (&*left, &*right) {
        return Ok(scalar_distance(*l, *r));
    }

    let sum: f64 = left
        .iter()
        .zip(right.iter())
        .map(|(l, r)| (l - r) * (l - r))
        .sum();

    Ok(Distance::from_raw(sum.sqrt()))
}

/// Absolute difference between two scalars; the 1-D Euclidean distance.
///
/// Callers are expected to pass finite values, which [`crate::Sample`]
/// guarantees.
#[must_use]
pub fn scalar_distance(left: f64, right: f64) -> Distance {
    Distance::from_raw((left - right).abs())
}
