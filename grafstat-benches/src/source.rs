//! Seeded synthetic sample source for benchmarking.
//!
//! [`SyntheticSource`] draws points uniformly from the unit hypercube. The
//! generator is seeded, so every benchmark run sees the same sequence of
//! samples.

use grafstat_core::{Sample, SampleSource, SampleSourceError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur while configuring a synthetic source.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
}

/// Configuration for synthetic sample generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points per sample.
    pub point_count: usize,
    /// Dimension of every point.
    pub dimensions: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A [`SampleSource`] of uniformly distributed points.
///
/// # Examples
///
/// ```
/// use grafstat_benches::source::{SyntheticConfig, SyntheticSource};
/// use grafstat_core::SampleSource;
///
/// let config = SyntheticConfig { point_count: 10, dimensions: 1, seed: 42 };
/// let mut source = SyntheticSource::new(&config).expect("valid config");
/// let sample = source.next_sample().expect("draw succeeds");
/// assert_eq!(sample.len(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    rng: SmallRng,
    point_count: usize,
    dimensions: usize,
}

impl SyntheticSource {
    /// Creates a source from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroPoints`] if `point_count` is zero,
    /// or [`SyntheticError::ZeroDimensions`] if `dimensions` is zero.
    pub fn new(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.point_count == 0 {
            return Err(SyntheticError::ZeroPoints);
        }
        if config.dimensions == 0 {
            return Err(SyntheticError::ZeroDimensions);
        }
        Ok(Self {
            rng: SmallRng::seed_from_u64(config.seed),
            point_count: config.point_count,
            dimensions: config.dimensions,
        })
    }

    /// Returns the dimension of every generated point.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl SampleSource for SyntheticSource {
    #[expect(
        clippy::unnecessary_literal_bound,
        reason = "SampleSource constrains the return type to &str"
    )]
    fn name(&self) -> &str {
        "synthetic"
    }

    fn next_sample(&mut self) -> Result<Sample, SampleSourceError> {
        let total = self.point_count.saturating_mul(self.dimensions);
        let coordinates: Vec<f64> = (0..total).map(|_| self.rng.gen_range(0.0..1.0)).collect();
        let sample = if self.dimensions == 1 {
            Sample::from_scalars(coordinates)?
        } else {
            let rows: Vec<&[f64]> = coordinates.chunks_exact(self.dimensions).collect();
            Sample::from_rows(&rows)?
        };
        Ok(sample)
    }
}
