//! Sample containers and the inbound sample-source abstraction.
//!
//! A [`Sample`] is the immutable input to the graph pipeline: an ordered
//! sequence of finite points, either scalars or vectors sharing a common
//! dimension. [`SampleSource`] is the seam through which an external random
//! variate generator feeds the Monte Carlo runner.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while validating sample data.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SampleError {
    /// The sample contained no points.
    #[error("sample contains no points")]
    Empty,
    /// Points must have positive dimension.
    #[error("sample points must have positive dimension")]
    ZeroDimension,
    /// A row did not match the dimension of the first row.
    #[error("row {row} has dimension {actual} but {expected} was expected")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Dimension of the offending row.
        actual: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("point {index} contains a non-finite coordinate: {value}")]
    NonFinite {
        /// Index of the point holding the value.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// An ordered, validated collection of points.
///
/// Coordinates are stored row-major in a flat buffer so that 1-D samples (the
/// common case) incur no per-point allocation.
///
/// # Examples
/// ```
/// use grafstat_core::Sample;
///
/// let sample = Sample::from_scalars(vec![0.0, 1.5, 3.0])?;
/// assert_eq!(sample.len(), 3);
/// assert_eq!(sample.dimension(), 1);
/// assert_eq!(sample.point(1), Some(&[1.5][..]));
/// # Ok::<(), grafstat_core::SampleError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    coordinates: Vec<f64>,
    dimension: usize,
}

impl Sample {
    /// Builds a one-dimensional sample from scalar observations.
    ///
    /// # Errors
    /// Returns [`SampleError::Empty`] for an empty input and
    /// [`SampleError::NonFinite`] when any value is NaN or infinite.
    pub fn from_scalars(values: Vec<f64>) -> Result<Self, SampleError> {
        if values.is_empty() {
            return Err(SampleError::Empty);
        }
        ensure_finite(&values, 1)?;
        Ok(Self {
            coordinates: values,
            dimension: 1,
        })
    }

    /// Builds a sample of vector observations.
    ///
    /// # Errors
    /// Returns [`SampleError::Empty`] when no rows are given,
    /// [`SampleError::ZeroDimension`] when rows are empty,
    /// [`SampleError::RaggedRow`] when row lengths differ and
    /// [`SampleError::NonFinite`] when any coordinate is NaN or infinite.
    ///
    /// # Examples
    /// ```
    /// use grafstat_core::{Sample, SampleError};
    ///
    /// let sample = Sample::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0]])?;
    /// assert_eq!(sample.dimension(), 2);
    ///
    /// let err = Sample::from_rows(&[vec![0.0], vec![1.0, 2.0]]).unwrap_err();
    /// assert!(matches!(err, SampleError::RaggedRow { row: 1, .. }));
    /// # Ok::<(), SampleError>(())
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SampleError> {
        let first = rows.first().ok_or(SampleError::Empty)?;
        let dimension = first.as_ref().len();
        if dimension == 0 {
            return Err(SampleError::ZeroDimension);
        }

        let mut coordinates = Vec::with_capacity(rows.len() * dimension);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dimension {
                return Err(SampleError::RaggedRow {
                    row,
                    expected: dimension,
                    actual: values.len(),
                });
            }
            coordinates.extend_from_slice(values);
        }
        ensure_finite(&coordinates, dimension)?;

        Ok(Self {
            coordinates,
            dimension,
        })
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len() / self.dimension
    }

    /// Samples always hold at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Returns the dimension shared by every point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the coordinates of point `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.dimension)?;
        self.coordinates.get(start..start + self.dimension)
    }

    /// Iterates over points in sample order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.coordinates.chunks_exact(self.dimension)
    }

    /// Returns the flat row-major coordinate buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.coordinates
    }

    /// Returns the scalar observations when the sample is one-dimensional.
    #[must_use]
    pub fn scalars(&self) -> Option<&[f64]> {
        (self.dimension == 1).then_some(self.coordinates.as_slice())
    }
}

fn ensure_finite(values: &[f64], dimension: usize) -> Result<(), SampleError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(position) => Err(SampleError::NonFinite {
            index: position / dimension,
            value: values[position],
        }),
        None => Ok(()),
    }
}

/// Error raised by a [`SampleSource`] implementation.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("sample source `{source_name}` failed: {message}")]
pub struct SampleSourceError {
    source_name: Arc<str>,
    message: Arc<str>,
}

impl SampleSourceError {
    /// Creates an error attributed to the named source.
    #[must_use]
    pub fn new(source_name: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the failing source.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Returns the human-readable failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SampleError> for SampleSourceError {
    fn from(error: SampleError) -> Self {
        Self::new("sample", error.to_string())
    }
}

/// Produces a fresh sample on every call.
///
/// The core treats implementations as opaque: distribution parameters, sample
/// size and randomness are owned by the implementor.
///
/// # Examples
/// ```
/// use grafstat_core::{Sample, SampleSource, SampleSourceError};
///
/// struct Ramp(f64);
///
/// impl SampleSource for Ramp {
///     fn name(&self) -> &str { "ramp" }
///     fn next_sample(&mut self) -> Result<Sample, SampleSourceError> {
///         self.0 += 1.0;
///         Ok(Sample::from_scalars(vec![0.0, self.0, 2.0 * self.0])?)
///     }
/// }
///
/// let mut source = Ramp(0.0);
/// assert_eq!(source.next_sample()?.scalars(), Some(&[0.0, 1.0, 2.0][..]));
/// assert_eq!(source.next_sample()?.scalars(), Some(&[0.0, 2.0, 4.0][..]));
/// # Ok::<(), SampleSourceError>(())
/// ```
pub trait SampleSource {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Draws the next sample.
    ///
    /// # Errors
    /// Returns [`SampleSourceError`] when the source cannot produce a sample.
    fn next_sample(&mut self) -> Result<Sample, SampleSourceError>;
}

/// Adapts a closure into a named [`SampleSource`].
///
/// # Examples
/// ```
/// use grafstat_core::{FnSource, Sample, SampleSource};
///
/// let mut source = FnSource::new("constant", || Ok(Sample::from_scalars(vec![1.0, 2.0])?));
/// assert_eq!(source.name(), "constant");
/// assert_eq!(source.next_sample()?.len(), 2);
/// # Ok::<(), grafstat_core::SampleSourceError>(())
/// ```
pub struct FnSource<F> {
    name: Arc<str>,
    draw: F,
}

impl<F> FnSource<F>
where
    F: FnMut() -> Result<Sample, SampleSourceError>,
{
    /// Wraps `draw` under the given `name`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, draw: F) -> Self {
        Self {
            name: name.into(),
            draw,
        }
    }
}

impl<F> SampleSource for FnSource<F>
where
    F: FnMut() -> Result<Sample, SampleSourceError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn next_sample(&mut self) -> Result<Sample, SampleSourceError> {
        (self.draw)()
    }
}
