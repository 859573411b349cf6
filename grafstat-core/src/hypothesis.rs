//! Aggregation and hypothesis-testing helpers over simulated statistic values.
//!
//! The Monte Carlo runner produces one value per iteration. Under H0 those
//! values fix the critical value at significance `alpha`; under H1 the share of
//! values above it estimates the test's power.

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors raised by the aggregation helpers.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HypothesisError {
    /// No values were supplied.
    #[error("at least one value is required")]
    EmptyValues,
    /// The significance level was outside `(0, 1)`.
    #[error("significance level must lie strictly between 0 and 1 (got {alpha})")]
    InvalidSignificance {
        /// The rejected significance level.
        alpha: f64,
    },
    /// A value was NaN or infinite.
    #[error("value {index} is not finite: {value}")]
    NonFiniteValue {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// The critical value was NaN or infinite.
    #[error("critical value must be finite (got {value})")]
    InvalidCriticalValue {
        /// The rejected critical value.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`HypothesisError`] variants.
    enum HypothesisErrorCode for HypothesisError {
        /// No values were supplied.
        EmptyValues => EmptyValues => "HYPOTHESIS_EMPTY_VALUES",
        /// The significance level was outside `(0, 1)`.
        InvalidSignificance => InvalidSignificance { .. } => "HYPOTHESIS_INVALID_SIGNIFICANCE",
        /// A value was NaN or infinite.
        NonFiniteValue => NonFiniteValue { .. } => "HYPOTHESIS_NON_FINITE_VALUE",
        /// The critical value was NaN or infinite.
        InvalidCriticalValue => InvalidCriticalValue { .. } => "HYPOTHESIS_INVALID_CRITICAL_VALUE",
    }
}

fn ensure_values(values: &[f64]) -> Result<(), HypothesisError> {
    if values.is_empty() {
        return Err(HypothesisError::EmptyValues);
    }
    match values.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(HypothesisError::NonFiniteValue {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Mean and sample standard deviation of a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    count: usize,
    mean: f64,
    std_dev: Option<f64>,
}

impl Summary {
    /// Summarises `values`.
    ///
    /// The standard deviation uses the `n - 1` denominator and is absent for a
    /// single value.
    ///
    /// # Errors
    /// Returns [`HypothesisError::EmptyValues`] for an empty slice and
    /// [`HypothesisError::NonFiniteValue`] when any value is NaN or infinite.
    ///
    /// # Examples
    /// ```
    /// use grafstat_core::Summary;
    ///
    /// let summary = Summary::from_values(&[2.0, 4.0, 6.0])?;
    /// assert_eq!(summary.mean(), 4.0);
    /// assert_eq!(summary.std_dev(), Some(2.0));
    /// # Ok::<(), grafstat_core::HypothesisError>(())
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        reason = "simulation run counts stay far below 2^52"
    )]
    pub fn from_values(values: &[f64]) -> Result<Self, HypothesisError> {
        ensure_values(values)?;
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std_dev = (count > 1).then(|| {
            let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });
        Ok(Self {
            count,
            mean,
            std_dev,
        })
    }

    /// Number of summarised values.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation, if at least two values were summarised.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        self.std_dev
    }
}

/// Returns the `q` empirical quantile of `values`, interpolating linearly
/// between order statistics.
///
/// # Errors
/// Returns [`HypothesisError::EmptyValues`] or
/// [`HypothesisError::NonFiniteValue`] for invalid input.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "positions are bounded by the slice length"
)]
pub fn quantile(values: &[f64], q: f64) -> Result<f64, HypothesisError> {
    ensure_values(values)?;
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - position.floor();
    Ok(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Returns the `1 - alpha` quantile of the H0 statistic values.
///
/// # Errors
/// Returns [`HypothesisError::InvalidSignificance`] unless `0 < alpha < 1`,
/// and the errors of [`quantile`] for invalid values.
///
/// # Examples
/// ```
/// use grafstat_core::critical_value;
///
/// let h0 = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(critical_value(&h0, 0.25)?, 4.0);
/// # Ok::<(), grafstat_core::HypothesisError>(())
/// ```
pub fn critical_value(h0: &[f64], alpha: f64) -> Result<f64, HypothesisError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(HypothesisError::InvalidSignificance { alpha });
    }
    quantile(h0, 1.0 - alpha)
}

/// The interval `(-inf, critical value]` of H0 statistic values.
///
/// Statistics falling above the critical value reject H0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CriticalRegion {
    critical_value: f64,
}

impl CriticalRegion {
    /// Derives the region from H0 values at significance `alpha`.
    ///
    /// # Errors
    /// Propagates the errors of [`critical_value`].
    pub fn from_h0(h0: &[f64], alpha: f64) -> Result<Self, HypothesisError> {
        Ok(Self {
            critical_value: critical_value(h0, alpha)?,
        })
    }

    /// Lower end of the interval, always negative infinity.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// Upper end of the interval: the critical value.
    #[must_use]
    pub const fn critical_value(&self) -> f64 {
        self.critical_value
    }

    /// Reports whether `statistic` lies above the critical value.
    #[must_use]
    pub fn rejects(&self, statistic: f64) -> bool {
        statistic > self.critical_value
    }

    /// Estimates power from H1 values; see [`estimate_power`].
    ///
    /// # Errors
    /// Propagates the errors of [`estimate_power`].
    pub fn power(&self, h1: &[f64]) -> Result<f64, HypothesisError> {
        estimate_power(h1, self.critical_value)
    }
}

/// Fraction of H1 statistic values strictly above `critical_value`.
///
/// # Errors
/// Returns [`HypothesisError::InvalidCriticalValue`] for a non-finite critical
/// value and [`HypothesisError::EmptyValues`] or
/// [`HypothesisError::NonFiniteValue`] for invalid H1 values.
///
/// # Examples
/// ```
/// use grafstat_core::estimate_power;
///
/// assert_eq!(estimate_power(&[1.0, 3.0, 4.0, 5.0], 3.0)?, 0.5);
/// # Ok::<(), grafstat_core::HypothesisError>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    reason = "simulation run counts stay far below 2^52"
)]
pub fn estimate_power(h1: &[f64], critical_value: f64) -> Result<f64, HypothesisError> {
    if !critical_value.is_finite() {
        return Err(HypothesisError::InvalidCriticalValue {
            value: critical_value,
        });
    }
    ensure_values(h1)?;
    let rejected = h1.iter().filter(|&&value| value > critical_value).count();
    Ok(rejected as f64 / h1.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn summary_of_single_value_has_no_spread() {
        let summary = Summary::from_values(&[3.0]).expect("one value is enough");
        assert_eq!(summary.count(), 1);
        assert_eq!(summary.mean(), 3.0);
        assert_eq!(summary.std_dev(), None);
    }

    #[test]
    fn summary_uses_sample_standard_deviation() {
        let summary = Summary::from_values(&[1.0, 2.0, 3.0, 4.0]).expect("valid values");
        assert_eq!(summary.mean(), 2.5);
        let expected = (5.0_f64 / 3.0).sqrt();
        let actual = summary.std_dev().expect("spread is defined");
        assert!((actual - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(&[], HypothesisErrorCode::EmptyValues)]
    #[case(&[1.0, f64::NAN], HypothesisErrorCode::NonFiniteValue)]
    fn summary_rejects_invalid_values(#[case] values: &[f64], #[case] expected: HypothesisErrorCode) {
        let err = Summary::from_values(values).expect_err("values are invalid");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.0, 5.0)]
    #[case(0.5, 3.0)]
    #[case(0.9, 4.6)]
    #[case(0.95, 4.8)]
    fn quantile_interpolates_linearly(#[case] q: f64, #[case] expected: f64) {
        let value = quantile(&[5.0, 1.0, 4.0, 2.0, 3.0], q).expect("valid values");
        assert!((value - expected).abs() < 1e-12, "q={q}: {value} != {expected}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    fn critical_value_rejects_invalid_alpha(#[case] alpha: f64) {
        let err = critical_value(&[1.0, 2.0], alpha).expect_err("alpha is invalid");
        assert_eq!(err.code(), HypothesisErrorCode::InvalidSignificance);
    }

    #[test]
    fn critical_region_rejects_values_above_the_quantile() {
        let h0: Vec<f64> = (1..=100).map(f64::from).collect();
        let region = CriticalRegion::from_h0(&h0, 0.05).expect("valid input");
        assert!((region.critical_value() - 95.05).abs() < 1e-9);
        assert_eq!(region.lower(), f64::NEG_INFINITY);
        assert!(region.rejects(96.0));
        assert!(!region.rejects(95.0));
        let power = region.power(&[90.0, 96.0, 99.0, 120.0]).expect("valid input");
        assert_eq!(power, 0.75);
    }

    #[test]
    fn power_counts_strictly_greater_values() {
        assert_eq!(estimate_power(&[2.0, 2.0, 2.0], 2.0), Ok(0.0));
        assert_eq!(
            estimate_power(&[1.0], f64::INFINITY).map_err(|err| err.code()),
            Err(HypothesisErrorCode::InvalidCriticalValue)
        );
    }
}
