//! Shared fixtures for the `grafstat-core` integration suites.
#![allow(dead_code, reason = "each integration binary uses a different subset")]

use grafstat_core::Sample;
use grafstat_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use test_strategy::Arbitrary;

/// Shape of the synthetic one-dimensional samples fed to property suites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub enum SampleLayout {
    /// Points drawn uniformly from `[-10, 10)`.
    #[weight(3)]
    Uniform,
    /// Tight clusters around a handful of centres.
    #[weight(2)]
    Clustered,
    /// Heavy-tailed Cauchy draws.
    #[weight(2)]
    HeavyTailed,
    /// Small integers with many exact duplicates.
    #[weight(1)]
    Duplicates,
}

impl SampleLayout {
    pub fn generate(self, seed: u64, len: usize) -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(seed);
        match self {
            Self::Uniform => (0..len).map(|_| rng.gen_range(-10.0..10.0)).collect(),
            Self::Clustered => {
                let centres: Vec<f64> = (0..3).map(|_| rng.gen_range(-20.0..20.0)).collect();
                (0..len)
                    .map(|index| centres[index % centres.len()] + rng.gen_range(-0.5..0.5))
                    .collect()
            }
            Self::HeavyTailed => (0..len)
                .map(|_| (std::f64::consts::PI * (rng.r#gen::<f64>() - 0.5)).tan())
                .collect(),
            Self::Duplicates => (0..len)
                .map(|_| f64::from(rng.gen_range(0_u8..5)))
                .collect(),
        }
    }
}

/// Strategy producing scalar samples with between `min_len` and `max_len`
/// points.
pub fn scalar_samples(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (any::<SampleLayout>(), any::<u64>(), min_len..=max_len)
        .prop_map(|(layout, seed, len)| layout.generate(seed, len))
}

/// Builds a sample, panicking on invalid input.
pub fn scalars(values: &[f64]) -> Sample {
    Sample::from_scalars(values.to_vec()).expect("test samples are valid")
}

/// Builds a proptest configuration from the shared CI profile.
pub fn proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Largest number of values lying in a closed window of width `d`, checked
/// against every window anchored at a value.
pub fn brute_force_window(values: &[f64], d: f64) -> usize {
    values
        .iter()
        .map(|&start| {
            values
                .iter()
                .filter(|&&value| value >= start && value - start <= d)
                .count()
        })
        .max()
        .unwrap_or(0)
}
