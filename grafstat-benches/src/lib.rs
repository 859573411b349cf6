//! Benchmark support crate for grafstat.
//!
//! Provides seeded synthetic sample sources and parameter labels used by the
//! Criterion benchmarks for graph construction, statistic evaluation and
//! Monte Carlo simulation.

pub mod error;
pub mod params;
pub mod source;
