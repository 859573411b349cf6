//! Command-line interface orchestration for grafstat.
//!
//! `evaluate` runs one of the built-in test statistics (`T_knn`, `T_dist`)
//! over every sample in a file; `statistic` pairs any catalogue statistic with
//! a graph construction. Both report the per-sample values, their summary and,
//! when requested, the empirical critical value.

mod commands;
mod samples;

pub use commands::{
    Cli, CliError, Command, CriticalValue, DEFAULT_ALPHA, EvaluateCommand, ExecutionSummary,
    GraphKind, StatisticCommand, TestStatisticName, render_summary, run_cli,
};
pub use samples::{SampleFileError, SampleReplay, parse_samples};
