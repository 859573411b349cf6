//! Command implementations and argument parsing for the grafstat CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use grafstat_core::{
    GraphConstruction, GraphError, Guarantee, HypothesisError, Sample, SimulationError,
    Statistic, StatisticValue, Summary, T_DIST, T_KNN, TestStatistic, critical_value, simulate,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::samples::{SampleFileError, SampleReplay, parse_samples};

/// Significance level used by `evaluate` when `--alpha` is omitted.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "grafstat",
    about = "Evaluate proximity-graph test statistics over samples."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Evaluate a built-in test statistic on every sample in a file.
    Evaluate(EvaluateCommand),
    /// Evaluate a catalogue statistic on the graph of every sample in a file.
    Statistic(StatisticCommand),
}

/// Options accepted by the `evaluate` command.
#[derive(Debug, Args, Clone)]
pub struct EvaluateCommand {
    /// Sample file with one sample per line.
    pub path: PathBuf,

    /// Test statistic to evaluate.
    #[arg(long, value_enum)]
    pub statistic: TestStatisticName,

    /// Neighbour count for `t-knn`, distance threshold for `t-dist`.
    #[arg(long, allow_negative_numbers = true)]
    pub parameter: f64,

    /// Significance level of the reported critical value.
    #[arg(long, default_value_t = DEFAULT_ALPHA, value_parser = parse_alpha)]
    pub alpha: f64,
}

/// Options accepted by the `statistic` command.
#[derive(Debug, Args, Clone)]
pub struct StatisticCommand {
    /// Sample file with one sample per line.
    pub path: PathBuf,

    /// Graph construction rule.
    #[arg(long, value_enum)]
    pub graph: GraphKind,

    /// Neighbour count for `knn`, distance threshold for `distance`.
    #[arg(long, allow_negative_numbers = true)]
    pub parameter: f64,

    /// Statistic name, e.g. `max_degree` or `clique_number:0.5`.
    #[arg(long)]
    pub statistic: Statistic,

    /// Significance level of the critical value; omitted unless given.
    #[arg(long, value_parser = parse_alpha)]
    pub alpha: Option<f64>,
}

/// Built-in test statistics selectable from the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum TestStatisticName {
    /// Maximum degree of the k-nearest-neighbour graph.
    TKnn,
    /// Chromatic number estimate of the distance-threshold graph.
    TDist,
}

impl TestStatisticName {
    const fn as_str(self) -> &'static str {
        match self {
            Self::TKnn => T_KNN,
            Self::TDist => T_DIST,
        }
    }
}

/// Graph construction rules selectable from the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum GraphKind {
    /// Union-symmetrised k-nearest-neighbour graph.
    Knn,
    /// Graph joining points at distance at most the threshold.
    Distance,
}

impl GraphKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Knn => "knn",
            Self::Distance => "distance",
        }
    }
}

fn parse_alpha(raw: &str) -> Result<f64, String> {
    let alpha: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(format!("alpha must lie strictly between 0 and 1 (got {alpha})"))
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The sample file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The sample file could not be parsed.
    #[error("failed to read samples from `{path}`: {source}")]
    SampleFile {
        /// Path of the sample file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: SampleFileError,
    },
    /// The statistic could not be configured.
    #[error(transparent)]
    Core(#[from] GraphError),
    /// Evaluating a sample failed.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// The values could not be summarised.
    #[error(transparent)]
    Hypothesis(#[from] HypothesisError),
}

impl CliError {
    /// Stable machine-readable code of the underlying core error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(error) => Some(error.code().as_str()),
            Self::Simulation(error) => Some(
                error
                    .graph_code()
                    .map_or_else(|| error.code().as_str(), |code| code.as_str()),
            ),
            Self::Hypothesis(error) => Some(error.code().as_str()),
            Self::Io { .. } | Self::SampleFile { .. } => None,
        }
    }
}

/// Critical value reported alongside the summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValue {
    /// Significance level.
    pub alpha: f64,
    /// Empirical `1 - alpha` quantile of the values.
    pub value: f64,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Statistic that was evaluated.
    pub statistic: TestStatistic,
    /// One value per sample, in file order.
    pub values: Vec<StatisticValue>,
    /// Mean and standard deviation of `values`.
    pub summary: Summary,
    /// Present when requested and more than one sample was evaluated.
    pub critical: Option<CriticalValue>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the sample file cannot be loaded, the statistic
/// is misconfigured or evaluation fails on any sample.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use grafstat_cli::cli::{Cli, Command, EvaluateCommand, TestStatisticName, run_cli};
/// # use grafstat_core::StatisticValue;
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 2 4\n0 10 20\n")?;
/// let cli = Cli {
///     command: Command::Evaluate(EvaluateCommand {
///         path: file.path().to_path_buf(),
///         statistic: TestStatisticName::TDist,
///         parameter: 5.0,
///         alpha: 0.05,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(
///     summary.values,
///     vec![StatisticValue::Integer(3), StatisticValue::Integer(1)]
/// );
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Evaluate(command) => {
            span.record("command", field::display("evaluate"));
            run_evaluate(command)
        }
        Command::Statistic(command) => {
            span.record("command", field::display("statistic"));
            run_statistic(command)
        }
    }
}

#[instrument(
    name = "cli.evaluate",
    err,
    skip(command),
    fields(statistic = command.statistic.as_str(), parameter = command.parameter),
)]
pub(super) fn run_evaluate(command: EvaluateCommand) -> Result<ExecutionSummary, CliError> {
    let statistic = TestStatistic::named(command.statistic.as_str(), command.parameter)?;
    evaluate_file(&command.path, statistic, Some(command.alpha))
}

#[instrument(
    name = "cli.statistic",
    err,
    skip(command),
    fields(graph = command.graph.as_str(), statistic = %command.statistic),
)]
pub(super) fn run_statistic(command: StatisticCommand) -> Result<ExecutionSummary, CliError> {
    let construction = GraphConstruction::from_parameter(command.graph.as_str(), command.parameter)?;
    let statistic = TestStatistic::new(
        command.statistic.to_string(),
        construction,
        command.statistic,
    );
    evaluate_file(&command.path, statistic, command.alpha)
}

fn evaluate_file(
    path: &Path,
    statistic: TestStatistic,
    alpha: Option<f64>,
) -> Result<ExecutionSummary, CliError> {
    let samples = load_samples(path)?;
    let mut replay = SampleReplay::new(derive_source_name(path), samples);
    let Some(iterations) = NonZeroUsize::new(replay.len()) else {
        return Err(CliError::SampleFile {
            path: path.to_path_buf(),
            source: SampleFileError::NoSamples,
        });
    };
    let values = simulate(&mut replay, &statistic, iterations)?;

    let scores: Vec<f64> = values.iter().copied().map(StatisticValue::as_f64).collect();
    let summary = Summary::from_values(&scores)?;
    let critical = match alpha {
        Some(alpha) if scores.len() > 1 => Some(CriticalValue {
            alpha,
            value: critical_value(&scores, alpha)?,
        }),
        _ => None,
    };

    info!(
        statistic = statistic.name(),
        samples = scores.len(),
        mean = summary.mean(),
        "command completed"
    );
    Ok(ExecutionSummary {
        statistic,
        values,
        summary,
        critical,
    })
}

#[instrument(name = "cli.load_samples", err, fields(path = %path.display(), samples = field::Empty))]
pub(super) fn load_samples(path: &Path) -> Result<Vec<Sample>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = parse_samples(BufReader::new(file)).map_err(|source| CliError::SampleFile {
        path: path.to_path_buf(),
        source,
    })?;
    Span::current().record("samples", samples.len());
    Ok(samples)
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "samples".to_owned(), ToOwned::to_owned)
}

const fn guarantee_label(guarantee: Guarantee) -> &'static str {
    match guarantee {
        Guarantee::Exact => "exact",
        Guarantee::ExactForThresholdGraph => "exact for matching threshold graphs",
        Guarantee::UpperBound => "upper bound",
        Guarantee::LowerBound => "lower bound",
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use grafstat_cli::cli::{ExecutionSummary, render_summary};
/// # use grafstat_core::{StatisticValue, Summary, TestStatistic};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     statistic: TestStatistic::knn(2),
///     values: vec![StatisticValue::Integer(4)],
///     summary: Summary::from_values(&[4.0])?,
///     critical: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("statistic: T_knn\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let statistic = &summary.statistic;
    writeln!(writer, "statistic: {}", statistic.name())?;
    writeln!(
        writer,
        "definition: {} of {}",
        statistic.statistic(),
        statistic.construction()
    )?;
    writeln!(
        writer,
        "guarantee: {}",
        guarantee_label(statistic.statistic().guarantee())
    )?;
    writeln!(writer, "samples: {}", summary.values.len())?;
    for (index, value) in summary.values.iter().enumerate() {
        writeln!(writer, "{index}\t{value}")?;
    }
    writeln!(writer, "mean: {}", summary.summary.mean())?;
    match summary.summary.std_dev() {
        Some(std_dev) => writeln!(writer, "std: {std_dev}")?,
        None => writeln!(writer, "std: n/a")?,
    }
    if let Some(critical) = summary.critical {
        writeln!(
            writer,
            "critical value (alpha={}): {}",
            critical.alpha, critical.value
        )?;
    }
    Ok(())
}
