//! Sample-file parsing and replay.
//!
//! A sample file holds one sample per line. Numbers are separated by commas or
//! whitespace; a line containing `;` is read as a list of vector points
//! separated by `;`. Text after `#` is ignored, as are blank lines.
//!
//! ```text
//! # three scalar samples
//! 0.0, 2.0, 4.0
//! 1 1.5 9
//! 0,0; 3,4; 6,8   # one sample of 2-D points
//! ```

use std::{io::BufRead, sync::Arc};

use grafstat_core::{Sample, SampleError, SampleSource, SampleSourceError};
use thiserror::Error;

/// Errors raised while reading a sample file.
#[derive(Debug, Error)]
pub enum SampleFileError {
    /// The underlying reader failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A token was not a number.
    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// The numbers on a line did not form a valid sample.
    #[error("line {line}: {source}")]
    InvalidSample {
        /// One-based line number.
        line: usize,
        /// Validation failure.
        #[source]
        source: SampleError,
    },
    /// The file held no samples.
    #[error("no samples found")]
    NoSamples,
}

/// Parses every sample in `reader`.
///
/// # Errors
/// Returns [`SampleFileError`] when a line cannot be read or parsed, or when
/// the input holds no samples at all.
///
/// # Examples
/// ```
/// use grafstat_cli::cli::parse_samples;
///
/// let samples = parse_samples("# header\n0, 1, 2\n\n0,0; 3,4\n".as_bytes())?;
/// assert_eq!(samples.len(), 2);
/// assert_eq!(samples[0].scalars(), Some(&[0.0, 1.0, 2.0][..]));
/// assert_eq!(samples[1].dimension(), 2);
/// # Ok::<(), grafstat_cli::cli::SampleFileError>(())
/// ```
pub fn parse_samples(reader: impl BufRead) -> Result<Vec<Sample>, SampleFileError> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| SampleFileError::Read {
            line: number,
            source,
        })?;
        let content = strip_comment(&line).trim();
        if content.is_empty() {
            continue;
        }
        samples.push(parse_line(content, number)?);
    }
    if samples.is_empty() {
        return Err(SampleFileError::NoSamples);
    }
    Ok(samples)
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}

fn parse_line(content: &str, line: usize) -> Result<Sample, SampleFileError> {
    let sample = if content.contains(';') {
        let rows = content
            .split(';')
            .map(|point| parse_numbers(point, line))
            .collect::<Result<Vec<_>, _>>()?;
        Sample::from_rows(&rows)
    } else {
        Sample::from_scalars(parse_numbers(content, line)?)
    };
    sample.map_err(|source| SampleFileError::InvalidSample { line, source })
}

fn parse_numbers(text: &str, line: usize) -> Result<Vec<f64>, SampleFileError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| SampleFileError::InvalidNumber {
                    line,
                    token: token.to_owned(),
                })
        })
        .collect()
}

/// Replays parsed samples, in file order, as a [`SampleSource`].
#[derive(Clone, Debug)]
pub struct SampleReplay {
    name: Arc<str>,
    samples: Vec<Sample>,
    cursor: usize,
}

impl SampleReplay {
    /// Wraps `samples` under `name`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
            cursor: 0,
        }
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleSource for SampleReplay {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_sample(&mut self) -> Result<Sample, SampleSourceError> {
        let sample = self.samples.get(self.cursor).cloned().ok_or_else(|| {
            SampleSourceError::new(
                Arc::clone(&self.name),
                format!("exhausted after {} samples", self.samples.len()),
            )
        })?;
        self.cursor += 1;
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::commas("1,2,3", &[1.0, 2.0, 3.0])]
    #[case::spaces("1 2\t3", &[1.0, 2.0, 3.0])]
    #[case::mixed(" 1, 2  ,3 ", &[1.0, 2.0, 3.0])]
    #[case::trailing_comment("4 5 # six", &[4.0, 5.0])]
    #[case::exponent("1e-3, -2.5", &[0.001, -2.5])]
    fn parses_scalar_lines(#[case] input: &str, #[case] expected: &[f64]) {
        let samples = parse_samples(input.as_bytes()).expect("valid input");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].scalars(), Some(expected));
    }

    #[test]
    fn parses_vector_lines() {
        let samples = parse_samples("0,0; 3 4 ;6,8".as_bytes()).expect("valid input");
        assert_eq!(samples[0].dimension(), 2);
        assert_eq!(samples[0].point(2), Some(&[6.0, 8.0][..]));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let input = "# header\n\n   \n1 2\n# middle\n3 4\n";
        let samples = parse_samples(input.as_bytes()).expect("valid input");
        assert_eq!(samples.len(), 2);
    }

    #[rstest]
    #[case::empty("")]
    #[case::only_comments("# nothing\n\n")]
    fn rejects_inputs_without_samples(#[case] input: &str) {
        let err = parse_samples(input.as_bytes()).expect_err("no samples");
        assert!(matches!(err, SampleFileError::NoSamples));
    }

    #[test]
    fn reports_line_of_bad_token() {
        let err = parse_samples("1 2\n\n3 x 4\n".as_bytes()).expect_err("bad token");
        match err {
            SampleFileError::InvalidNumber { line, token } => {
                assert_eq!(line, 3);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::non_finite("1 nan", SampleError::NonFinite { index: 1, value: f64::NAN })]
    #[case::ragged("0,0; 1", SampleError::RaggedRow { row: 1, expected: 2, actual: 1 })]
    fn rejects_invalid_samples(#[case] input: &str, #[case] expected: SampleError) {
        let err = parse_samples(input.as_bytes()).expect_err("invalid sample");
        let SampleFileError::InvalidSample { line, source } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(line, 1);
        assert_eq!(
            std::mem::discriminant(&source),
            std::mem::discriminant(&expected)
        );
    }

    #[test]
    fn replay_yields_samples_in_order_then_fails() {
        let samples = parse_samples("1 2\n3 4\n".as_bytes()).expect("valid input");
        let mut replay = SampleReplay::new("file", samples);
        assert_eq!(replay.len(), 2);
        let first = replay.next_sample().expect("first");
        let second = replay.next_sample().expect("second");
        assert_eq!(first.scalars(), Some(&[1.0, 2.0][..]));
        assert_eq!(second.scalars(), Some(&[3.0, 4.0][..]));
        let err = replay.next_sample().expect_err("exhausted");
        assert_eq!(err.source_name(), "file");
    }
}
