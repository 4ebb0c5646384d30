//! SSCA#1 log parsing.
//!
//! A benchmark log is unstructured text. Only two line shapes are load-bearing:
//!
//! ```text
//! Running with OpenMP, thread count: 8
//! 	Elapsed time: 0 hour(s), 1 minute(s), 12 second(s), 604 milliseconds,  17 micro second(s).
//! ```
//!
//! SSCA#1 prints one elapsed-time line per phase: data generation first, then
//! Kernel 1, then Kernel 2. The Kernel 1 line (index 1) is the one consumed by
//! default.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

use crate::decompression::DecompressionReader;

const ELAPSED_PATTERN: &str = r"^\tElapsed time:";
const THREAD_PATTERN: &str = r"^Running with OpenMP, thread count: ([0-9]+)";
const DIGITS_PATTERN: &str = r"[0-9]+";

static ELAPSED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(ELAPSED_PATTERN).expect("failed to compile elapsed-time regex"));
static THREAD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THREAD_PATTERN).expect("failed to compile thread-count regex"));
static DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DIGITS_PATTERN).expect("failed to compile digit-run regex"));

/// Elapsed-time line consumed when nothing else is configured (Kernel 1).
pub const DEFAULT_ELAPSED_INDEX: usize = 1;

/// Milliseconds above this round the elapsed time up to the next second.
const ROUND_UP_MILLIS: u64 = 500;

/// One benchmark run: worker count and wall-clock seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
    pub thread_count: u32,
    pub elapsed_seconds: u64,
}

impl LogRecord {
    pub fn new(thread_count: u32, elapsed_seconds: u64) -> Self {
        Self {
            thread_count,
            elapsed_seconds,
        }
    }
}

/// A parsed log file together with its (decompressed) size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLog {
    pub record: LogRecord,
    pub bytes_read: u64,
}

/// Reasons a log's text cannot produce a [`LogRecord`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least {wanted} elapsed-time line(s), found {found}")]
    MissingElapsedLine { wanted: usize, found: usize },

    #[error("elapsed-time line has {found} numeric field(s), need hours, minutes, seconds and milliseconds")]
    TooFewTimeFields { found: usize },

    #[error("no 'Running with OpenMP, thread count:' line")]
    MissingThreadCount,

    #[error("thread count must be at least 1")]
    ZeroThreadCount,

    #[error("number '{value}' out of range: {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("elapsed time overflows seconds counter")]
    ElapsedOverflow,
}

/// Extracts [`LogRecord`]s from SSCA#1 log text
#[derive(Debug, Clone)]
pub struct LogParser {
    elapsed_index: usize,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new(DEFAULT_ELAPSED_INDEX)
    }
}

impl LogParser {
    /// `elapsed_index` selects which `\tElapsed time:` line is read, counting from 0
    pub fn new(elapsed_index: usize) -> Self {
        Self { elapsed_index }
    }

    pub fn elapsed_index(&self) -> usize {
        self.elapsed_index
    }

    /// Parse an in-memory log
    pub fn parse_str(&self, text: &str) -> Result<LogRecord, ParseError> {
        let elapsed_seconds = self.parse_elapsed(text)?;
        let thread_count = parse_thread_count(text)?;
        Ok(LogRecord::new(thread_count, elapsed_seconds))
    }

    /// Read and parse a log file; gzip and zstd files are decompressed on the fly
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<LogRecord> {
        self.read_and_parse(path).map(|parsed| parsed.record)
    }

    /// Like [`LogParser::parse_file`], also reporting how many bytes were read
    ///
    /// Bytes that are not valid UTF-8 are replaced, so a stray byte on a line
    /// that matches neither pattern does not fail the log.
    pub fn read_and_parse<P: AsRef<Path>>(&self, path: P) -> Result<ParsedLog> {
        let path = path.as_ref();
        let mut reader = DecompressionReader::new(path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read log file '{}'", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);

        let record = self
            .parse_str(&text)
            .with_context(|| format!("Malformed log file '{}'", path.display()))?;
        log::debug!(
            "{}: {} thread(s), {}s (elapsed line {}, {} {} bytes)",
            path.display(),
            record.thread_count,
            record.elapsed_seconds,
            self.elapsed_index(),
            bytes.len(),
            reader.kind()
        );
        Ok(ParsedLog {
            record,
            bytes_read: bytes.len() as u64,
        })
    }

    fn parse_elapsed(&self, text: &str) -> Result<u64, ParseError> {
        let mut found = 0;
        let mut selected = None;
        for line in text.lines().filter(|line| ELAPSED_REGEX.is_match(line)) {
            if found == self.elapsed_index {
                selected = Some(line);
            }
            found += 1;
        }

        let line = selected.ok_or(ParseError::MissingElapsedLine {
            wanted: self.elapsed_index + 1,
            found,
        })?;
        elapsed_seconds_from_line(line)
    }
}

/// Parse a log file with the default elapsed-time selection
pub fn parse_log<P: AsRef<Path>>(path: P) -> Result<LogRecord> {
    LogParser::default().parse_file(path)
}

/// Parse in-memory log text with the default elapsed-time selection
pub fn parse_log_str(text: &str) -> Result<LogRecord, ParseError> {
    LogParser::default().parse_str(text)
}

/// Convert an elapsed-time line into whole seconds
///
/// The first four digit runs are hours, minutes, seconds and milliseconds.
/// Anything after that (microseconds) is ignored.
pub fn elapsed_seconds_from_line(line: &str) -> Result<u64, ParseError> {
    let fields = DIGITS_REGEX
        .find_iter(line)
        .take(4)
        .map(|m| parse_number::<u64>(m.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let &[hours, minutes, seconds, millis] = fields.as_slice() else {
        return Err(ParseError::TooFewTimeFields {
            found: fields.len(),
        });
    };

    let mut elapsed = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or(ParseError::ElapsedOverflow)?;
    if millis > ROUND_UP_MILLIS {
        elapsed = elapsed.checked_add(1).ok_or(ParseError::ElapsedOverflow)?;
    }
    Ok(elapsed)
}

fn parse_thread_count(text: &str) -> Result<u32, ParseError> {
    let digits = text
        .lines()
        .find_map(|line| THREAD_REGEX.captures(line))
        .and_then(|caps| caps.get(1))
        .ok_or(ParseError::MissingThreadCount)?;

    match parse_number::<u32>(digits.as_str())? {
        0 => Err(ParseError::ZeroThreadCount),
        n => Ok(n),
    }
}

fn parse_number<T>(value: &str) -> Result<T, ParseError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|source| ParseError::InvalidNumber {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn elapsed_line(h: u64, m: u64, s: u64, ms: u64) -> String {
        format!(
            "\tElapsed time: {} hour(s), {} minute(s), {} second(s), {} milliseconds,  7 micro second(s).",
            h, m, s, ms
        )
    }

    fn sample_log(threads: u32, first: (u64, u64, u64, u64), second: (u64, u64, u64, u64)) -> String {
        format!(
            "HPCS SSCA #1 Bioinformatics Sequence Alignment Executable Specification:\n\
             Running with OpenMP, thread count: {}\n\
             Running...\n\
             \n\
             {}\n\
             \n\
             Begining Kernel 1 execution.\n\
             \n\
             {}\n",
            threads,
            elapsed_line(first.0, first.1, first.2, first.3),
            elapsed_line(second.0, second.1, second.2, second.3),
        )
    }

    #[test]
    fn second_elapsed_line_is_used_and_rounded_up() {
        let log = sample_log(4, (0, 1, 2, 3), (1, 2, 3, 600));
        assert_eq!(parse_log_str(&log), Ok(LogRecord::new(4, 3724)));
    }

    #[test]
    fn milliseconds_at_or_below_half_do_not_round() {
        assert_eq!(elapsed_seconds_from_line(&elapsed_line(0, 0, 5, 400)), Ok(5));
        assert_eq!(elapsed_seconds_from_line(&elapsed_line(0, 0, 5, 500)), Ok(5));
        assert_eq!(elapsed_seconds_from_line(&elapsed_line(0, 0, 5, 501)), Ok(6));
    }

    #[test]
    fn single_elapsed_line_fails_with_default_selection() {
        let log = format!(
            "Running with OpenMP, thread count: 2\n{}\n",
            elapsed_line(0, 0, 9, 0)
        );
        assert_eq!(
            parse_log_str(&log),
            Err(ParseError::MissingElapsedLine {
                wanted: 2,
                found: 1
            })
        );
    }

    #[test]
    fn missing_elapsed_line_is_an_error_not_zero() {
        let log = "Running with OpenMP, thread count: 2\nno timings here\n";
        assert_eq!(
            parse_log_str(log),
            Err(ParseError::MissingElapsedLine {
                wanted: 2,
                found: 0
            })
        );
    }

    #[test]
    fn elapsed_line_must_start_with_tab() {
        let log = format!(
            "Running with OpenMP, thread count: 2\n{}\n  Elapsed time: 1, 2, 3, 4\nElapsed time: 1, 2, 3, 4\n",
            elapsed_line(0, 0, 1, 0)
        );
        assert!(matches!(
            parse_log_str(&log),
            Err(ParseError::MissingElapsedLine { found: 1, .. })
        ));
    }

    #[test]
    fn custom_elapsed_index_selects_other_phase() {
        let log = format!(
            "Running with OpenMP, thread count: 16\n{}\n{}\n{}\n",
            elapsed_line(0, 0, 1, 0),
            elapsed_line(0, 0, 2, 0),
            elapsed_line(0, 0, 3, 999),
        );
        assert_eq!(LogParser::new(0).parse_str(&log), Ok(LogRecord::new(16, 1)));
        assert_eq!(LogParser::new(2).parse_str(&log), Ok(LogRecord::new(16, 4)));
        assert!(LogParser::new(3).parse_str(&log).is_err());
    }

    #[test]
    fn too_few_digit_groups() {
        let log = "Running with OpenMP, thread count: 1\n\tElapsed time: 0\n\tElapsed time: 1 hour(s), 2 minute(s), 3 second(s)\n";
        assert_eq!(
            parse_log_str(log),
            Err(ParseError::TooFewTimeFields { found: 3 })
        );
    }

    #[test]
    fn missing_thread_count_line() {
        let log = format!(
            "Running with OpenMP\n{}\n{}\n",
            elapsed_line(0, 0, 1, 0),
            elapsed_line(0, 0, 2, 0)
        );
        assert_eq!(parse_log_str(&log), Err(ParseError::MissingThreadCount));
    }

    #[test]
    fn first_thread_count_line_wins() {
        let log = format!(
            "Running with OpenMP, thread count: 12\nRunning with OpenMP, thread count: 3\n{}\n{}\n",
            elapsed_line(0, 0, 1, 0),
            elapsed_line(0, 0, 2, 0)
        );
        assert_eq!(parse_log_str(&log), Ok(LogRecord::new(12, 2)));
    }

    #[test]
    fn thread_count_zero_is_rejected() {
        let log = sample_log(0, (0, 0, 1, 0), (0, 0, 2, 0));
        assert_eq!(parse_log_str(&log), Err(ParseError::ZeroThreadCount));
    }

    #[test]
    fn oversized_numbers_are_reported() {
        let log = "Running with OpenMP, thread count: 99999999999\n\tElapsed time: 0, 0, 0, 0\n\tElapsed time: 0, 0, 0, 0\n";
        assert!(matches!(
            parse_log_str(log),
            Err(ParseError::InvalidNumber { ref value, .. }) if value == "99999999999"
        ));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let log = sample_log(8, (0, 0, 1, 0), (0, 2, 0, 0)).replace('\n', "\r\n");
        assert_eq!(parse_log_str(&log), Ok(LogRecord::new(8, 120)));
    }

    #[test]
    fn parse_file_reads_from_disk() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", sample_log(4, (0, 0, 0, 0), (0, 0, 42, 501)))?;
        file.flush()?;

        assert_eq!(parse_log(file.path())?, LogRecord::new(4, 43));
        Ok(())
    }

    #[test]
    fn parse_file_error_names_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "nothing useful").unwrap();
        file.flush().unwrap();

        let err = parse_log(file.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains(&file.path().display().to_string()));
        assert!(err.downcast_ref::<ParseError>().is_some());
    }

    #[test]
    fn invalid_utf8_outside_matched_lines_is_tolerated() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"host: caf\xe9\n")?;
        write!(file, "{}", sample_log(4, (0, 0, 0, 0), (0, 0, 7, 0)))?;
        file.flush()?;

        assert_eq!(parse_log(file.path())?, LogRecord::new(4, 7));
        Ok(())
    }

    #[test]
    fn read_and_parse_counts_bytes() -> Result<()> {
        let log = sample_log(2, (0, 0, 0, 0), (0, 0, 3, 0));
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", log)?;
        file.flush()?;

        let parsed = LogParser::default().read_and_parse(file.path())?;
        assert_eq!(parsed.record, LogRecord::new(2, 3));
        assert_eq!(parsed.bytes_read, log.len() as u64);
        Ok(())
    }

    proptest! {
        #[test]
        fn elapsed_matches_arithmetic(h in 0u64..1000, m in 0u64..60, s in 0u64..60, ms in 0u64..1000) {
            let expected = h * 3600 + m * 60 + s + u64::from(ms > 500);
            prop_assert_eq!(elapsed_seconds_from_line(&elapsed_line(h, m, s, ms)), Ok(expected));
        }
    }
}
