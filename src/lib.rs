//! Core library for ssca1-times.
//!
//! Reads an index of SSCA#1 benchmark logs, pulls the OpenMP thread count and
//! the Kernel 1 wall-clock time out of each one, and writes them as
//! `<threads>\t<seconds>` lines to `ssca1_times.dat`. Logs are parsed
//! sequentially by default or on an order-preserving worker pool.

pub mod cli;
pub mod config;
pub mod decompression;
pub mod formatters;
pub mod parallel;
pub mod parser;
pub mod platform;
pub mod readers;
pub mod stats;

pub use cli::Cli;
pub use config::ShredConfig;
pub use formatters::{format_records, write_output, OUTPUT_FILE_NAME};
pub use parser::{parse_log, parse_log_str, LogParser, LogRecord, ParseError, ParsedLog};
pub use readers::read_index;

use anyhow::Result;

use parallel::{ParallelConfig, ParallelProcessor};
use stats::RunStats;

/// Result of a completed run
#[derive(Debug)]
pub struct PipelineResult {
    pub records: Vec<LogRecord>,
    pub stats: RunStats,
}

/// Read the index, parse every listed log, then write the data file.
///
/// Nothing is written unless every log parsed; the first failure (in index
/// order) aborts the run.
pub fn run_pipeline(config: &ShredConfig) -> Result<PipelineResult> {
    let mut stats = RunStats::new();

    let paths = read_index(&config.input.index)?;
    stats.files_listed = paths.len();
    log::info!(
        "Index '{}' lists {} log file(s)",
        config.input.index.display(),
        paths.len()
    );

    let parser = config.log_parser();
    let logs = if config.should_use_parallel() {
        let processor = ParallelProcessor::new(ParallelConfig {
            num_workers: config.effective_threads(),
        });
        let run = processor.process(&paths, &parser)?;
        stats.workers = run.workers;
        run.logs
    } else {
        run_sequential(&paths, &parser)?
    };
    stats.files_parsed = logs.len();
    stats.bytes_read = logs.iter().map(|parsed| parsed.bytes_read).sum();
    let records: Vec<LogRecord> = logs.iter().map(|parsed| parsed.record).collect();

    write_output(&config.output.path, &records)?;
    stats.records_written = records.len();
    stats.finish();

    log::info!(
        "Wrote {} record(s) to '{}'",
        records.len(),
        config.output.path.display()
    );

    Ok(PipelineResult { records, stats })
}

fn run_sequential(paths: &[String], parser: &LogParser) -> Result<Vec<ParsedLog>> {
    paths.iter().map(|path| parser.read_and_parse(path)).collect()
}
