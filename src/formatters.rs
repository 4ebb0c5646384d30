use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::parser::LogRecord;

/// Fixed name of the plotting data file, written to the working directory
pub const OUTPUT_FILE_NAME: &str = "ssca1_times.dat";

/// `<thread_count>\t<elapsed_seconds>`
pub fn format_record(record: &LogRecord) -> String {
    format!("{}\t{}", record.thread_count, record.elapsed_seconds)
}

/// One line per record, joined with `\n`, no trailing newline
pub fn format_records(records: &[LogRecord]) -> String {
    records
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overwrite `path` with the formatted records
pub fn write_output<P: AsRef<Path>>(path: P, records: &[LogRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)
        .with_context(|| format!("Failed to open output file '{}'", path.display()))?;
    file.write_all(format_records(records).as_bytes())
        .and_then(|_| file.flush())
        .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
    Ok(())
}
