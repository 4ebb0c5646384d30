use std::path::PathBuf;

use crate::cli::Cli;
use crate::formatters::OUTPUT_FILE_NAME;
use crate::parser::{LogParser, DEFAULT_ELAPSED_INDEX};

/// Main configuration struct for a run
#[derive(Debug, Clone)]
pub struct ShredConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub performance: PerformanceConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub index: PathBuf,
    pub elapsed_index: usize,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub stats: bool,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub parallel: bool,
    pub threads: usize,
}

impl ShredConfig {
    /// Defaults for `index`: sequential, Kernel 1 timing, `ssca1_times.dat` in the working directory
    pub fn new<P: Into<PathBuf>>(index: P) -> Self {
        Self {
            input: InputConfig {
                index: index.into(),
                elapsed_index: DEFAULT_ELAPSED_INDEX,
            },
            output: OutputConfig {
                path: PathBuf::from(OUTPUT_FILE_NAME),
                stats: false,
            },
            performance: PerformanceConfig {
                parallel: false,
                threads: 0,
            },
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::new(&cli.index);
        config.input.elapsed_index = cli.elapsed_index;
        config.output.stats = cli.stats;
        config.performance = PerformanceConfig {
            parallel: cli.parallel,
            threads: cli.threads,
        };
        config
    }

    /// Check if parallel processing should be used
    pub fn should_use_parallel(&self) -> bool {
        self.performance.parallel || self.performance.threads > 0
    }

    pub fn effective_threads(&self) -> usize {
        if self.performance.threads == 0 {
            num_cpus::get()
        } else {
            self.performance.threads
        }
    }

    pub fn log_parser(&self) -> LogParser {
        LogParser::new(self.input.elapsed_index)
    }
}
