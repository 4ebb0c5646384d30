// Command-line interface definition

use clap::Parser;

use crate::parser::DEFAULT_ELAPSED_INDEX;

#[derive(Parser, Debug)]
#[command(name = "ssca1-times")]
#[command(about = "Collect thread count and elapsed time from SSCA#1 benchmark logs")]
#[command(
    long_about = "Collect thread count and elapsed time from SSCA#1 benchmark logs\n\nReads an index file listing one log path per line, parses each log for its\nOpenMP thread count and Kernel 1 wall-clock time, and writes\n'<threads>\\t<seconds>' lines to ssca1_times.dat in the current directory.\n\nCompressed logs (gzip, zstd) are read transparently.\n\nEXAMPLE:\n  ls runs/*.log > index.txt && ssca1-times index.txt"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Index file listing one benchmark log path per line
    pub index: String,

    /// Which '\tElapsed time:' line to read, counting from 0 (0 = data generation, 1 = Kernel 1, 2 = Kernel 2)
    #[arg(
        long = "elapsed-index",
        default_value_t = DEFAULT_ELAPSED_INDEX,
        help_heading = "Input Options"
    )]
    pub elapsed_index: usize,

    /// Parse log files on a worker pool (output order is unchanged)
    #[arg(long = "parallel", help_heading = "Performance Options")]
    pub parallel: bool,

    /// Number of worker threads for --parallel (0 = one per CPU)
    #[arg(
        long = "threads",
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Print run statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Display Options")]
    pub stats: bool,

    /// Show progress diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Display Options")]
    pub verbose: u8,
}
