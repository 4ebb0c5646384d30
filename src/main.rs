use clap::Parser;

use ssca1_times::platform::{format_error_message, init_logging, ExitCode};
use ssca1_times::{run_pipeline, Cli, ShredConfig};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() {
                ExitCode::InvalidUsage
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            code.exit();
        }
    };

    init_logging(cli.verbose);

    let config = ShredConfig::from_cli(&cli);
    match run_pipeline(&config) {
        Ok(result) => {
            if config.output.stats {
                eprintln!("{}", result.stats.format_stats());
            }
            ExitCode::Success.exit();
        }
        Err(e) => {
            eprintln!("{}", format_error_message(&e));
            ExitCode::GeneralError.exit();
        }
    }
}
