use std::{ffi::OsString, process::ExitCode};

use clap::{error::ErrorKind, Parser, Subcommand};
use tracing::{debug, error};

use mmm::{
    logging::init_logging, report::ConsoleReporter, run_and_report, timer::MonotonicClock, Config,
};

const USAGE: &str = "Usage: mmm S <size>\nUsage: mmm P <num threads> <size>";

/// Times sequential vs column-parallel matrix multiplication.
#[derive(Parser, Debug)]
#[command(name = "mmm", version)]
struct Cli {
    #[command(subcommand)]
    mode: ModeArgs,

    /// Seed for the random input matrices
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ModeArgs {
    /// Run the sequential engine only
    #[command(name = "S")]
    Sequential { size: usize },
    /// Run both engines and verify the parallel result
    #[command(name = "P")]
    Parallel { num_threads: usize, size: usize },
}

impl Cli {
    fn into_config(self) -> Config {
        let config = match self.mode {
            ModeArgs::Sequential { size } => Config::sequential(size),
            ModeArgs::Parallel { num_threads, size } => Config::parallel(num_threads, size),
        };
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    ExitCode::from(run(std::env::args_os()))
}

/// Parses `args`, runs the benchmark and returns the process exit status.
fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return 0;
        }
        Err(err) => {
            let _ = err.print();
            eprintln!("{USAGE}");
            return 1;
        }
    };

    let config = cli.into_config();
    debug!(?config, "parsed arguments");

    match run_and_report(config, &MonotonicClock, &mut ConsoleReporter::stdout()) {
        Ok(_) => 0,
        Err(err) => {
            error!(%err, "benchmark failed");
            eprintln!("Error: {err}");
            1
        }
    }
}
