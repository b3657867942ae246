//! Schemalift CLI - idempotent add-column migrations for DuckDB

use clap::Parser;
use env_logger::Env;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{apply, check, describe};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        Some(Commands::Apply(args)) => apply::execute(args, &cli.global),
        Some(Commands::Check(args)) => check::execute(args, &cli.global),
        Some(Commands::Describe(args)) => describe::execute(args, &cli.global),
        None => apply::execute(&Default::default(), &cli.global),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => std::process::ExitCode::from(*code),
            None => {
                eprintln!("Error: {err:#}");
                std::process::ExitCode::FAILURE
            }
        },
    }
}

/// `RUST_LOG` wins; otherwise `-v` turns on debug output for our crates.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,sl_core=debug,sl_db=debug,sl_migrate=debug,sl=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
