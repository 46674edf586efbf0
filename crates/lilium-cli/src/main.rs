mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const LOG_ENV: &str = "LILIUM_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    let operation = cli.command.name();
    let query = cli.command.query().map(str::to_string);

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_error(&err, json_errors, operation, query);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
