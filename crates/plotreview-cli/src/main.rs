//! Plotreview CLI - Command-line interface
//!
//! Inspect, convert and validate plot boundaries from the shell.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;
use output::OutputWriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so that stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let error = match error.downcast::<errors::CliError>() {
                Ok(cli_error) => cli_error,
                Err(other) => errors::from_anyhow(other),
            };
            if json {
                OutputWriter::new(true).error(&error);
            } else {
                error.display();
            }
            ExitCode::FAILURE
        }
    }
}
