//! Command implementations

mod bbox;
mod config;
mod extract;
mod geoshape;
mod overlaps;
mod parse;
mod serialize;
mod validate;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;
    let rules = config.rules();

    match cli.command {
        Commands::Parse(args) => parse::execute(args, &output),
        Commands::Serialize(args) => serialize::execute(args, &output),
        Commands::Bbox(args) => bbox::execute(args, &output),
        Commands::Validate(args) => validate::execute(args, &rules, &output),
        Commands::Geoshape(args) => geoshape::execute(args, &output),
        Commands::Extract(args) => extract::execute(args, &rules, &output),
        Commands::Overlaps(args) => overlaps::execute(args, &rules, &output),
        Commands::Config => config::execute(&config, &output),
    }
}
