use std::path::Path;

use buildgen::{cli::CliArgs, utils::logger::config_logger, worker::run_buildgen};
use clap::Parser;
use color_eyre::Result;
use env_logger::Target;

/// The entry point for the binary generated
/// for the program
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse();
    config_logger(cli_args.verbose, Target::Stdout)?;

    log::info!("Launching a new buildgen program");
    run_buildgen(&cli_args, Path::new("."))?;
    log::info!("Tasks successfully finished");

    Ok(())
}
