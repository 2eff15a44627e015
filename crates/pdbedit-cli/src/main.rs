mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::{GOOD_RET, INPUT_ERROR, Result};
use clap::{CommandFactory, Parser};
use std::process;
use tracing::{debug, error, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { INPUT_ERROR } else { GOOD_RET };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run_app(&cli) {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        if e.shows_help() {
            eprintln!();
            let _ = Cli::command().print_help();
        }
        process::exit(e.exit_code());
    }
}

fn run_app(cli: &Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("pdb_edit v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", cli);

    commands::edit::run(cli)?;

    info!("Command completed successfully.");
    Ok(())
}
