use crate::cli::Cli;
use crate::config::FileConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdbedit::engine::progress::ProgressReporter;
use pdbedit::workflows::{self, edit::EditSummary};
use tracing::info;

pub fn run(cli: &Cli) -> Result<EditSummary> {
    let file_config = FileConfig::from_file(&cli.config)?;
    info!("Building edit configuration from {:?}", &cli.config);
    let config = file_config.into_edit_config()?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the PDB edit workflow...");
    let summary = workflows::edit::run(&config, &reporter)?;

    info!(
        "Workflow finished: {} atom(s), {} file(s) written, {} advisory notice(s).",
        summary.atom_count,
        summary.written_files.len(),
        summary.advisories.len()
    );
    Ok(summary)
}
