use crate::core::io::lookup::{
    LookupOptions, builtin_element_table, read_element_table, read_lookup_table,
};
use crate::core::io::pdb::PdbDocument;
use crate::core::models::element::ElementTable;
use crate::engine::config::{EditConfig, ElementTableSource};
use crate::engine::diagnostics::Advisory;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::rewrite::{LookupTables, PdbRewriter};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct EditSummary {
    pub atom_count: usize,
    /// Every file written, the rewritten PDB first.
    pub written_files: Vec<PathBuf>,
    pub advisories: Vec<Advisory>,
}

#[instrument(skip_all, name = "edit_workflow")]
pub fn run(config: &EditConfig, reporter: &ProgressReporter) -> Result<EditSummary, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading lookup tables",
    });
    let tables = load_tables(config)?;
    reporter.report(Progress::PhaseFinish);

    info!("Reading PDB file {:?}", config.pdb_path);
    let input = File::open(&config.pdb_path).map_err(|e| EngineError::io(&config.pdb_path, e))?;

    reporter.report(Progress::PhaseStart {
        name: "Rewriting PDB records",
    });
    let outcome = PdbRewriter::new(config, &tables).rewrite(BufReader::new(input))?;
    reporter.report(Progress::PhaseFinish);
    if !outcome.advisories.is_empty() {
        reporter.report(Progress::Message(format!(
            "{} advisory notice(s) raised while rewriting",
            outcome.advisories.len()
        )));
    }

    let mut written_files = Vec::new();

    let output_path = config.output_path();
    write_document(config, &outcome.document, &output_path)?;
    reporter.report(Progress::FileWritten(output_path.clone()));
    written_files.push(output_path);

    if let Some(qmmm) = &outcome.qmmm {
        let descriptor_path = config.qm_descriptor_path();
        qmmm.write_descriptor(&descriptor_path)
            .map_err(|e| EngineError::io(&descriptor_path, e))?;
        reporter.report(Progress::FileWritten(descriptor_path.clone()));
        written_files.push(descriptor_path);

        let positions_path = config.qm_positions_path();
        qmmm.write_positions(&positions_path)
            .map_err(|e| EngineError::io(&positions_path, e))?;
        reporter.report(Progress::FileWritten(positions_path.clone()));
        written_files.push(positions_path);
    }

    info!(
        "Rewrote {} atom(s) with {} advisory notice(s)",
        outcome.document.atoms.len(),
        outcome.advisories.len()
    );

    Ok(EditSummary {
        atom_count: outcome.document.atoms.len(),
        written_files,
        advisories: outcome.advisories,
    })
}

/// Reads the renumbering maps and the element table named by `config`.
pub fn load_tables(config: &EditConfig) -> Result<LookupTables, EngineError> {
    let atom_serials = match &config.atom_reorder_path {
        Some(path) => read_lookup_table(path, LookupOptions::one_to_one())?,
        None => HashMap::new(),
    };
    let molecules = match &config.molecule_renumber_path {
        Some(path) => read_lookup_table(path, LookupOptions::default())?,
        None => HashMap::new(),
    };
    let elements = match &config.element_table {
        Some(ElementTableSource::File(path)) => read_element_table(path)?,
        Some(ElementTableSource::Builtin) => builtin_element_table()?,
        None => ElementTable::default(),
    };
    if config.add_elements && elements.is_empty() {
        warn!("Element table is empty; element columns will be left unchanged");
    }
    Ok(LookupTables {
        atom_serials,
        molecules,
        elements,
    })
}

fn write_document(
    config: &EditConfig,
    document: &PdbDocument,
    path: &Path,
) -> Result<(), EngineError> {
    let file = File::create(path).map_err(|e| EngineError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    document
        .write_to(&config.template, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| EngineError::io(path, e))
}
