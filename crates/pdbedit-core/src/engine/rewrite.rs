use super::config::EditConfig;
use super::diagnostics::{Advisory, Diagnostics};
use super::error::EngineError;
use super::qmmm::QmmmSelection;
use super::water::WaterChecker;
use crate::core::io::pdb::{
    AtomFields, LineKind, MAX_DECIMAL_MOLECULE, PdbDocument, PdbError, classify, render_molecule,
    render_serial,
};
use crate::core::models::atom::AtomRecord;
use crate::core::models::element::ElementTable;
use crate::core::utils::identifiers::{is_alpha_carbon, is_beta_carbon, is_qmmm_excluded};
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use tracing::debug;

/// The tables a rewrite consults; empty maps leave the corresponding fields alone.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    /// 1-based positional atom index to new serial.
    pub atom_serials: HashMap<usize, u64>,
    /// Original molecule number to replacement.
    pub molecules: HashMap<i64, i64>,
    pub elements: ElementTable,
}

#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub document: PdbDocument,
    /// Present when QM/MM residues were configured.
    pub qmmm: Option<QmmmSelection>,
    pub advisories: Vec<Advisory>,
}

struct MoleculeCounter {
    last: Option<i64>,
    count: u64,
}

/// Single forward pass over a PDB file, resolving every `ATOM` record as it is read.
pub struct PdbRewriter<'a> {
    config: &'a EditConfig,
    tables: &'a LookupTables,
    diagnostics: Diagnostics,
    water: Option<WaterChecker>,
    qmmm: Option<QmmmSelection>,
    molecules: MoleculeCounter,
    assigned_serials: HashSet<u64>,
    atom_count: usize,
    document: PdbDocument,
}

impl<'a> PdbRewriter<'a> {
    pub fn new(config: &'a EditConfig, tables: &'a LookupTables) -> Self {
        Self {
            config,
            tables,
            diagnostics: Diagnostics::new(),
            water: config.water_range.map(WaterChecker::new),
            qmmm: config
                .has_qmmm_selection()
                .then(|| QmmmSelection::new(config.qmmm_residues.clone())),
            molecules: MoleculeCounter {
                last: None,
                count: 1,
            },
            assigned_serials: HashSet::new(),
            atom_count: 0,
            document: PdbDocument::default(),
        }
    }

    pub fn rewrite<R: BufRead>(mut self, reader: R) -> Result<RewriteOutcome, EngineError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| self.pdb_error(PdbError::from_read(e, index + 1)))?;
            self.process_line(line.trim(), index + 1)?;
        }

        if !self.tables.atom_serials.is_empty() {
            self.document
                .atoms
                .sort_by(|a, b| a.serial_text.cmp(&b.serial_text));
        }

        debug!(
            "Rewrote {} atom(s), {} header and {} tail line(s)",
            self.document.atoms.len(),
            self.document.header.len(),
            self.document.tail.len()
        );

        Ok(RewriteOutcome {
            document: self.document,
            qmmm: self.qmmm,
            advisories: self.diagnostics.into_advisories(),
        })
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), EngineError> {
        if line.is_empty() {
            return Ok(());
        }
        match classify(line, &self.config.layout) {
            LineKind::Header => self.document.header.push(line.to_string()),
            LineKind::Tail => self.document.tail.push(line.to_string()),
            LineKind::Atom => {
                let atom = self.resolve_atom(line, line_num)?;
                self.document.atoms.push(atom);
            }
        }
        Ok(())
    }

    fn resolve_atom(&mut self, line: &str, line_num: usize) -> Result<AtomRecord, EngineError> {
        self.atom_count += 1;
        let position = self.atom_count;

        let fields = AtomFields::parse(line, line_num, &self.config.layout)
            .map_err(|e| self.pdb_error(e))?;
        let label = fields.atom_type.trim();

        let serial = self
            .tables
            .atom_serials
            .get(&position)
            .copied()
            .unwrap_or(position as u64);
        if !self.assigned_serials.insert(serial) {
            self.diagnostics.push(Advisory::DuplicateSerial {
                serial,
                line: line_num,
            });
        }
        let serial_text = render_serial(serial);
        if serial_text.overflows {
            self.diagnostics.push(Advisory::SerialHexOverflow {
                serial,
                text: serial_text.text.clone(),
            });
        }

        let molecule = self
            .tables
            .molecules
            .get(&fields.molecule)
            .copied()
            .unwrap_or(fields.molecule);

        if let Some(water) = self.water.as_mut() {
            water.check(position, label, molecule, line, &mut self.diagnostics);
        }

        let mut element = fields.element.to_string();

        if let Some(qmmm) = self.qmmm.as_mut() {
            if qmmm.selects(molecule) && !is_qmmm_excluded(label) {
                if is_alpha_carbon(label) {
                    qmmm.record_alpha_carbon(molecule, serial);
                } else {
                    if is_beta_carbon(label) {
                        qmmm.record_beta_carbon(molecule, serial);
                    }
                    let symbol = self.tables.elements.get(label).ok_or_else(|| {
                        EngineError::MissingElement {
                            atom_type: label.to_string(),
                            line: line_num,
                        }
                    })?;
                    qmmm.record_atom(symbol, serial);
                    element = symbol.to_string();
                }
            }
        }

        if self.config.add_elements && self.config.element_range.contains(position) {
            match self.tables.elements.get(label) {
                Some(symbol) => element = symbol.to_string(),
                None => self.diagnostics.missing_element_type(label),
            }
        }

        let molecule_text = if self.config.renumber_molecules {
            self.sequential_molecule(molecule)
        } else {
            molecule.to_string()
        };

        Ok(AtomRecord {
            record_type: fields.record_type.to_string(),
            position,
            serial,
            serial_text: serial_text.text,
            atom_type: fields.atom_type.to_string(),
            residue_type: fields.residue_type.to_string(),
            molecule,
            molecule_text,
            coords: Point3::new(fields.x, fields.y, fields.z),
            occupancy_temperature: fields.occupancy_temperature.to_string(),
            element,
            trailing: fields.trailing.to_string(),
        })
    }

    /// Numbers molecules from 1 in order of appearance.
    fn sequential_molecule(&mut self, molecule: i64) -> String {
        match self.molecules.last {
            None => self.molecules.last = Some(molecule),
            Some(last) if last != molecule => {
                self.molecules.last = Some(molecule);
                self.molecules.count += 1;
                if self.molecules.count == MAX_DECIMAL_MOLECULE + 1 {
                    self.diagnostics.push(Advisory::MoleculeHexTransition);
                }
                let rendered = render_molecule(self.molecules.count);
                if rendered.overflows {
                    self.diagnostics.push(Advisory::MoleculeHexOverflow {
                        molecule: self.molecules.count,
                        text: rendered.text,
                    });
                }
            }
            Some(_) => {}
        }
        render_molecule(self.molecules.count).text
    }

    fn pdb_error(&self, source: PdbError) -> EngineError {
        EngineError::Pdb {
            path: self.config.pdb_path.clone(),
            source,
        }
    }
}
