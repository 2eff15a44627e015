use crate::core::io::files::{WriteMode, write_lines};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::Path;

const LINK_TYPE: &str = "IMOMM";
const ALPHA_IMOMM: f64 = 1.5;

/// Atoms collected from the residues placed in the QM region.
///
/// Element lists and residue maps are ordered so that the descriptor is
/// written with elements sorted by symbol and links by ascending residue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QmmmSelection {
    residues: BTreeSet<i64>,
    elements: BTreeMap<String, Vec<u64>>,
    alpha_carbons: BTreeMap<i64, u64>,
    beta_carbons: BTreeMap<i64, u64>,
    positions: Vec<u64>,
}

impl QmmmSelection {
    pub fn new(residues: BTreeSet<i64>) -> Self {
        Self {
            residues,
            ..Self::default()
        }
    }

    pub fn selects(&self, molecule: i64) -> bool {
        self.residues.contains(&molecule)
    }

    pub fn record_alpha_carbon(&mut self, residue: i64, serial: u64) {
        self.alpha_carbons.insert(residue, serial);
    }

    pub fn record_beta_carbon(&mut self, residue: i64, serial: u64) {
        self.beta_carbons.insert(residue, serial);
    }

    /// Adds a QM atom under its element; its 0-based position goes to the
    /// visualization list.
    pub fn record_atom(&mut self, element: &str, serial: u64) {
        self.elements
            .entry(element.to_string())
            .or_default()
            .push(serial);
        self.positions.push(serial.saturating_sub(1));
    }

    pub fn elements(&self) -> &BTreeMap<String, Vec<u64>> {
        &self.elements
    }

    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    /// Residues with both a CA and a CB hit, as `(residue, ca_serial, cb_serial)`.
    pub fn links(&self) -> impl Iterator<Item = (i64, u64, u64)> + '_ {
        self.beta_carbons.iter().filter_map(|(&residue, &cb)| {
            self.alpha_carbons
                .get(&residue)
                .map(|&ca| (residue, ca, cb))
        })
    }

    /// The CP2K-style `&QM_KIND` blocks followed by the `&LINK` blocks.
    pub fn descriptor_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (element, serials) in &self.elements {
            lines.push(format!("    &QM_KIND {}", element));
            lines.push(format!("        MM_INDEX {}", join_numbers(serials)));
            lines.push("    &END QM_KIND".to_string());
        }
        for (residue, ca, cb) in self.links() {
            lines.push(format!(
                "    !! Break resid {} between CA and CB, and cap CB with hydrogen",
                residue
            ));
            lines.push("    &LINK".to_string());
            lines.push(format!("       MM_INDEX  {}  !! CA", ca));
            lines.push(format!("       QM_INDEX  {}  !! CB", cb));
            lines.push(format!("       LINK_TYPE  {}", LINK_TYPE));
            lines.push(format!("       ALPHA_IMOMM  {}", ALPHA_IMOMM));
            lines.push("    &END LINK".to_string());
        }
        lines
    }

    pub fn positions_line(&self) -> String {
        join_numbers(&self.positions)
    }

    pub fn write_descriptor(&self, path: &Path) -> io::Result<()> {
        write_lines(path, self.descriptor_lines(), WriteMode::Create)
    }

    pub fn write_positions(&self, path: &Path) -> io::Result<()> {
        write_lines(path, [self.positions_line()], WriteMode::Create)
    }
}

fn join_numbers(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
