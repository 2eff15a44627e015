use super::config::AtomRange;
use super::diagnostics::{Advisory, Diagnostics};
use crate::core::utils::identifiers::WATER_LABELS;

/// Tracks position within OH2/H1/H2 triplets over a range of atoms.
#[derive(Debug, Clone)]
pub struct WaterChecker {
    range: AtomRange,
    group_position: usize,
    group_molecule: i64,
}

impl WaterChecker {
    pub fn new(range: AtomRange) -> Self {
        Self {
            range,
            group_position: 0,
            group_molecule: 0,
        }
    }

    /// Checks one atom; atoms outside the range are ignored and do not
    /// advance the triplet.
    pub fn check(
        &mut self,
        position: usize,
        label: &str,
        molecule: i64,
        line: &str,
        diagnostics: &mut Diagnostics,
    ) {
        if !self.range.contains(position) {
            return;
        }

        let slot = self.group_position % WATER_LABELS.len();
        if slot == 0 {
            self.group_molecule = molecule;
            if label.trim() != WATER_LABELS[0] {
                diagnostics.push(Advisory::WaterOxygenExpected {
                    line: line.to_string(),
                });
            }
        } else {
            if molecule != self.group_molecule {
                diagnostics.push(Advisory::WaterOutOfOrder {
                    line: line.to_string(),
                });
            }
            let expected = WATER_LABELS[slot];
            if label.trim() != expected {
                diagnostics.push(Advisory::WaterHydrogenExpected {
                    label: expected,
                    line: line.to_string(),
                });
            }
        }
        self.group_position += 1;
    }
}
