use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// A non-fatal finding raised while rewriting a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    SerialHexOverflow { serial: u64, text: String },
    DuplicateSerial { serial: u64, line: usize },
    MoleculeHexTransition,
    MoleculeHexOverflow { molecule: u64, text: String },
    MissingElementType { atom_type: String },
    WaterOxygenExpected { line: String },
    WaterHydrogenExpected { label: &'static str, line: String },
    WaterOutOfOrder { line: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SerialHexOverflow { serial, text } => write!(
                f,
                "Hex representation of {} is {}, which is greater than 5 characters. This will affect the PDB output formatting.",
                serial, text
            ),
            Advisory::DuplicateSerial { serial, line } => write!(
                f,
                "Atom serial {} on line {} was already assigned to an earlier atom. Check the atom renumbering file.",
                serial, line
            ),
            Advisory::MoleculeHexTransition => {
                write!(f, "Molecule numbers greater than 9999 will be printed in hex")
            }
            Advisory::MoleculeHexOverflow { molecule, text } => write!(
                f,
                "Hex representation of {} is {}, which is greater than 4 characters. This will affect the PDB output formatting.",
                molecule, text
            ),
            Advisory::MissingElementType { atom_type } => write!(
                f,
                "Please add atom type '{}' to dictionary of elements. Will not write/overwrite element type in the pdb output.",
                atom_type
            ),
            Advisory::WaterOxygenExpected { line } => write!(
                f,
                "Expected an OH2 atom to be the first atom of a water molecule. Check line: {}",
                line
            ),
            Advisory::WaterHydrogenExpected { label, line } => {
                let ordinal = if *label == "H1" { "second" } else { "third" };
                write!(
                    f,
                    "Expected an {} atom to be the {} atom of a water molecule. Check line: {}",
                    label, ordinal, line
                )
            }
            Advisory::WaterOutOfOrder { line } => {
                write!(f, "Water not in order on line: {}", line)
            }
        }
    }
}

/// Collects the advisories of one run, logging each as it is raised.
#[derive(Debug, Default)]
pub struct Diagnostics {
    advisories: Vec<Advisory>,
    reported_missing_types: HashSet<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, advisory: Advisory) {
        warn!("{}", advisory);
        self.advisories.push(advisory);
    }

    /// Raises [`Advisory::MissingElementType`] the first time `atom_type` is seen.
    pub fn missing_element_type(&mut self, atom_type: &str) {
        if self.reported_missing_types.insert(atom_type.to_string()) {
            self.push(Advisory::MissingElementType {
                atom_type: atom_type.to_string(),
            });
        }
    }

    pub fn into_advisories(self) -> Vec<Advisory> {
        self.advisories
    }
}
