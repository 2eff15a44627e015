use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::lookup::LookupError;
use crate::core::io::pdb::PdbError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Could not access '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Failed to read PDB file '{path}': {source}", path = path.display())]
    Pdb {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error(
        "Missing element for atom type '{atom_type}' on line {line}; please add it to the dictionary of elements"
    )]
    MissingElement { atom_type: String, line: usize },
}

impl EngineError {
    pub fn is_io(&self) -> bool {
        match self {
            EngineError::Io { .. } => true,
            EngineError::Lookup(e) => e.is_io(),
            EngineError::Pdb { source, .. } => matches!(source, PdbError::Io(_)),
            _ => false,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, EngineError::Config(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
