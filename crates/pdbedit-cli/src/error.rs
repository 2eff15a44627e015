use crate::utils::parser::ParseError;
use pdbedit::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub const GOOD_RET: i32 = 0;
pub const INPUT_ERROR: i32 = 1;
pub const IO_ERROR: i32 = 2;
pub const INVALID_DATA: i32 = 3;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(e) if e.is_io() => IO_ERROR,
            CliError::Engine(e) if e.is_config() => INPUT_ERROR,
            CliError::Engine(_) => INVALID_DATA,
            CliError::Io(_) => IO_ERROR,
            CliError::Config(_) | CliError::FileParsing { .. } => INPUT_ERROR,
        }
    }

    /// Input problems are followed by the usage text.
    pub fn shows_help(&self) -> bool {
        self.exit_code() == INPUT_ERROR
    }
}
