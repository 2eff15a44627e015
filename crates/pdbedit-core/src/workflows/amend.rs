use crate::core::io::files::{WriteMode, derive_output_path, write_lines};
use crate::engine::error::EngineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const AMEND_SUFFIX: &str = "_amend";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmendOptions {
    pub begin: String,
    pub end: String,
    /// Defaults to `<stem>_amend<ext>` next to the input.
    pub new_name: Option<PathBuf>,
}

impl AmendOptions {
    pub fn output_path(&self, input: &Path) -> PathBuf {
        self.new_name
            .clone()
            .unwrap_or_else(|| derive_output_path(input, AMEND_SUFFIX, None))
    }
}

/// Writes `begin + line + end` for every trimmed line of `input`; returns the
/// path written. The input is read in full before the output is created.
#[instrument(skip_all, name = "amend_workflow")]
pub fn amend_lines(input: &Path, options: &AmendOptions) -> Result<PathBuf, EngineError> {
    if options.begin.is_empty() && options.end.is_empty() {
        warn!(
            "Return file will be the same as the input, as no begin or end strings were passed."
        );
    }

    let content = fs::read_to_string(input).map_err(|e| EngineError::io(input, e))?;
    let amended = content
        .lines()
        .map(|line| format!("{}{}{}", options.begin, line.trim(), options.end));

    let output = options.output_path(input);
    write_lines(&output, amended, WriteMode::Create).map_err(|e| EngineError::io(&output, e))?;
    info!("Amended {:?} into {:?}", input, output);
    Ok(output)
}
