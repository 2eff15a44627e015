use crate::engine::error::EngineError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The dictionary's backup location, `<dict>.bak`.
pub fn backup_path(dictionary: &Path) -> PathBuf {
    let mut name = OsString::from(dictionary.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Adds `word` (as `word/suffix` when a suffix is given) to a Hunspell-style
/// dictionary whose first line is the entry count. The original file is moved
/// to [`backup_path`] and the rewritten file lists the entries sorted.
///
/// Duplicates are not checked.
#[instrument(skip_all, name = "spell_workflow")]
pub fn add_word(dictionary: &Path, word: &str, suffix: Option<&str>) -> Result<usize, EngineError> {
    let entry = match suffix.filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{}/{}", word, suffix),
        None => word.to_string(),
    };
    info!("Adding word '{}' to file: {}", entry, dictionary.display());

    let backup = backup_path(dictionary);
    fs::rename(dictionary, &backup).map_err(|e| EngineError::io(dictionary, e))?;
    let content = fs::read_to_string(&backup).map_err(|e| EngineError::io(&backup, e))?;

    // The count line is replaced by the new entry.
    let mut entries: Vec<&str> = content.lines().skip(1).collect();
    entries.push(&entry);
    entries.sort_unstable();

    let mut output = format!("{}\n", entries.len());
    for line in &entries {
        output.push_str(line);
        output.push('\n');
    }
    fs::write(dictionary, output).map_err(|e| EngineError::io(dictionary, e))?;
    Ok(entries.len())
}
