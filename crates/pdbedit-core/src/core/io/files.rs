use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Append,
}

/// Writes each item on its own line, creating/truncating or appending to `path`.
pub fn write_lines<I, S>(path: &Path, lines: I, mode: WriteMode) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Create => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true).create(true),
    };
    let mut writer = BufWriter::new(options.open(path)?);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()
}

/// `<stem><suffix><ext>`, placed in `base_dir` when given, else next to `src`.
pub fn derive_output_path(src: &Path, suffix: &str, base_dir: Option<&Path>) -> PathBuf {
    let stem = src.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let mut name = format!("{}{}", stem, suffix);
    if let Some(ext) = src.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    match base_dir {
        Some(dir) => dir.join(name),
        None => src.with_file_name(name),
    }
}

/// Moves `name` into `base_dir` (keeping only its file name), or returns it unchanged.
pub fn place_in_dir(name: &Path, base_dir: Option<&Path>) -> PathBuf {
    match (base_dir, name.file_name()) {
        (Some(dir), Some(file_name)) => dir.join(file_name),
        _ => name.to_path_buf(),
    }
}
