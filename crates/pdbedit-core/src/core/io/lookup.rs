use crate::core::models::element::ElementTable;
use csv::{ReaderBuilder, Trim};
use std::any::type_name;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

const BUILTIN_ELEMENT_TABLE: &str = include_str!("../../../data/charmm36_atoms_elements.csv");
const BUILTIN_ELEMENT_TABLE_NAME: &str = "<built-in charmm36_atoms_elements.csv>";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Could not read file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}", path = path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Line {line} of '{path}' has {found} column(s); expected a key and a value", path = path.display())]
    ShortRow {
        path: PathBuf,
        line: u64,
        found: usize,
    },
    #[error("Could not convert '{value}' on line {line} of '{path}' to {expected}", path = path.display())]
    InvalidValue {
        path: PathBuf,
        line: u64,
        value: String,
        expected: &'static str,
    },
    #[error("Found non-unique key '{key}' on line {line} of '{path}'", path = path.display())]
    DuplicateKey {
        path: PathBuf,
        line: u64,
        key: String,
    },
    #[error(
        "Did not find a 1:1 mapping of key,val ids in '{path}': value '{value}' appears more than once",
        path = path.display()
    )]
    NotOneToOne { path: PathBuf, value: String },
    #[error(
        "Element '{element}' for atom type '{atom_type}' in '{path}' is longer than 2 characters",
        path = path.display()
    )]
    ElementTooLong {
        path: PathBuf,
        atom_type: String,
        element: String,
    },
}

impl LookupError {
    pub fn is_io(&self) -> bool {
        match self {
            LookupError::Io { .. } => true,
            LookupError::Csv { source, .. } => source.is_io_error(),
            _ => false,
        }
    }
}

/// How a two-column lookup table is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Reject tables in which two keys map to the same value.
    pub one_to_one: bool,
}

impl LookupOptions {
    pub fn one_to_one() -> Self {
        Self { one_to_one: true }
    }
}

/// Reads a two-column, comma-delimited table into a typed map.
///
/// Fields are trimmed and blank lines skipped; columns past the second are
/// ignored. Duplicate keys are always rejected.
pub fn read_lookup_table<K, V>(
    path: &Path,
    options: LookupOptions,
) -> Result<HashMap<K, V>, LookupError>
where
    K: FromStr + Eq + Hash + Display,
    V: FromStr + Eq + Hash + Display + Clone,
{
    let file = File::open(path).map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_lookup_from(file, path, options)?;
    debug!("Read {} entries from lookup table {:?}", table.len(), path);
    Ok(table)
}

/// As [`read_lookup_table`], reading from any source; `path` only labels errors.
pub fn read_lookup_from<R, K, V>(
    reader: R,
    path: &Path,
    options: LookupOptions,
) -> Result<HashMap<K, V>, LookupError>
where
    R: Read,
    K: FromStr + Eq + Hash + Display,
    V: FromStr + Eq + Hash + Display + Clone,
{
    let mut table = HashMap::new();
    let mut seen_values = HashSet::new();

    for (line, key_text, value_text) in rows(reader, path)? {
        let key: K = parse_cell(&key_text, path, line)?;
        let value: V = parse_cell(&value_text, path, line)?;

        if table.contains_key(&key) {
            return Err(LookupError::DuplicateKey {
                path: path.to_path_buf(),
                line,
                key: key.to_string(),
            });
        }
        if options.one_to_one && !seen_values.insert(value.clone()) {
            return Err(LookupError::NotOneToOne {
                path: path.to_path_buf(),
                value: value.to_string(),
            });
        }
        table.insert(key, value);
    }
    Ok(table)
}

/// Reads an atom-type to element table. Element symbols longer than two
/// characters do not fit the element column and are rejected.
pub fn read_element_table(path: &Path) -> Result<ElementTable, LookupError> {
    let file = File::open(path).map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_element_table_from(file, path)?;
    debug!("Read {} atom types from element table {:?}", table.len(), path);
    Ok(table)
}

pub fn read_element_table_from<R: Read>(reader: R, path: &Path) -> Result<ElementTable, LookupError> {
    let entries: HashMap<String, String> = read_lookup_from(reader, path, LookupOptions::default())?;
    if let Some((atom_type, element)) = entries.iter().find(|(_, e)| e.chars().count() > 2) {
        return Err(LookupError::ElementTooLong {
            path: path.to_path_buf(),
            atom_type: atom_type.clone(),
            element: element.clone(),
        });
    }
    Ok(ElementTable::new(entries))
}

/// The CHARMM36 atom-name to element table bundled with the library.
pub fn builtin_element_table() -> Result<ElementTable, LookupError> {
    read_element_table_from(
        BUILTIN_ELEMENT_TABLE.as_bytes(),
        Path::new(BUILTIN_ELEMENT_TABLE_NAME),
    )
}

fn rows<R: Read>(reader: R, path: &Path) -> Result<Vec<(u64, String, String)>, LookupError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|source| LookupError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 2 {
            return Err(LookupError::ShortRow {
                path: path.to_path_buf(),
                line,
                found: record.len(),
            });
        }
        rows.push((line, record[0].to_string(), record[1].to_string()));
    }
    Ok(rows)
}

fn parse_cell<T: FromStr>(text: &str, path: &Path, line: u64) -> Result<T, LookupError> {
    text.parse().map_err(|_| LookupError::InvalidValue {
        path: path.to_path_buf(),
        line,
        value: text.to_string(),
        expected: type_name::<T>(),
    })
}
