use crate::core::io::files::{derive_output_path, place_in_dir};
use crate::core::io::template::{RecordTemplate, TemplateError};
use crate::core::models::layout::{Column, ColumnLayout, LayoutError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_OUTPUT_SUFFIX: &str = "_new";
pub const QM_DESCRIPTOR_FILE_NAME: &str = "amino_id.dat";
pub const QM_POSITIONS_FILE_NAME: &str = "vmd_protein_atoms.dat";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing config val for key '{0}'")]
    MissingParameter(&'static str),
    #[error("Invalid column layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Invalid PDB print format: {0}")]
    Template(#[from] TemplateError),
    #[error("Invalid atom range for '{name}': first atom {first} comes after last atom {last}")]
    InvalidRange {
        name: &'static str,
        first: usize,
        last: usize,
    },
}

/// Where the atom-type to element table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementTableSource {
    /// The CHARMM36 table bundled with the library.
    Builtin,
    File(PathBuf),
}

/// An inclusive range of 1-based positional atom indices; `last: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomRange {
    pub first: usize,
    pub last: Option<usize>,
}

impl Default for AtomRange {
    fn default() -> Self {
        Self {
            first: 1,
            last: None,
        }
    }
}

impl AtomRange {
    pub fn contains(&self, position: usize) -> bool {
        position >= self.first && self.last.is_none_or(|last| position <= last)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditConfig {
    pub pdb_path: PathBuf,
    pub new_pdb_name: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub atom_reorder_path: Option<PathBuf>,
    pub molecule_renumber_path: Option<PathBuf>,
    pub renumber_molecules: bool,
    pub element_table: Option<ElementTableSource>,
    pub add_elements: bool,
    pub element_range: AtomRange,
    pub water_range: Option<AtomRange>,
    pub qmmm_residues: BTreeSet<i64>,
    pub layout: ColumnLayout,
    pub template: RecordTemplate,
}

impl EditConfig {
    /// The rewritten PDB path: `new_pdb_name` (moved into the output directory
    /// when one is set), else `<input stem>_new<ext>`.
    pub fn output_path(&self) -> PathBuf {
        let base_dir = self.output_directory.as_deref();
        match &self.new_pdb_name {
            Some(name) => place_in_dir(name, base_dir),
            None => derive_output_path(&self.pdb_path, DEFAULT_OUTPUT_SUFFIX, base_dir),
        }
    }

    /// Directory receiving the QM/MM descriptor and position files.
    pub fn auxiliary_directory(&self) -> PathBuf {
        if let Some(dir) = &self.output_directory {
            return dir.clone();
        }
        self.output_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    pub fn qm_descriptor_path(&self) -> PathBuf {
        self.auxiliary_directory().join(QM_DESCRIPTOR_FILE_NAME)
    }

    pub fn qm_positions_path(&self) -> PathBuf {
        self.auxiliary_directory().join(QM_POSITIONS_FILE_NAME)
    }

    pub fn has_qmmm_selection(&self) -> bool {
        !self.qmmm_residues.is_empty()
    }
}

#[derive(Default)]
pub struct EditConfigBuilder {
    pdb_path: Option<PathBuf>,
    new_pdb_name: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    atom_reorder_path: Option<PathBuf>,
    molecule_renumber_path: Option<PathBuf>,
    renumber_molecules: Option<bool>,
    element_table_path: Option<PathBuf>,
    add_elements: Option<bool>,
    first_element_atom: Option<usize>,
    last_element_atom: Option<usize>,
    first_water_atom: Option<usize>,
    last_water_atom: Option<usize>,
    qmmm_residues: BTreeSet<i64>,
    column_ends: Vec<(Column, usize)>,
    record_template: Option<String>,
}

impl EditConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pdb_path(mut self, path: PathBuf) -> Self {
        self.pdb_path = Some(path);
        self
    }
    pub fn new_pdb_name(mut self, path: PathBuf) -> Self {
        self.new_pdb_name = Some(path);
        self
    }
    pub fn output_directory(mut self, path: PathBuf) -> Self {
        self.output_directory = Some(path);
        self
    }
    pub fn atom_reorder_path(mut self, path: PathBuf) -> Self {
        self.atom_reorder_path = Some(path);
        self
    }
    pub fn molecule_renumber_path(mut self, path: PathBuf) -> Self {
        self.molecule_renumber_path = Some(path);
        self
    }
    pub fn renumber_molecules(mut self, enabled: bool) -> Self {
        self.renumber_molecules = Some(enabled);
        self
    }
    pub fn element_table_path(mut self, path: PathBuf) -> Self {
        self.element_table_path = Some(path);
        self
    }
    pub fn add_elements(mut self, enabled: bool) -> Self {
        self.add_elements = Some(enabled);
        self
    }
    pub fn first_element_atom(mut self, position: usize) -> Self {
        self.first_element_atom = Some(position);
        self
    }
    pub fn last_element_atom(mut self, position: usize) -> Self {
        self.last_element_atom = Some(position);
        self
    }
    pub fn first_water_atom(mut self, position: usize) -> Self {
        self.first_water_atom = Some(position);
        self
    }
    pub fn last_water_atom(mut self, position: usize) -> Self {
        self.last_water_atom = Some(position);
        self
    }
    pub fn qmmm_residues(mut self, residues: impl IntoIterator<Item = i64>) -> Self {
        self.qmmm_residues = residues.into_iter().collect();
        self
    }
    pub fn column_end(mut self, column: Column, end: usize) -> Self {
        self.column_ends.push((column, end));
        self
    }
    pub fn record_template(mut self, template: String) -> Self {
        self.record_template = Some(template);
        self
    }

    pub fn build(self) -> Result<EditConfig, ConfigError> {
        let pdb_path = self
            .pdb_path
            .ok_or(ConfigError::MissingParameter("pdb_file"))?;

        // Backfill or a QM/MM selection without a table falls back to the
        // built-in one. Any resolved table turns backfill on.
        let element_table = match self.element_table_path {
            Some(path) => Some(ElementTableSource::File(path)),
            None if self.add_elements == Some(true) || !self.qmmm_residues.is_empty() => {
                Some(ElementTableSource::Builtin)
            }
            None => None,
        };
        let add_elements = element_table.is_some();

        let element_range = AtomRange {
            first: self.first_element_atom.unwrap_or(1),
            last: self.last_element_atom,
        };
        if let Some(last) = element_range.last {
            if element_range.first > last {
                return Err(ConfigError::InvalidRange {
                    name: "add_element",
                    first: element_range.first,
                    last,
                });
            }
        }

        let water_range = match (self.first_water_atom, self.last_water_atom) {
            (Some(first), Some(last)) if first > last => {
                return Err(ConfigError::InvalidRange {
                    name: "wat_atom",
                    first,
                    last,
                });
            }
            (Some(first), Some(last)) => Some(AtomRange {
                first,
                last: Some(last),
            }),
            _ => None,
        };

        let layout = ColumnLayout::with_overrides(self.column_ends)?;
        let template = match self.record_template {
            Some(source) => RecordTemplate::parse(&source)?,
            None => RecordTemplate::default(),
        };

        Ok(EditConfig {
            pdb_path,
            new_pdb_name: self.new_pdb_name,
            output_directory: self.output_directory,
            atom_reorder_path: self.atom_reorder_path,
            molecule_renumber_path: self.molecule_renumber_path,
            renumber_molecules: self.renumber_molecules.unwrap_or(false),
            element_table,
            add_elements,
            element_range,
            water_range,
            qmmm_residues: self.qmmm_residues,
            layout,
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> EditConfigBuilder {
        EditConfigBuilder::new().pdb_path(PathBuf::from("data/glue.pdb"))
    }

    #[test]
    fn build_applies_defaults() {
        let config = minimal().build().unwrap();
        assert!(!config.renumber_molecules);
        assert!(!config.add_elements);
        assert_eq!(config.element_table, None);
        assert_eq!(config.element_range, AtomRange::default());
        assert_eq!(config.water_range, None);
        assert!(config.qmmm_residues.is_empty());
        assert_eq!(config.layout, ColumnLayout::default());
        assert_eq!(config.template, RecordTemplate::default());
    }

    #[test]
    fn build_fails_without_pdb_path() {
        let result = EditConfigBuilder::new().renumber_molecules(true).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("pdb_file")));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Missing config val for key 'pdb_file'")
        );
    }

    #[test]
    fn element_table_path_implies_backfill() {
        let config = minimal()
            .element_table_path(PathBuf::from("elements.csv"))
            .build()
            .unwrap();
        assert!(config.add_elements);
        assert_eq!(
            config.element_table,
            Some(ElementTableSource::File(PathBuf::from("elements.csv")))
        );
    }

    #[test]
    fn backfill_without_table_uses_builtin() {
        let config = minimal().add_elements(true).build().unwrap();
        assert_eq!(config.element_table, Some(ElementTableSource::Builtin));
    }

    #[test]
    fn qmmm_selection_without_table_uses_builtin_and_backfills() {
        let config = minimal().qmmm_residues([12, 13]).build().unwrap();
        assert_eq!(config.element_table, Some(ElementTableSource::Builtin));
        assert!(config.add_elements);
        assert!(config.has_qmmm_selection());
    }

    #[test]
    fn water_range_requires_both_ends() {
        let only_first = minimal().first_water_atom(5).build().unwrap();
        assert_eq!(only_first.water_range, None);

        let both = minimal()
            .first_water_atom(5)
            .last_water_atom(10)
            .build()
            .unwrap();
        let range = both.water_range.unwrap();
        assert!(range.contains(5));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        let result = minimal().first_water_atom(9).last_water_atom(3).build();
        assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));

        let result = minimal().first_element_atom(9).last_element_atom(3).build();
        assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn invalid_layout_and_template_are_rejected() {
        let result = minimal().column_end(Column::Serial, 4).build();
        assert!(matches!(result, Err(ConfigError::Layout(_))));

        let result = minimal().record_template("{:6s}".to_string()).build();
        assert!(matches!(result, Err(ConfigError::Template(_))));
    }

    #[test]
    fn output_path_is_derived_from_input() {
        let config = minimal().build().unwrap();
        assert_eq!(config.output_path(), PathBuf::from("data/glue_new.pdb"));
        assert_eq!(
            config.qm_descriptor_path(),
            PathBuf::from("data").join(QM_DESCRIPTOR_FILE_NAME)
        );
    }

    #[test]
    fn output_directory_applies_to_every_output() {
        let config = minimal()
            .new_pdb_name(PathBuf::from("other/new.pdb"))
            .output_directory(PathBuf::from("out"))
            .build()
            .unwrap();
        assert_eq!(config.output_path(), PathBuf::from("out/new.pdb"));
        assert_eq!(
            config.qm_positions_path(),
            PathBuf::from("out").join(QM_POSITIONS_FILE_NAME)
        );
    }

    #[test]
    fn unbounded_range_contains_everything_after_first() {
        let range = AtomRange {
            first: 3,
            last: None,
        };
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(1_000_000));
    }
}
