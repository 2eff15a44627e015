use crate::error::{CliError, Result};
use crate::utils::parser;
use ini::{Ini, ParseOption};
use pdbedit::core::models::layout::Column;
use pdbedit::engine::config::{EditConfig, EditConfigBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const MAIN_SECTION: &str = "main";

/// The `[main]` section of a configuration file, before defaults are applied.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pdb_file: Option<PathBuf>,
    new_pdb_name: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    atom_reorder_old_new_file: Option<PathBuf>,
    mol_renum_old_new_file: Option<PathBuf>,
    mol_renum_flag: Option<bool>,
    atom_type_element_dict_file: Option<PathBuf>,
    add_element_types: Option<bool>,
    first_atom_add_element: Option<usize>,
    last_atom_add_element: Option<usize>,
    first_wat_atom: Option<usize>,
    last_wat_atom: Option<usize>,
    resids_qmmm_ca_cb_link: Option<Vec<i64>>,
    pdb_line_type_last_char: Option<usize>,
    pdb_atom_num_last_char: Option<usize>,
    pdb_atom_type_last_char: Option<usize>,
    pdb_res_type_last_char: Option<usize>,
    pdb_mol_num_last_char: Option<usize>,
    pdb_x_last_char: Option<usize>,
    pdb_y_last_char: Option<usize>,
    pdb_z_last_char: Option<usize>,
    pdb_last_temp_char: Option<usize>,
    pdb_last_element_char: Option<usize>,
    pdb_print_format: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TomlConfigFile {
    main: Option<FileConfig>,
}

impl FileConfig {
    /// Reads a `.toml` file as TOML and anything else as INI.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content, path)
        } else {
            Self::from_ini_str(&content, path)
        }
    }

    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        let file: TomlConfigFile = toml::from_str(content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        file.main.ok_or_else(|| missing_section(path))
    }

    pub fn from_ini_str(content: &str, path: &Path) -> Result<Self> {
        // Values are taken as written: no backslash escapes, no quote stripping.
        let options = ParseOption {
            enabled_escape: false,
            enabled_quote: false,
            ..ParseOption::default()
        };
        let ini =
            Ini::load_from_str_opt(content, options).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        let section = ini
            .section(Some(MAIN_SECTION))
            .ok_or_else(|| missing_section(path))?;

        let mut config = Self::default();
        let mut seen = HashSet::new();
        for (key, value) in section.iter() {
            let key = key.to_ascii_lowercase();
            if !seen.insert(key.clone()) {
                return Err(CliError::Config(format!(
                    "Duplicate key '{}' in section [{}]",
                    key, MAIN_SECTION
                )));
            }
            config.set_value(&key, value.trim())?;
        }
        Ok(config)
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "pdb_file" => self.pdb_file = Some(PathBuf::from(value)),
            "new_pdb_name" => self.new_pdb_name = Some(PathBuf::from(value)),
            "output_directory" => self.output_directory = Some(PathBuf::from(value)),
            "atom_reorder_old_new_file" => {
                self.atom_reorder_old_new_file = Some(PathBuf::from(value))
            }
            "mol_renum_old_new_file" => self.mol_renum_old_new_file = Some(PathBuf::from(value)),
            "mol_renum_flag" => self.mol_renum_flag = Some(parser::parse_bool(key, value)?),
            "atom_type_element_dict_file" => {
                self.atom_type_element_dict_file = Some(PathBuf::from(value))
            }
            "add_element_types" => self.add_element_types = Some(parser::parse_bool(key, value)?),
            "first_atom_add_element" => {
                self.first_atom_add_element = Some(parser::parse_int(key, value)?)
            }
            "last_atom_add_element" => {
                self.last_atom_add_element = Some(parser::parse_int(key, value)?)
            }
            "first_wat_atom" => self.first_wat_atom = Some(parser::parse_int(key, value)?),
            "last_wat_atom" => self.last_wat_atom = Some(parser::parse_int(key, value)?),
            "resids_qmmm_ca_cb_link" => {
                self.resids_qmmm_ca_cb_link = Some(parser::parse_int_list(key, value)?)
            }
            "pdb_line_type_last_char" => {
                self.pdb_line_type_last_char = Some(parser::parse_int(key, value)?)
            }
            "pdb_atom_num_last_char" => {
                self.pdb_atom_num_last_char = Some(parser::parse_int(key, value)?)
            }
            "pdb_atom_type_last_char" => {
                self.pdb_atom_type_last_char = Some(parser::parse_int(key, value)?)
            }
            "pdb_res_type_last_char" => {
                self.pdb_res_type_last_char = Some(parser::parse_int(key, value)?)
            }
            "pdb_mol_num_last_char" => {
                self.pdb_mol_num_last_char = Some(parser::parse_int(key, value)?)
            }
            "pdb_x_last_char" => self.pdb_x_last_char = Some(parser::parse_int(key, value)?),
            "pdb_y_last_char" => self.pdb_y_last_char = Some(parser::parse_int(key, value)?),
            "pdb_z_last_char" => self.pdb_z_last_char = Some(parser::parse_int(key, value)?),
            "pdb_last_temp_char" => self.pdb_last_temp_char = Some(parser::parse_int(key, value)?),
            "pdb_last_element_char" => {
                self.pdb_last_element_char = Some(parser::parse_int(key, value)?)
            }
            "pdb_print_format" => self.pdb_print_format = Some(value.to_string()),
            _ => {
                return Err(CliError::Config(format!(
                    "Unexpected key '{}' in section [{}]",
                    key, MAIN_SECTION
                )));
            }
        }
        Ok(())
    }

    fn column_ends(&self) -> Vec<(Column, usize)> {
        [
            (Column::LineType, self.pdb_line_type_last_char),
            (Column::Serial, self.pdb_atom_num_last_char),
            (Column::AtomType, self.pdb_atom_type_last_char),
            (Column::ResidueType, self.pdb_res_type_last_char),
            (Column::MoleculeNumber, self.pdb_mol_num_last_char),
            (Column::X, self.pdb_x_last_char),
            (Column::Y, self.pdb_y_last_char),
            (Column::Z, self.pdb_z_last_char),
            (Column::OccupancyTemperature, self.pdb_last_temp_char),
            (Column::Element, self.pdb_last_element_char),
        ]
        .into_iter()
        .filter_map(|(column, end)| end.map(|end| (column, end)))
        .collect()
    }

    pub fn into_edit_config(self) -> Result<EditConfig> {
        let column_ends = self.column_ends();
        let mut builder = EditConfigBuilder::new();

        if let Some(path) = self.pdb_file {
            builder = builder.pdb_path(path);
        }
        if let Some(path) = self.new_pdb_name {
            builder = builder.new_pdb_name(path);
        }
        if let Some(path) = self.output_directory {
            builder = builder.output_directory(path);
        }
        if let Some(path) = self.atom_reorder_old_new_file {
            builder = builder.atom_reorder_path(path);
        }
        if let Some(path) = self.mol_renum_old_new_file {
            builder = builder.molecule_renumber_path(path);
        }
        if let Some(flag) = self.mol_renum_flag {
            builder = builder.renumber_molecules(flag);
        }
        if let Some(path) = self.atom_type_element_dict_file {
            builder = builder.element_table_path(path);
        }
        if let Some(flag) = self.add_element_types {
            builder = builder.add_elements(flag);
        }
        if let Some(first) = self.first_atom_add_element {
            builder = builder.first_element_atom(first);
        }
        if let Some(last) = self.last_atom_add_element {
            builder = builder.last_element_atom(last);
        }
        if let Some(first) = self.first_wat_atom {
            builder = builder.first_water_atom(first);
        }
        if let Some(last) = self.last_wat_atom {
            builder = builder.last_water_atom(last);
        }
        if let Some(residues) = self.resids_qmmm_ca_cb_link {
            builder = builder.qmmm_residues(residues);
        }
        for (column, end) in column_ends {
            builder = builder.column_end(column, end);
        }
        if let Some(format) = self.pdb_print_format {
            builder = builder.record_template(format);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

fn missing_section(path: &Path) -> CliError {
    CliError::Config(format!(
        "No [{}] section found in configuration file '{}'",
        MAIN_SECTION,
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use pdbedit::core::io::template::RecordTemplate;
    use pdbedit::core::models::layout::ColumnLayout;
    use pdbedit::engine::config::{AtomRange, ElementTableSource};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn minimal_ini_applies_defaults() {
        let path = write_config_file("minimal.ini", "[main]\npdb_file = glue.pdb\n");
        let config = FileConfig::from_file(&path).unwrap().into_edit_config().unwrap();

        assert_eq!(config.pdb_path, PathBuf::from("glue.pdb"));
        assert!(!config.renumber_molecules);
        assert!(!config.add_elements);
        assert_eq!(config.element_table, None);
        assert_eq!(config.element_range, AtomRange::default());
        assert_eq!(config.water_range, None);
        assert_eq!(config.layout, ColumnLayout::default());
        assert_eq!(config.template, RecordTemplate::default());
        assert_eq!(config.output_path(), PathBuf::from("glue_new.pdb"));
    }

    #[test]
    fn full_ini_is_converted() {
        let path = write_config_file(
            "full.ini",
            "[main]\n\
             PDB_File = in/glue.pdb\n\
             new_pdb_name = glue_fixed.pdb\n\
             output_directory = out\n\
             mol_renum_flag = Yes\n\
             atom_type_element_dict_file = elements.csv\n\
             last_atom_add_element = 120\n\
             first_wat_atom = 10\n\
             last_wat_atom = 12\n\
             resids_qmmm_ca_cb_link = 2, 3,4\n\
             pdb_last_element_char = 80\n",
        );
        let config = FileConfig::from_file(&path).unwrap().into_edit_config().unwrap();

        assert_eq!(config.pdb_path, PathBuf::from("in/glue.pdb"));
        assert_eq!(config.output_path(), PathBuf::from("out/glue_fixed.pdb"));
        assert!(config.renumber_molecules);
        assert!(config.add_elements);
        assert_eq!(
            config.element_table,
            Some(ElementTableSource::File(PathBuf::from("elements.csv")))
        );
        assert_eq!(config.element_range.last, Some(120));
        assert!(config.water_range.is_some());
        assert_eq!(config.qmmm_residues.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
        assert_eq!(config.layout.end(Column::Element), 80);
    }

    #[test]
    fn ini_values_keep_backslashes_and_quotes() {
        let path = write_config_file(
            "windows.ini",
            "[main]\npdb_file = data\\new\\t1.pdb\nnew_pdb_name = \"out.pdb\"\n",
        );
        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.pdb_file, Some(PathBuf::from(r"data\new\t1.pdb")));
        assert_eq!(config.new_pdb_name, Some(PathBuf::from("\"out.pdb\"")));
    }

    #[test]
    fn toml_uses_native_types() {
        let path = write_config_file(
            "run.toml",
            r#"
            [main]
            pdb_file = "glue.pdb"
            add_element_types = true
            resids_qmmm_ca_cb_link = [7, 9]
            pdb_print_format = "{:6s}{:>5}{:^6s}{:5s}{:>4}    {:8.3f}{:8.3f}{:8.3f}{:22s}{:>2s}{:s}"
            "#,
        );
        let config = FileConfig::from_file(&path).unwrap().into_edit_config().unwrap();
        assert!(config.add_elements);
        assert_eq!(config.element_table, Some(ElementTableSource::Builtin));
        assert_eq!(config.qmmm_residues.len(), 2);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let path = write_config_file("unknown.ini", "[main]\npdb_file = a.pdb\ncolour = blue\n");
        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("Unexpected key 'colour'")));
        assert_eq!(err.exit_code(), crate::error::INPUT_ERROR);

        let path = write_config_file("unknown.toml", "[main]\npdb_file = \"a.pdb\"\ncolour = 1\n");
        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
        assert_eq!(err.exit_code(), crate::error::INPUT_ERROR);
    }

    #[test]
    fn missing_pdb_file_is_rejected() {
        let path = write_config_file("no_pdb.ini", "[main]\nmol_renum_flag = true\n");
        let err = FileConfig::from_file(&path).unwrap().into_edit_config().unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("Missing config val for key 'pdb_file'")));
    }

    #[test]
    fn missing_section_and_bad_values_are_config_errors() {
        let path = write_config_file("other.ini", "[other]\npdb_file = a.pdb\n");
        assert!(matches!(FileConfig::from_file(&path), Err(CliError::Config(_))));

        let path = write_config_file("bad_bool.ini", "[main]\npdb_file = a.pdb\nmol_renum_flag = maybe\n");
        assert!(matches!(FileConfig::from_file(&path), Err(CliError::Config(_))));

        let path = write_config_file("dup.ini", "[main]\npdb_file = a.pdb\nPDB_FILE = b.pdb\n");
        assert!(matches!(FileConfig::from_file(&path), Err(CliError::Config(ref msg)) if msg.contains("Duplicate")));
    }

    #[test]
    fn invalid_layout_is_a_config_error() {
        let path = write_config_file(
            "layout.ini",
            "[main]\npdb_file = a.pdb\npdb_x_last_char = 20\n",
        );
        let err = FileConfig::from_file(&path).unwrap().into_edit_config().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let err = FileConfig::from_file(&TEST_DIR.path().join("absent.ini")).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), crate::error::IO_ERROR);
    }
}
