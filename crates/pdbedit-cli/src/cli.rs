use clap::Parser;
use std::path::PathBuf;

pub const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

pub const DEFAULT_CONFIG_FILE: &str = "pdb_edit.ini";

#[derive(Parser, Debug)]
#[command(
    name = "pdb_edit",
    version,
    about = "Creates a new version of a PDB file. Atoms are numbered starting from one; options include renumbering molecules, adding element types and writing QM/MM index files.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Location of the configuration file (INI with a [main] section, or TOML
    /// with a [main] table when the name ends in .toml)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
