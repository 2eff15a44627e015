use clap::Parser;
use pdbedit::workflows::amend::{AmendOptions, amend_lines};
use std::path::PathBuf;
use std::process;
use tracing::Level;

const INPUT_ERROR: i32 = 1;
const IO_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "add_to_each_line",
    version,
    about = "Reads in a file and adds a beginning and/or end to each line."
)]
struct Args {
    /// The location of the file to be amended
    file: PathBuf,

    /// String to add to the beginning of a line
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    begin: String,

    /// String to add to the end of a line
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    end: String,

    /// Name of amended file (default: <stem>_amend<ext> next to the input)
    #[arg(short, long = "new_name", value_name = "PATH")]
    new_name: Option<PathBuf>,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { INPUT_ERROR } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .with_target(false)
        .without_time()
        .compact()
        .init();

    let options = AmendOptions {
        begin: args.begin,
        end: args.end,
        new_name: args.new_name,
    };
    match amend_lines(&args.file, &options) {
        Ok(path) => println!("Wrote file: {}", path.display()),
        Err(e) => {
            eprintln!("Problems reading file: {}", e);
            process::exit(if e.is_io() { IO_ERROR } else { INPUT_ERROR });
        }
    }
}
