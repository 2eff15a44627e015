use clap::Parser;
use pdbedit::workflows::spell::add_word;
use std::path::PathBuf;
use std::process;
use tracing::Level;

const INPUT_ERROR: i32 = 1;
const IO_ERROR: i32 = 2;

const DEFAULT_DICTIONARY: &str = "en_user.dic";

#[derive(Parser, Debug)]
#[command(
    name = "tex_add_spell",
    version,
    about = "Adds a word to a Hunspell-type dictionary file."
)]
struct Args {
    /// The word to add to the dictionary
    new_word: String,

    /// Hunspell affix code to add after the word and a '/' (e.g. 'SM' for
    /// plural and possessive forms)
    #[arg(short, long, default_value = "")]
    sfx: String,

    /// Location of the dictionary file to be modified
    #[arg(short, long = "dict_loc", value_name = "PATH", default_value = DEFAULT_DICTIONARY)]
    dict_loc: PathBuf,
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

    println!(
        "Adding word '{}' to file: {}",
        args.new_word,
        args.dict_loc.display()
    );
    if let Err(e) = add_word(&args.dict_loc, &args.new_word, Some(&args.sfx)) {
        eprintln!("Error: {}", e);
        process::exit(if e.is_io() { IO_ERROR } else { INPUT_ERROR });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let args = Args::try_parse_from(["tex_add_spell", "gradient"]).unwrap();
        assert_eq!(args.new_word, "gradient");
        assert_eq!(args.sfx, "");
        assert_eq!(args.dict_loc, PathBuf::from(DEFAULT_DICTIONARY));
    }

    #[test]
    fn suffix_and_dictionary_are_parsed() {
        let args =
            Args::try_parse_from(["tex_add_spell", "-s", "SM", "--dict_loc", "my.dic", "isotherm"])
                .unwrap();
        assert_eq!(args.sfx, "SM");
        assert_eq!(args.dict_loc, PathBuf::from("my.dic"));
    }
}
