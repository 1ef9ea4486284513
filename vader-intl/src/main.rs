use clap::{Arg, Command, value_parser};
use std::path::PathBuf;

use vader_intl::{ComposedLexicon, LexiconProvider, StaticLexicon, load_lexicon_from_file};

fn cli() -> Command {
    Command::new("vader-intl")
        .version("0.1.0")
        .about("Look words up in layered sentiment lexicons, first file taking priority")
        .arg(
            Arg::new("lexicon")
                .help("Lexicon JSON files, highest priority first")
                .value_parser(value_parser!(PathBuf))
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("words")
                .help("Words to look up, after --")
                .num_args(1..)
                .last(true)
                .required(true),
        )
}

fn describe(lexicon: &dyn LexiconProvider, word: &str) -> String {
    format!(
        "{}\tnegation={}\tcontrast={}\tsentiment={}\tboost={}",
        word,
        lexicon.is_negation(word),
        lexicon.is_contrast(word),
        lexicon.sentiment(word),
        lexicon.boost_value(word)
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let lexicons = matches
        .get_many::<PathBuf>("lexicon")
        .ok_or("missing lexicon files")?
        .map(|path| load_lexicon_from_file(path))
        .collect::<Result<Vec<StaticLexicon>, String>>()?;

    let providers: Vec<&dyn LexiconProvider> = lexicons
        .iter()
        .map(|lexicon| lexicon as &dyn LexiconProvider)
        .collect();
    let combined = ComposedLexicon::new(&providers);

    for word in matches.get_many::<String>("words").ok_or("missing words")? {
        println!("{}", describe(&combined, word));
    }

    Ok(())
}
