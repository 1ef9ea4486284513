use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use vader_intl::load_lexicon_from_file;
use vader_intl_mt::{
    GoogleTranslateProvider, LexiconTranslator, MachineTranslator, MockMode, MockTranslator,
    RateLimiter, write_translated_lexicon,
};

const DEFAULT_CONCURRENT_REQUESTS: &str = "10";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("vader-intl-mt")
        .version("0.1.0")
        .about("Machine-translate a VADER sentiment lexicon into other languages")
        .arg(
            Arg::new("lexicon")
                .long("lexicon")
                .short('l')
                .help("English source lexicon (JSON with negations/contrasts/sentiments/boosters)")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("langs")
                .long("langs")
                .help("Language codes to build a lexicon for (fr,es,nl,...)")
                .value_delimiter(',')
                .required(true),
        )
        .arg(
            Arg::new("reqs")
                .long("reqs")
                .help("How many translation requests to run at once")
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_CONCURRENT_REQUESTS),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .help("Directory in which the lexicons folder will be created")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of Google Translate")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every translated word")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_directive = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive.parse()?),
        )
        .init();

    let lexicon_path = matches
        .get_one::<PathBuf>("lexicon")
        .ok_or("missing --lexicon")?;
    let langs: Vec<&String> = matches
        .get_many::<String>("langs")
        .map(|values| values.collect())
        .unwrap_or_default();
    let reqs = *matches.get_one::<usize>("reqs").ok_or("missing --reqs")?;
    let out = matches.get_one::<PathBuf>("out").ok_or("missing --out")?;
    let out_root = std::path::absolute(out)?;

    let source = load_lexicon_from_file(lexicon_path)?;
    info!(
        path = %lexicon_path.display(),
        entries = source.tables().len(),
        "loaded source lexicon"
    );

    let provider: Arc<dyn MachineTranslator> = if matches.get_flag("mock") {
        Arc::new(MockTranslator::new(MockMode::Suffix))
    } else {
        match GoogleTranslateProvider::from_env() {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                warn!("{}; falling back to the public Google Translate endpoint", e);
                Arc::new(GoogleTranslateProvider::public()?)
            }
        }
    };

    let translator = LexiconTranslator::new(provider, RateLimiter::new(reqs)?);
    info!(
        provider = translator.provider_name(),
        concurrency = translator.limiter().capacity(),
        out = %out_root.display(),
        "starting translation"
    );

    let mut failed = Vec::new();
    for lang in langs {
        let translated = match translator.translate_lexicon(source.tables(), lang).await {
            Ok(translated) => translated,
            Err(e) => {
                error!(lang = %lang, "translation failed: {}", e);
                failed.push(lang.as_str());
                continue;
            }
        };

        if let Err(e) = write_translated_lexicon(&out_root, &translated) {
            error!(lang = %lang, "failed to write lexicon: {}", e);
            failed.push(lang.as_str());
        }
    }

    if !failed.is_empty() {
        return Err(format!("no lexicon written for: {}", failed.join(", ")).into());
    }

    Ok(())
}
