//! Persisting translated lexicons
//!
//! Each language is written to `<out>/lexicons/lexicon_<lang>.json` in the
//! format `vader_intl::load_lexicon_from_file` reads. Keys are written in
//! sorted order so regenerated files diff cleanly.

use crate::error::MtResult;
use crate::pipeline::TranslatedLexicon;
use crate::translator::validate_language;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use vader_intl::LexiconTables;
use vader_intl::loader::LEXICON_FILE_PREFIX;

/// Directory created under the output root
pub const LEXICON_DIR: &str = "lexicons";

#[derive(Serialize)]
struct SortedTables<'a> {
    negations: BTreeMap<&'a str, bool>,
    contrasts: BTreeMap<&'a str, bool>,
    sentiments: BTreeMap<&'a str, f64>,
    boosters: BTreeMap<&'a str, f64>,
}

fn sorted<V: Copy>(table: &HashMap<String, V>) -> BTreeMap<&str, V> {
    table.iter().map(|(k, &v)| (k.as_str(), v)).collect()
}

impl<'a> From<&'a LexiconTables> for SortedTables<'a> {
    fn from(tables: &'a LexiconTables) -> Self {
        SortedTables {
            negations: sorted(&tables.negations),
            contrasts: sorted(&tables.contrasts),
            sentiments: sorted(&tables.sentiments),
            boosters: sorted(&tables.boosters),
        }
    }
}

/// Path a lexicon for `language` is written to under `out_root`
pub fn lexicon_path(out_root: &Path, language: &str) -> PathBuf {
    out_root
        .join(LEXICON_DIR)
        .join(format!("{}{}.json", LEXICON_FILE_PREFIX, language))
}

/// Serialize lexicon tables as pretty JSON with sorted keys
pub fn lexicon_to_json(tables: &LexiconTables) -> MtResult<String> {
    let mut json = serde_json::to_string_pretty(&SortedTables::from(tables))?;
    json.push('\n');
    Ok(json)
}

/// Write a translated lexicon below `out_root`, creating the lexicon directory
/// if needed, and return the file path
pub fn write_translated_lexicon(out_root: &Path, lexicon: &TranslatedLexicon) -> MtResult<PathBuf> {
    // The language ends up in a file name
    validate_language(&lexicon.language)?;

    let path = lexicon_path(out_root, &lexicon.language);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    fs::write(&path, lexicon_to_json(&lexicon.tables)?)?;
    info!(path = %path.display(), entries = lexicon.tables.len(), "wrote lexicon");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MtError;
    use crate::pipeline::TranslationStats;
    use vader_intl::{LexiconProvider, load_lexicon_from_file};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vader-intl-mt-writer-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn french() -> TranslatedLexicon {
        let mut tables = LexiconTables::new();
        tables
            .with_negation("pas")
            .with_contrast("mais")
            .with_sentiment("bon", 1.9)
            .with_sentiment("abîmé", -1.2)
            .with_booster("très", 0.293);
        TranslatedLexicon {
            language: "fr".to_string(),
            tables,
            stats: TranslationStats::default(),
        }
    }

    #[test]
    fn test_lexicon_path() {
        assert_eq!(
            lexicon_path(Path::new("/out"), "pt-BR"),
            PathBuf::from("/out/lexicons/lexicon_pt-BR.json")
        );
    }

    #[test]
    fn test_json_keys_sorted() {
        let json = lexicon_to_json(&french().tables).unwrap();
        let abime = json.find("abîmé").unwrap();
        let bon = json.find("\"bon\"").unwrap();
        assert!(abime < bon);
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_write_then_load() {
        let dir = scratch_dir("roundtrip");
        let lexicon = french();

        let path = write_translated_lexicon(&dir, &lexicon).unwrap();
        assert!(path.ends_with("lexicons/lexicon_fr.json"));

        let loaded = load_lexicon_from_file(&path).unwrap();
        assert_eq!(loaded.tables(), &lexicon.tables);
        assert!(loaded.is_negation("pas"));
        assert_eq!(loaded.boost_value("très"), 0.293);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = scratch_dir("overwrite");
        let mut lexicon = french();
        write_translated_lexicon(&dir, &lexicon).unwrap();

        lexicon.tables.sentiments.insert("bon".to_string(), 2.0);
        let path = write_translated_lexicon(&dir, &lexicon).unwrap();

        assert_eq!(load_lexicon_from_file(&path).unwrap().sentiment("bon"), 2.0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_rejects_path_like_language() {
        let dir = scratch_dir("traversal");
        let mut lexicon = french();
        lexicon.language = "../fr".to_string();

        let result = write_translated_lexicon(&dir, &lexicon);
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
        assert!(!dir.exists());
    }
}
