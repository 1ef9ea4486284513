use crate::{LexiconTables, StaticLexicon};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Prefix of translated lexicon file names, e.g. `lexicon_fr.json`
pub const LEXICON_FILE_PREFIX: &str = "lexicon_";

/// Load a lexicon from a single JSON file
///
/// The JSON file should have the following structure, where every table is
/// optional:
/// ```json
/// {
///     "negations": { "not": true },
///     "contrasts": { "but": true },
///     "sentiments": { "good": 1.9 },
///     "boosters": { "very": 0.293 }
/// }
/// ```
///
/// # Errors
/// - File not found
/// - Invalid JSON or a table with values of the wrong type
pub fn load_lexicon_from_file(path: &Path) -> Result<StaticLexicon, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;

    let tables: LexiconTables = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse lexicon from '{}': {}", path.display(), e))?;

    Ok(StaticLexicon::new(tables))
}

/// Extract the locale from a lexicon file name
///
/// `lexicon_fr.json` -> `fr`, `lexicon_zh-CN.json` -> `zh-CN`. Files without
/// the `lexicon_` prefix use their whole stem (`es.json` -> `es`).
pub fn locale_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let locale = stem.strip_prefix(LEXICON_FILE_PREFIX).unwrap_or(stem);
    if locale.is_empty() {
        return None;
    }
    Some(locale.to_string())
}

/// Load all lexicons from a directory of JSON files
///
/// Scans the directory for `*.json` files, keyed by the locale taken from the
/// file name (see [`locale_from_file_name`]).
///
/// # Errors
/// - Directory not found
/// - File read/parse errors
pub fn load_all_lexicons_from_dir(dir: &Path) -> Result<HashMap<String, StaticLexicon>, String> {
    if !dir.exists() {
        return Err(format!("Directory not found: {}", dir.display()));
    }

    if !dir.is_dir() {
        return Err(format!("Path is not a directory: {}", dir.display()));
    }

    let mut lexicons = HashMap::new();

    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory '{}': {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;

        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let locale = locale_from_file_name(&path)
            .ok_or_else(|| format!("Invalid filename: {}", path.display()))?;

        let lexicon = load_lexicon_from_file(&path)?;

        lexicons.insert(locale, lexicon);
    }

    Ok(lexicons)
}
