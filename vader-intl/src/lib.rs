use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod compose;
pub mod loader;
pub mod provider;

pub use compose::{ComposedLexicon, compose_lexicons};
pub use loader::{load_all_lexicons_from_dir, load_lexicon_from_file};
pub use provider::LexiconProvider;

/// The four word-keyed tables that make up a VADER lexicon
///
/// The same shape is used for the English source lexicon and for every
/// translated lexicon produced from it. Serialized as:
///
/// ```json
/// {
///     "negations": { "not": true },
///     "contrasts": { "but": true },
///     "sentiments": { "good": 1.9 },
///     "boosters": { "very": 0.293 }
/// }
/// ```
///
/// Missing tables deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconTables {
    pub negations: HashMap<String, bool>,
    pub contrasts: HashMap<String, bool>,
    pub sentiments: HashMap<String, f64>,
    pub boosters: HashMap<String, f64>,
}

impl LexiconTables {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_negation(&mut self, word: &str) -> &mut Self {
        self.negations.insert(word.to_owned(), true);
        self
    }
    pub fn with_contrast(&mut self, word: &str) -> &mut Self {
        self.contrasts.insert(word.to_owned(), true);
        self
    }
    pub fn with_sentiment(&mut self, word: &str, valence: f64) -> &mut Self {
        self.sentiments.insert(word.to_owned(), valence);
        self
    }
    pub fn with_booster(&mut self, word: &str, weight: f64) -> &mut Self {
        self.boosters.insert(word.to_owned(), weight);
        self
    }

    /// Total number of entries across the four tables
    pub fn len(&self) -> usize {
        self.negations.len() + self.contrasts.len() + self.sentiments.len() + self.boosters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An immutable lexicon backed by one set of tables
///
/// This is the explicit, constructor-injected replacement for process-wide
/// lexicon tables: build one per language and hand references to a
/// `ComposedLexicon` or directly to a scorer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLexicon {
    tables: LexiconTables,
}

impl StaticLexicon {
    pub fn new(tables: LexiconTables) -> Self {
        StaticLexicon { tables }
    }
    pub fn tables(&self) -> &LexiconTables {
        &self.tables
    }
}

impl From<LexiconTables> for StaticLexicon {
    fn from(tables: LexiconTables) -> Self {
        StaticLexicon::new(tables)
    }
}

impl LexiconProvider for StaticLexicon {
    fn is_negation(&self, text: &str) -> bool {
        self.tables.negations.get(text).copied().unwrap_or(false)
    }

    fn is_contrast(&self, text: &str) -> bool {
        self.tables.contrasts.get(text).copied().unwrap_or(false)
    }

    fn sentiment(&self, text: &str) -> f64 {
        self.tables.sentiments.get(text).copied().unwrap_or(0.0)
    }

    fn boost_value(&self, text: &str) -> f64 {
        self.tables.boosters.get(text).copied().unwrap_or(0.0)
    }

    fn sentiment_entry(&self, text: &str) -> Option<f64> {
        self.tables.sentiments.get(text).copied()
    }

    fn boost_entry(&self, text: &str) -> Option<f64> {
        self.tables.boosters.get(text).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> StaticLexicon {
        let mut tables = LexiconTables::new();
        tables
            .with_negation("not")
            .with_contrast("but")
            .with_sentiment("good", 1.9)
            .with_sentiment("meh", 0.0)
            .with_booster("very", 0.293);
        StaticLexicon::new(tables)
    }

    #[test]
    fn test_static_lookups() {
        let lexicon = english();
        assert!(lexicon.is_negation("not"));
        assert!(!lexicon.is_negation("but"));
        assert!(lexicon.is_contrast("but"));
        assert_eq!(lexicon.sentiment("good"), 1.9);
        assert_eq!(lexicon.boost_value("very"), 0.293);
    }

    #[test]
    fn test_unknown_word_defaults() {
        let lexicon = english();
        assert!(!lexicon.is_negation("unknown"));
        assert!(!lexicon.is_contrast("unknown"));
        assert_eq!(lexicon.sentiment("unknown"), 0.0);
        assert_eq!(lexicon.boost_value("unknown"), 0.0);
    }

    #[test]
    fn test_explicit_zero_is_present() {
        let lexicon = english();
        assert_eq!(lexicon.sentiment("meh"), 0.0);
        assert_eq!(lexicon.sentiment_entry("meh"), Some(0.0));
        assert_eq!(lexicon.sentiment_entry("unknown"), None);
        assert_eq!(lexicon.boost_entry("very"), Some(0.293));
    }

    #[test]
    fn test_false_membership_is_not_negation() {
        let mut tables = LexiconTables::new();
        tables.negations.insert("maybe".to_string(), false);
        let lexicon = StaticLexicon::from(tables);
        assert!(!lexicon.is_negation("maybe"));
    }

    #[test]
    fn test_len_counts_all_tables() {
        assert_eq!(english().tables().len(), 5);
        assert!(LexiconTables::new().is_empty());
    }

    #[test]
    fn test_missing_tables_deserialize_empty() {
        let tables: LexiconTables =
            serde_json::from_str(r#"{ "sentiments": { "good": 1.9 } }"#).unwrap();
        assert_eq!(tables.sentiments.len(), 1);
        assert!(tables.negations.is_empty());
        assert!(tables.boosters.is_empty());
    }
}
