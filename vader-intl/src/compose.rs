//! Fallback chains over several lexicons.
//!
//! A translated lexicon rarely covers everything: emoticons, slang and
//! untranslatable idioms stay in the base English lexicon. `ComposedLexicon`
//! layers lexicons so a lookup falls through them in priority order.

use crate::provider::LexiconProvider;

/// An ordered, read-only fallback chain of lexicon providers
///
/// Index 0 has the highest priority. The chain borrows its providers and is
/// never mutated after construction, so it can be shared across threads
/// without locking.
pub struct ComposedLexicon<'a> {
    inner: Vec<&'a dyn LexiconProvider>,
}

/// Combine several lexicons into one, checking each in turn on lookup
pub fn compose_lexicons<'a>(
    lexicons: impl IntoIterator<Item = &'a dyn LexiconProvider>,
) -> ComposedLexicon<'a> {
    ComposedLexicon {
        inner: lexicons.into_iter().collect(),
    }
}

impl<'a> ComposedLexicon<'a> {
    pub fn new(lexicons: &[&'a dyn LexiconProvider]) -> Self {
        ComposedLexicon {
            inner: lexicons.to_vec(),
        }
    }

    /// Number of providers in the chain
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for ComposedLexicon<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedLexicon")
            .field("providers", &self.inner.len())
            .finish()
    }
}

impl LexiconProvider for ComposedLexicon<'_> {
    fn is_negation(&self, text: &str) -> bool {
        self.inner.iter().any(|lexicon| lexicon.is_negation(text))
    }

    fn is_contrast(&self, text: &str) -> bool {
        self.inner.iter().any(|lexicon| lexicon.is_contrast(text))
    }

    /// First nonzero valence in priority order
    fn sentiment(&self, text: &str) -> f64 {
        self.inner
            .iter()
            .map(|lexicon| lexicon.sentiment(text))
            .find(|&valence| valence != 0.0)
            .unwrap_or(0.0)
    }

    /// First nonzero booster weight in priority order
    fn boost_value(&self, text: &str) -> f64 {
        self.inner
            .iter()
            .map(|lexicon| lexicon.boost_value(text))
            .find(|&weight| weight != 0.0)
            .unwrap_or(0.0)
    }

    // Presence-aware: an explicit zero in a higher-priority lexicon shadows
    // lower ones.
    fn sentiment_entry(&self, text: &str) -> Option<f64> {
        self.inner
            .iter()
            .find_map(|lexicon| lexicon.sentiment_entry(text))
    }

    fn boost_entry(&self, text: &str) -> Option<f64> {
        self.inner.iter().find_map(|lexicon| lexicon.boost_entry(text))
    }
}
