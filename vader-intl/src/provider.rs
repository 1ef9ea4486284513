//! The lookup surface a sentiment scorer consumes.
//!
//! A `LexiconProvider` answers four questions about a single word: is it a
//! negation, is it a contrast marker, what is its sentiment valence and what
//! is its booster weight. Implementations range from a single in-memory
//! lexicon (`StaticLexicon`) to a fallback chain over several of them
//! (`ComposedLexicon`).

/// Word-level lexicon lookups used by a rule-based sentiment scorer
///
/// The four core operations are total: a word the provider knows nothing
/// about yields `false` or `0.0`. Because that conflates "absent" with an
/// explicit zero, the `*_entry` methods expose presence separately. The
/// default implementations derive presence from the value (nonzero means
/// present); providers that store entries explicitly should override them.
pub trait LexiconProvider: Send + Sync {
    /// Whether `text` negates the sentiment of what follows (e.g. "not")
    fn is_negation(&self, text: &str) -> bool;

    /// Whether `text` shifts emphasis to the following clause (e.g. "but")
    fn is_contrast(&self, text: &str) -> bool;

    /// Sentiment valence of `text`, `0.0` when unknown
    fn sentiment(&self, text: &str) -> f64;

    /// Booster weight of `text` (e.g. "very"), `0.0` when unknown
    fn boost_value(&self, text: &str) -> f64;

    /// Sentiment valence of `text`, or `None` when the provider has no entry
    fn sentiment_entry(&self, text: &str) -> Option<f64> {
        nonzero(self.sentiment(text))
    }

    /// Booster weight of `text`, or `None` when the provider has no entry
    fn boost_entry(&self, text: &str) -> Option<f64> {
        nonzero(self.boost_value(text))
    }
}

fn nonzero(value: f64) -> Option<f64> {
    if value != 0.0 { Some(value) } else { None }
}

impl<T: LexiconProvider + ?Sized> LexiconProvider for &T {
    fn is_negation(&self, text: &str) -> bool {
        (**self).is_negation(text)
    }

    fn is_contrast(&self, text: &str) -> bool {
        (**self).is_contrast(text)
    }

    fn sentiment(&self, text: &str) -> f64 {
        (**self).sentiment(text)
    }

    fn boost_value(&self, text: &str) -> f64 {
        (**self).boost_value(text)
    }

    fn sentiment_entry(&self, text: &str) -> Option<f64> {
        (**self).sentiment_entry(text)
    }

    fn boost_entry(&self, text: &str) -> Option<f64> {
        (**self).boost_entry(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl LexiconProvider for Fixed {
        fn is_negation(&self, _text: &str) -> bool {
            false
        }
        fn is_contrast(&self, _text: &str) -> bool {
            false
        }
        fn sentiment(&self, _text: &str) -> f64 {
            self.0
        }
        fn boost_value(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_default_entry_treats_zero_as_absent() {
        assert_eq!(Fixed(0.0).sentiment_entry("x"), None);
        assert_eq!(Fixed(0.0).boost_entry("x"), None);
    }

    #[test]
    fn test_default_entry_reports_nonzero() {
        assert_eq!(Fixed(-1.5).sentiment_entry("x"), Some(-1.5));
        assert_eq!(Fixed(0.25).boost_entry("x"), Some(0.25));
    }

    #[test]
    fn test_reference_forwards() {
        let fixed = Fixed(2.0);
        let by_ref: &dyn LexiconProvider = &fixed;
        assert_eq!((&by_ref).sentiment("x"), 2.0);
    }
}
