//! Translation providers and lexicon language codes
//!
//! `MachineTranslator` is the seam between the lexicon pipeline and whatever
//! backend turns one English word into the target language: Google Translate,
//! the mock, or a test double.
//!
//! ```ignore
//! use vader_intl_mt::{GoogleTranslateProvider, MachineTranslator};
//!
//! let provider = GoogleTranslateProvider::public()?;
//! let word = provider.translate("good", "en", "fr").await?; // "bon"
//! ```

use crate::error::{MtError, MtResult};
use async_trait::async_trait;

/// Longest language code accepted for a lexicon run
const MAX_LANGUAGE_LEN: usize = 35;

/// Translates single lexicon words
///
/// Implementations are treated as untrusted by the lexicon pipeline: they may
/// return errors, stall, or panic, and the pipeline recovers from all three.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate `text` (one word or short phrase) from `source_locale` into
    /// `target_locale`
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Shown in logs
    fn provider_name(&self) -> &str;
}

/// Check a language code before it is used for a lexicon run
///
/// The code is sent to the provider and ends up in the output file name
/// (`lexicon_<lang>.json`), so it must start with an ASCII letter and contain
/// only ASCII letters, digits, `-` and `_`.
pub fn validate_language(language: &str) -> MtResult<()> {
    let Some(first) = language.chars().next() else {
        return Err(MtError::InvalidLocale("Language code is empty".to_string()));
    };

    if language.len() > MAX_LANGUAGE_LEN {
        return Err(MtError::InvalidLocale(format!(
            "Language code longer than {} characters: {}",
            MAX_LANGUAGE_LEN, language
        )));
    }

    if !first.is_ascii_alphabetic()
        || !language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in language code: {}",
            language
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_languages_accepted() {
        for language in ["fr", "es", "nl", "pt-BR", "zh-Hans", "de_DE", "fil"] {
            assert!(validate_language(language).is_ok(), "{}", language);
        }
    }

    #[test]
    fn test_file_name_hazards_rejected() {
        for language in ["", "../fr", "fr/..", "fr.json", "fr de", "-fr", "_fr", "1fr"] {
            assert!(validate_language(language).is_err(), "{:?}", language);
        }
    }

    #[test]
    fn test_overlong_language_rejected() {
        let language = "x".repeat(MAX_LANGUAGE_LEN + 1);
        match validate_language(&language) {
            Err(MtError::InvalidLocale(msg)) => assert!(msg.contains("longer than")),
            other => panic!("Expected InvalidLocale error, got {:?}", other),
        }
        assert!(validate_language(&"x".repeat(MAX_LANGUAGE_LEN)).is_ok());
    }

    #[test]
    fn test_error_names_the_code() {
        match validate_language("fr#bad") {
            Err(MtError::InvalidLocale(msg)) => {
                assert!(msg.contains("Invalid characters"));
                assert!(msg.contains("fr#bad"));
            }
            other => panic!("Expected InvalidLocale error, got {:?}", other),
        }
    }
}
