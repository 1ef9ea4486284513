//! Machine translation of VADER sentiment lexicons
//!
//! This crate turns an English lexicon into lexicons for other languages by
//! translating every word-like key with a machine translation provider, while
//! keeping the sentiment values untouched.
//!
//! # Workflow Example
//!
//! ```ignore
//! use std::{path::Path, sync::Arc};
//! use vader_intl::load_lexicon_from_file;
//! use vader_intl_mt::{
//!     GoogleTranslateProvider, LexiconTranslator, RateLimiter, write_translated_lexicon,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load the English source lexicon
//!     let source = load_lexicon_from_file(Path::new("vader_en.json"))?;
//!
//!     // 2. At most 10 translation requests in flight
//!     let provider = Arc::new(GoogleTranslateProvider::public()?);
//!     let translator = LexiconTranslator::new(provider, RateLimiter::new(10)?);
//!
//!     // 3. Translate and write lexicons/lexicon_fr.json
//!     let french = translator.translate_lexicon(source.tables(), "fr").await?;
//!     write_translated_lexicon(Path::new("."), &french)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod google_translate;
pub mod mock;
pub mod pipeline;
pub mod rate_limit;
pub mod translator;
pub mod writer;


pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use pipeline::{
    LexiconTranslator, SOURCE_LANGUAGE, TranslatedLexicon, TranslationStats, is_translatable_word,
};
pub use rate_limit::{RateLimiter, RateToken};
pub use translator::MachineTranslator;
pub use writer::{lexicon_path, write_translated_lexicon};
