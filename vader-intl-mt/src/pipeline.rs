//! Concurrent translation of lexicon tables
//!
//! Every translatable key of a table becomes one task on the tokio runtime.
//! A task is only spawned once a token has been taken from the shared
//! [`RateLimiter`], so at most `capacity` translator calls are in flight no
//! matter how many tables or languages are being processed.
//!
//! # Failure handling
//!
//! The translator is untrusted. Each call runs inside a fault boundary that
//! turns both outcomes below into the same identity fallback, where the
//! source word is kept with its value:
//!
//! - **failure**: the translator returned an error
//! - **abort**: the translator panicked
//!
//! Neither stops the batch. The token is held by the task and returned on drop,
//! so it comes back exactly once whatever happens inside the task.
//!
//! # Collisions
//!
//! Two source words can translate to the same text ("glad" and "happy" both
//! becoming "content"). The output keeps the entry whose *source* word sorts
//! first, independent of task completion order, and counts the collision.

use crate::error::{MtError, MtResult};
use crate::rate_limit::RateLimiter;
use crate::translator::{MachineTranslator, validate_language};
use futures::FutureExt;
use regex::Regex;
use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use vader_intl::LexiconTables;

/// Language every source lexicon is written in
pub const SOURCE_LANGUAGE: &str = "en";

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Zà-üÀ-Ü\-' ]+$").unwrap());

/// Whether a lexicon key is a word worth sending to a translator
///
/// Only letters (ASCII and the Latin-1 accented ranges `à-ü`, `À-Ü`), digits,
/// hyphens, apostrophes and spaces qualify. Emoticons such as `:-)` or `<3`
/// and other symbol keys are kept as they are.
pub fn is_translatable_word(word: &str) -> bool {
    WORD_PATTERN.is_match(word)
}

/// Per-table (or aggregated) counts of what happened to each key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Keys replaced by their translation
    pub translated: usize,
    /// Keys kept because the translator returned an error
    pub failed: usize,
    /// Keys kept because the translator panicked
    pub aborted: usize,
    /// Keys never sent because they are not translatable words
    pub skipped: usize,
    /// Entries dropped because another entry landed on the same key
    pub collisions: usize,
}

impl TranslationStats {
    pub fn merge(&mut self, other: TranslationStats) {
        self.translated += other.translated;
        self.failed += other.failed;
        self.aborted += other.aborted;
        self.skipped += other.skipped;
        self.collisions += other.collisions;
    }

    /// Number of keys that were processed
    pub fn total(&self) -> usize {
        self.translated + self.failed + self.aborted + self.skipped
    }
}

/// A lexicon translated into one target language
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedLexicon {
    pub language: String,
    pub tables: LexiconTables,
    pub stats: TranslationStats,
}

enum Outcome {
    Translated(String),
    Failed(MtError),
    Aborted(String),
}

/// Output table shared by the tasks of one run
struct MergedTable<V> {
    // translated key -> (source word, value)
    entries: HashMap<String, (String, V)>,
    collisions: usize,
}

impl<V> MergedTable<V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            collisions: 0,
        }
    }

    /// Insert an entry, returning the source word that lost if the key was taken
    fn insert(&mut self, key: String, source: String, value: V) -> Option<String> {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert((source, value));
                None
            }
            Entry::Occupied(mut slot) => {
                self.collisions += 1;
                if source < slot.get().0 {
                    let (loser, _) = slot.insert((source, value));
                    Some(loser)
                } else {
                    Some(source)
                }
            }
        }
    }

    fn into_parts(self) -> (HashMap<String, V>, usize) {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, (_, value))| (key, value))
            .collect();
        (entries, self.collisions)
    }
}

fn merge_entry<V>(output: &Mutex<MergedTable<V>>, key: String, source: String, value: V) {
    let lost = {
        let mut table = output.lock().unwrap_or_else(PoisonError::into_inner);
        table.insert(key.clone(), source, value)
    };
    if let Some(lost) = lost {
        warn!(key = %key, dropped = %lost, "translated key collision");
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "translator panicked".to_string()
    }
}

/// Call the translator, converting errors and panics into an `Outcome`
async fn guarded_translate(translator: &dyn MachineTranslator, word: &str, target: &str) -> Outcome {
    let call = async { translator.translate(word, SOURCE_LANGUAGE, target).await };

    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(translated)) => {
            let translated = translated.trim();
            if translated.is_empty() {
                Outcome::Failed(MtError::TranslationError(
                    "Provider returned an empty translation".to_string(),
                ))
            } else {
                Outcome::Translated(translated.to_string())
            }
        }
        Ok(Err(err)) => Outcome::Failed(err),
        Err(payload) => Outcome::Aborted(panic_message(payload)),
    }
}

/// Translates lexicon tables with bounded concurrency
///
/// Cheap to clone: the translator is shared and clones of the limiter share
/// one token store.
#[derive(Clone)]
pub struct LexiconTranslator {
    translator: Arc<dyn MachineTranslator>,
    limiter: RateLimiter,
}

impl LexiconTranslator {
    pub fn new(translator: Arc<dyn MachineTranslator>, limiter: RateLimiter) -> Self {
        Self {
            translator,
            limiter,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn provider_name(&self) -> &str {
        self.translator.provider_name()
    }

    /// Translate the keys of one table into `target_locale`
    ///
    /// Values are never changed. Keys that are not translatable words, or
    /// whose translation fails or panics, are kept as they are. Returns only
    /// once every spawned task has finished.
    ///
    /// # Errors
    ///
    /// `InvalidLocale` if `target_locale` is empty or malformed; nothing is
    /// dispatched in that case.
    pub async fn translate_table<V>(
        &self,
        source: &HashMap<String, V>,
        target_locale: &str,
    ) -> MtResult<(HashMap<String, V>, TranslationStats)>
    where
        V: Copy + Send + 'static,
    {
        validate_language(target_locale)?;

        let output = Arc::new(Mutex::new(MergedTable::with_capacity(source.len())));
        let mut stats = TranslationStats::default();
        let mut tasks = JoinSet::new();

        for (word, &value) in source {
            if !is_translatable_word(word) {
                stats.skipped += 1;
                merge_entry(&output, word.clone(), word.clone(), value);
                continue;
            }

            let token = self.limiter.acquire().await;
            let translator = Arc::clone(&self.translator);
            let output = Arc::clone(&output);
            let target = target_locale.to_string();
            let word = word.clone();

            tasks.spawn(async move {
                let _token = token;
                let outcome = guarded_translate(translator.as_ref(), &word, &target).await;
                let key = match &outcome {
                    Outcome::Translated(translated) => {
                        debug!(word = %word, translated = %translated, "translated");
                        translated.clone()
                    }
                    Outcome::Failed(err) => {
                        debug!(word = %word, error = %err, "translation failed, keeping source word");
                        word.clone()
                    }
                    Outcome::Aborted(reason) => {
                        warn!(word = %word, reason = %reason, "translator panicked, keeping source word");
                        word.clone()
                    }
                };
                merge_entry(&output, key, word, value);
                outcome
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Outcome::Translated(_)) => stats.translated += 1,
                Ok(Outcome::Failed(_)) => stats.failed += 1,
                Ok(Outcome::Aborted(_)) => stats.aborted += 1,
                Err(err) => {
                    warn!(error = %err, "translation task did not complete");
                    stats.aborted += 1;
                }
            }
        }

        let table = std::mem::replace(
            &mut *output.lock().unwrap_or_else(PoisonError::into_inner),
            MergedTable::with_capacity(0),
        );
        let (entries, collisions) = table.into_parts();
        stats.collisions = collisions;

        Ok((entries, stats))
    }

    /// Translate all four tables of a lexicon into `target_locale`
    ///
    /// The tables are processed concurrently and share this translator's
    /// limiter.
    pub async fn translate_lexicon(
        &self,
        source: &LexiconTables,
        target_locale: &str,
    ) -> MtResult<TranslatedLexicon> {
        info!(
            target_locale,
            provider = self.provider_name(),
            entries = source.len(),
            "translating lexicon"
        );

        let (
            (negations, negation_stats),
            (contrasts, contrast_stats),
            (sentiments, sentiment_stats),
            (boosters, booster_stats),
        ) = tokio::try_join!(
            self.translate_table(&source.negations, target_locale),
            self.translate_table(&source.contrasts, target_locale),
            self.translate_table(&source.sentiments, target_locale),
            self.translate_table(&source.boosters, target_locale),
        )?;

        let mut stats = TranslationStats::default();
        for table_stats in [negation_stats, contrast_stats, sentiment_stats, booster_stats] {
            stats.merge(table_stats);
        }

        info!(
            target_locale,
            translated = stats.translated,
            failed = stats.failed,
            aborted = stats.aborted,
            skipped = stats.skipped,
            collisions = stats.collisions,
            "lexicon translated"
        );

        Ok(TranslatedLexicon {
            language: target_locale.to_string(),
            tables: LexiconTables {
                negations,
                contrasts,
                sentiments,
                boosters,
            },
            stats,
        })
    }
}

impl std::fmt::Debug for LexiconTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconTranslator")
            .field("provider", &self.translator.provider_name())
            .field("limiter", &self.limiter)
            .finish()
    }
}
