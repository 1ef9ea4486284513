//! Google Translate provider for machine translation
//!
//! Two endpoints are supported:
//!
//! - **Cloud Translation v2**, authenticated with the API key from the
//!   `GOOGLE_TRANSLATE_API_KEY` environment variable. Obtain a key from
//!   https://console.cloud.google.com/
//! - **Public web endpoint** (`client=gtx`), keyless and unmetered but
//!   rate-limited and prone to sporadic failures. Good enough for one-word
//!   lexicon entries, which is all this crate sends.
//!
//! # Example
//!
//! ```ignore
//! use vader_intl_mt::{MachineTranslator, GoogleTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()
//!         .or_else(|_| GoogleTranslateProvider::public())?;
//!     let result = provider.translate("happy", "en", "fr").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::{MachineTranslator, validate_language};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

const CLOUD_V2_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const PUBLIC_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Clone)]
enum Endpoint {
    CloudV2 { api_key: String },
    Public,
}

/// Google Translate provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    endpoint: Endpoint,
    /// HTTP client for async requests
    client: reqwest::Client,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a provider for the Cloud Translation v2 API with an explicit key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If API key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        Ok(Self {
            endpoint: Endpoint::CloudV2 { api_key },
            client: Self::build_client()?,
        })
    }

    /// Create a Cloud v2 provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            MtError::ConfigError(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }

    /// Create a provider for the keyless public endpoint
    pub fn public() -> MtResult<Self> {
        Ok(Self {
            endpoint: Endpoint::Public,
            client: Self::build_client()?,
        })
    }

    /// Whether this provider authenticates with an API key
    pub fn is_authenticated(&self) -> bool {
        matches!(self.endpoint, Endpoint::CloudV2 { .. })
    }

    fn build_client() -> MtResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))
    }

    async fn translate_cloud(
        &self,
        api_key: &str,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let url = format!("{}?key={}", CLOUD_V2_URL, api_key);

        let body = json!({
            "q": [text],
            "source": primary_language(source_locale),
            "target": primary_language(target_locale),
            "format": "text"
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let json = Self::read_json(response).await?;
        parse_cloud_response(&json)
    }

    async fn translate_public(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let source = primary_language(source_locale);
        let target = primary_language(target_locale);
        let url = reqwest::Url::parse_with_params(
            PUBLIC_URL,
            &[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| MtError::ConfigError(format!("Invalid request URL: {}", e)))?;

        let response = self.client.get(url).send().await?;
        let json = Self::read_json(response).await?;
        parse_public_response(&json)
    }

    /// Check the HTTP status and decode the body as JSON
    async fn read_json(response: reqwest::Response) -> MtResult<Value> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                MtError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                MtError::TranslationError(format!("API server error ({}): {}", status, error_text))
            });
        }

        response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })
    }
}

/// Google expects bare language subtags: `pt-BR` and `de_DE` go out as `pt`
/// and `de`
fn primary_language(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or(language)
        .to_lowercase()
}

/// Extract the translation from a Cloud v2 response
///
/// `{"data": {"translations": [{"translatedText": "..."}]}}`
fn parse_cloud_response(json: &Value) -> MtResult<String> {
    let translations = json["data"]["translations"].as_array().ok_or_else(|| {
        MtError::TranslationError(
            "Invalid API response: missing 'data.translations' array".to_string(),
        )
    })?;

    translations
        .first()
        .and_then(|t| t["translatedText"].as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            MtError::TranslationError(
                "Invalid API response: missing 'translatedText' field".to_string(),
            )
        })
}

/// Extract the translation from a public endpoint response
///
/// The body is a positional array whose first element holds one
/// `[translated, original, ...]` segment per sentence:
/// `[[["bonjour","hello",null,null,10]],null,"en", ...]`
fn parse_public_response(json: &Value) -> MtResult<String> {
    let segments = json[0].as_array().ok_or_else(|| {
        MtError::TranslationError("Invalid API response: missing segment array".to_string())
    })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment[0].as_str())
        .collect();

    if translated.is_empty() {
        return Err(MtError::TranslationError(
            "Invalid API response: no translated segments".to_string(),
        ));
    }

    Ok(translated)
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let endpoint = match &self.endpoint {
            Endpoint::CloudV2 { .. } => "cloud-v2",
            Endpoint::Public => "public",
        };
        f.debug_struct("GoogleTranslateProvider")
            .field("endpoint", &endpoint)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_language(source_locale)?;
        validate_language(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.len() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        debug!(text, source_locale, target_locale, "requesting translation");

        match &self.endpoint {
            Endpoint::CloudV2 { api_key } => {
                self.translate_cloud(api_key, text, source_locale, target_locale)
                    .await
            }
            Endpoint::Public => {
                self.translate_public(text, source_locale, target_locale)
                    .await
            }
        }
    }

    fn provider_name(&self) -> &str {
        match self.endpoint {
            Endpoint::CloudV2 { .. } => "Google Translate",
            Endpoint::Public => "Google Translate (public)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_valid_key() {
        let provider = GoogleTranslateProvider::new("test-api-key".to_string()).unwrap();
        assert_eq!(provider.provider_name(), "Google Translate");
        assert!(provider.is_authenticated());
    }

    #[test]
    fn test_new_with_empty_key() {
        match GoogleTranslateProvider::new("".to_string()) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(GoogleTranslateProvider::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_public_provider() {
        let provider = GoogleTranslateProvider::public().unwrap();
        assert!(!provider.is_authenticated());
        assert_eq!(provider.provider_name(), "Google Translate (public)");
    }

    // ========== Response Parsing Tests ==========

    #[test]
    fn test_parse_cloud_response() {
        let json = json!({
            "data": { "translations": [{ "translatedText": "heureux" }] }
        });
        assert_eq!(parse_cloud_response(&json).unwrap(), "heureux");
    }

    #[test]
    fn test_parse_cloud_response_missing_translations() {
        let json = json!({ "error": { "code": 403 } });
        match parse_cloud_response(&json) {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("data.translations")),
            _ => panic!("Expected TranslationError"),
        }
    }

    #[test]
    fn test_parse_cloud_response_empty_translations() {
        let json = json!({ "data": { "translations": [] } });
        assert!(parse_cloud_response(&json).is_err());
    }

    #[test]
    fn test_parse_public_response() {
        let json = json!([[["heureux", "happy", null, null, 10]], null, "en"]);
        assert_eq!(parse_public_response(&json).unwrap(), "heureux");
    }

    #[test]
    fn test_parse_public_response_joins_segments() {
        let json = json!([[["pas ", "not ", null, null, 3], ["mal", "bad", null, null, 3]], null, "en"]);
        assert_eq!(parse_public_response(&json).unwrap(), "pas mal");
    }

    #[test]
    fn test_parse_public_response_malformed() {
        assert!(parse_public_response(&json!({})).is_err());
        assert!(parse_public_response(&json!([[]])).is_err());
    }

    #[test]
    fn test_primary_language_strips_subtags() {
        assert_eq!(primary_language("fr"), "fr");
        assert_eq!(primary_language("pt-BR"), "pt");
        assert_eq!(primary_language("de_DE"), "de");
        assert_eq!(primary_language("zh-Hans"), "zh");
        assert_eq!(primary_language("NL"), "nl");
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("", "en", "fr").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_invalid_target_locale() {
        let provider = GoogleTranslateProvider::public().unwrap();
        let result = provider.translate("hello", "en", "invalid#code").await;
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        match provider.translate(&long_text, "en", "fr").await {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected TranslationError"),
        }
    }

    #[test]
    fn test_debug_output() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    // ========== Integration Tests (require network) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_single_translation() {
        if std::env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
            eprintln!("Skipping: GOOGLE_TRANSLATE_API_KEY not set");
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let result = provider.translate("happy", "en", "fr").await.unwrap();
        println!("Translation: happy → {}", result);
        assert!(!result.is_empty());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_public_endpoint_single_translation() {
        let provider = GoogleTranslateProvider::public().unwrap();
        let result = provider.translate("good", "en", "es").await.unwrap();
        println!("Translation: good → {}", result);
        assert!(!result.is_empty());
    }
}
