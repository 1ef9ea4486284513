/// Error types for lexicon machine translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Invalid or missing configuration (API key, concurrency, ...)
    ConfigError(String),
    /// A locale code that cannot be sent to a provider
    InvalidLocale(String),
    /// Transport failure talking to a provider
    NetworkError(String),
    /// The provider answered but produced no usable translation
    TranslationError(String),
    /// Filesystem error while writing or reading lexicons
    IoError(String),
    /// Lexicon (de)serialization failure
    SerializationError(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            MtError::IoError(msg) => write!(f, "I/O error: {}", msg),
            MtError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            MtError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

impl From<std::io::Error> for MtError {
    fn from(err: std::io::Error) -> Self {
        MtError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for MtError {
    fn from(err: serde_json::Error) -> Self {
        MtError::SerializationError(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            MtError::TranslationError("quota".to_string()).to_string(),
            "Translation error: quota"
        );
        assert_eq!(MtError::Other("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_from_io_error() {
        let err: MtError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, MtError::IoError(msg) if msg.contains("gone")));
    }
}
