use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Feed parsing error: {message}")]
    FeedParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Translation error: {message}")]
    TranslationError { message: String },
}

impl DigestError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DigestError::HttpError(_) => "Check network connectivity and the feed URL",
            DigestError::FeedParseError { .. } => {
                "Make sure the URL points to a valid RSS or Atom feed"
            }
            DigestError::IoError(_) => "Check that the output directory is writable",
            DigestError::SerializationError(_) => "Check the JSON resource for syntax errors",
            DigestError::ConfigError { .. } | DigestError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            DigestError::InvalidDateRange { .. } => "Pass --start on or before --end",
            DigestError::TranslationError { .. } => "Translation failures fall back to source text",
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
