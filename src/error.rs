//! Error handling for the word-frequency pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordFreqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction error: {0}")]
    TextExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, WordFreqError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for WordFreqError {
    fn from(err: anyhow::Error) -> Self {
        WordFreqError::Processing(err.to_string())
    }
}

impl From<tokio::task::JoinError> for WordFreqError {
    fn from(err: tokio::task::JoinError) -> Self {
        WordFreqError::Processing(format!("Extraction task failed: {}", err))
    }
}
