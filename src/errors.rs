/*!
 * Error types for the subtran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with the DeepL API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider-side character quota is exhausted
    #[error("Provider character quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error with authentication
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Errors that can occur during subtitle parsing and serialization
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Structurally invalid SRT input
    #[error("Malformed subtitle at line {line}: {reason}")]
    Malformed {
        /// 1-based line number of the offending input line
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A timestamp with out-of-range fields or an inverted time range
    #[error("Invalid timestamp in cue {entry}: {reason}")]
    InvalidTimestamp {
        /// 1-based position of the offending cue
        entry: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Errors returned by the translation session's operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// No subtitle document has been loaded
    #[error("No subtitle document loaded")]
    NoDocument,

    /// The loaded document contains no translatable text
    #[error("The loaded document contains no translatable text")]
    EmptyDocument,

    /// No translation provider credential is configured
    #[error("No DeepL API key configured")]
    MissingCredential,

    /// No target language was supplied
    #[error("No target language specified")]
    MissingTargetLanguage,

    /// The document exceeds the configured character quota
    #[error("Document has {total_chars} characters, exceeding the quota of {limit}")]
    QuotaExceeded {
        /// Translatable characters in the document
        total_chars: u64,
        /// Configured character limit
        limit: u64,
    },

    /// Error from subtitle parsing or serialization
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the translation provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the translation session
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
