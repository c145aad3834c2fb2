//! Error types for healthscreen
//!
//! Load-time and structural failures are fatal to the operation that hit them;
//! transport and input failures are recovered by the caller.

use thiserror::Error;

/// Main error type for the screener
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// Rule table or fitted model missing, unreadable, or malformed
    #[error("Failed to load {what} from {path}: {reason}")]
    Load {
        what: &'static str,
        path: String,
        reason: String,
    },

    /// Training data structurally invalid
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Tabular file cannot be read as rows and columns
    #[error("Format error: {0}")]
    Format(String),

    /// Hospital API unreachable or returned something unusable
    #[error("Transport error: {0}")]
    Transport(String),

    /// Answer outside the accepted set
    #[error("Invalid answer '{0}': expected yes or no")]
    InputValidation(String),

    /// Input stream ended before every question was answered
    #[error("Input closed after {answered} of {total} questions")]
    InputClosed { answered: usize, total: usize },

    /// Scoring requested for an answer set missing catalog questions
    #[error("Answer set incomplete, missing: {}", missing.join(", "))]
    IncompleteAnswers { missing: Vec<String> },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScreenerError {
    pub(crate) fn load(what: &'static str, path: impl Into<String>, reason: impl ToString) -> Self {
        ScreenerError::Load {
            what,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<csv::Error> for ScreenerError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => ScreenerError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                err.to_string(),
            )),
            _ => ScreenerError::Format(err.to_string()),
        }
    }
}

/// Result type alias for screener operations
pub type Result<T> = std::result::Result<T, ScreenerError>;
