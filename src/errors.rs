/*!
 * Error types for the speecheval application.
 *
 * This module contains custom error types for the scoring core and the
 * command line layer, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Maximum number of characters of an offending payload kept in an error
const SNIPPET_CHARS: usize = 120;

/// Errors that can occur while evaluating a speech
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// The speech payload is not valid JSON after code-fence stripping
    #[error("Failed to parse speech payload: {message} (payload: {snippet})")]
    Parse {
        /// Parser error message
        message: String,
        /// Leading part of the offending payload
        snippet: String,
    },

    /// The payload parsed but has no `script` array
    #[error("Speech payload has no 'script' array (payload: {snippet})")]
    MissingScript {
        /// Leading part of the offending payload
        snippet: String,
    },

    /// A rubric violates one of its invariants
    #[error("Invalid rubric: {0}")]
    InvalidRubric(String),

    /// A batch evaluation task panicked or was cancelled
    #[error("Evaluation task aborted: {0}")]
    Aborted(String),
}

impl EvaluationError {
    /// Create a parse error, keeping only the head of the payload.
    pub fn parse(message: impl Into<String>, payload: &str) -> Self {
        Self::Parse {
            message: message.into(),
            snippet: snippet(payload),
        }
    }

    /// Create a missing-script error, keeping only the head of the payload.
    pub fn missing_script(payload: &str) -> Self {
        Self::MissingScript {
            snippet: snippet(payload),
        }
    }

    /// Whether this error comes from a malformed speech payload.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::MissingScript { .. })
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file or its values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from an evaluation run
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

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

/// Truncate a payload to a short, single-line snippet for error messages.
pub fn snippet(payload: &str) -> String {
    let flattened: String = payload
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if flattened.chars().count() <= SNIPPET_CHARS {
        return flattened;
    }

    let head: String = flattened.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", head)
}
