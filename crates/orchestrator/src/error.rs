//! Error types for request building and report writing.

use thiserror::Error;

/// Errors that can occur while persisting results.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the JSON payload failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while building a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The task received the wrong number of input documents.
    #[error("{task} expects {expected} document(s), got {got}")]
    WrongSegmentCount {
        task: &'static str,
        expected: String,
        got: usize,
    },
}
