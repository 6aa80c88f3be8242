//! Error types for document loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a document.
///
/// All variants are recoverable: callers are expected to skip the document
/// and move on.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file exists at the given path.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The extension is not one of `.txt`, `.pdf`, `.docx`.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The file exists but could not be read or parsed.
    #[error("failed to read document: {0}")]
    ReadError(String),
}
