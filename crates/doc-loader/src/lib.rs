//! Document loading for the docsuite pipeline.
//!
//! [`load`] turns a file path into a [`NormalizedDocument`]: the file's
//! content as one plain-text string plus word, character and (for PDF and
//! Word files) page or paragraph counts.
//!
//! Supported formats are detected by extension, case-insensitively:
//!
//! - `.txt` - read as UTF-8
//! - `.pdf` - text extracted page by page
//! - `.docx` - paragraph text
//!
//! Every failure is reported as a [`LoadError`]; malformed inputs never panic
//! through this API.
//!
//! # Example
//!
//! ```rust,no_run
//! use doc_loader::{load, LoadError};
//!
//! match load("reports/q3.pdf") {
//!     Ok(doc) => println!("{} words", doc.word_count()),
//!     Err(LoadError::NotFound(path)) => eprintln!("missing: {}", path.display()),
//!     Err(e) => eprintln!("skipping: {}", e),
//! }
//! ```

mod document;
mod error;
mod loader;

pub use document::{DocumentFormat, NormalizedDocument, StructuralCount};
pub use error::LoadError;
pub use loader::load;
