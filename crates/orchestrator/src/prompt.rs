//! Truncation and request construction.

use brain_core::CompletionRequest;
use doc_loader::NormalizedDocument;

use crate::error::PromptError;
use crate::task::{Arity, Task};

/// A labelled input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Name shown to the model for multi-document tasks.
    pub label: String,
    pub text: String,
}

impl Segment {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Label a loaded document by its file name.
    pub fn from_document(doc: &NormalizedDocument) -> Self {
        Self::new(doc.file_name(), doc.text())
    }
}

impl From<NormalizedDocument> for Segment {
    fn from(doc: NormalizedDocument) -> Self {
        let label = doc.file_name();
        Self::new(label, doc.into_text())
    }
}

/// Keep the first `ceiling` characters of `text`.
///
/// A hard head cut: no attempt is made to end on a word or sentence.
pub fn truncate(text: &str, ceiling: usize) -> &str {
    match text.char_indices().nth(ceiling) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the request for `task`, truncating every segment independently.
///
/// Fails without building anything when the segment count does not fit the
/// task.
pub fn build_request(task: Task, segments: &[Segment]) -> Result<CompletionRequest, PromptError> {
    if !task.arity().accepts(segments.len()) {
        return Err(PromptError::WrongSegmentCount {
            task: task.as_str(),
            expected: describe_arity(task.arity()),
            got: segments.len(),
        });
    }

    let spec = task.spec();
    let truncated: Vec<(&str, &str)> = segments
        .iter()
        .map(|s| (s.label.as_str(), truncate(&s.text, spec.ceiling)))
        .collect();

    Ok(CompletionRequest::new(
        spec.system,
        task.render(&truncated),
        spec.temperature,
        spec.max_tokens,
    ))
}

fn describe_arity(arity: Arity) -> String {
    match arity {
        Arity::Exactly(n) => format!("exactly {}", n),
        Arity::AtLeast(n) => format!("at least {}", n),
    }
}
