//! The normalized document produced by the loader.

use std::path::{Path, PathBuf};

/// Source formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Page count for PDFs, paragraph count for Word documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralCount {
    Pages(usize),
    Paragraphs(usize),
}

impl StructuralCount {
    pub fn count(&self) -> usize {
        match self {
            Self::Pages(n) | Self::Paragraphs(n) => *n,
        }
    }
}

/// A document's content reduced to plain text, plus basic metrics.
///
/// Immutable once built; the metrics are computed from `text` at
/// construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    source_path: PathBuf,
    format: DocumentFormat,
    text: String,
    word_count: usize,
    char_count: usize,
    structural_count: Option<StructuralCount>,
}

impl NormalizedDocument {
    pub fn new(
        source_path: impl Into<PathBuf>,
        format: DocumentFormat,
        text: String,
        structural_count: Option<StructuralCount>,
    ) -> Self {
        let word_count = text.split_whitespace().count();
        let char_count = text.chars().count();
        Self {
            source_path: source_path.into(),
            format,
            text,
            word_count,
            char_count,
            structural_count,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// File name of the source, or the full path if it has none.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the document, keeping only its text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of characters (Unicode scalar values).
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn structural_count(&self) -> Option<StructuralCount> {
        self.structural_count
    }

    pub fn page_count(&self) -> Option<usize> {
        match self.structural_count {
            Some(StructuralCount::Pages(n)) => Some(n),
            _ => None,
        }
    }

    pub fn paragraph_count(&self) -> Option<usize> {
        match self.structural_count {
            Some(StructuralCount::Paragraphs(n)) => Some(n),
            _ => None,
        }
    }

    /// The first `max_chars` characters, with "..." appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.char_count <= max_chars {
            return self.text.clone();
        }
        let mut preview: String = self.text.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/Report.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.Txt")),
            Some(DocumentFormat::Text)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("memo.docx")),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("data.csv")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_metrics_computed_from_text() {
        let doc = NormalizedDocument::new(
            "x.txt",
            DocumentFormat::Text,
            "  héllo   wörld\n\tagain ".to_string(),
            None,
        );
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.char_count(), 23);
        assert_eq!(doc.structural_count(), None);
        assert_eq!(doc.file_name(), "x.txt");
    }

    #[test]
    fn test_preview() {
        let doc = NormalizedDocument::new("x.txt", DocumentFormat::Text, "abcdef".into(), None);
        assert_eq!(doc.preview(10), "abcdef");
        assert_eq!(doc.preview(3), "abc...");
    }

    #[test]
    fn test_structural_accessors() {
        let doc = NormalizedDocument::new(
            "x.pdf",
            DocumentFormat::Pdf,
            String::new(),
            Some(StructuralCount::Pages(4)),
        );
        assert_eq!(doc.page_count(), Some(4));
        assert_eq!(doc.paragraph_count(), None);
        assert_eq!(doc.structural_count().map(|s| s.count()), Some(4));
    }
}
