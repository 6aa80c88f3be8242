//! Format dispatch and per-format text extraction.

use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::document::{DocumentFormat, NormalizedDocument, StructuralCount};
use crate::error::LoadError;

/// Load a document and normalize it to plain text.
///
/// Existence is checked before the extension, so a missing `.csv` file is
/// reported as [`LoadError::NotFound`].
pub fn load(path: impl AsRef<Path>) -> Result<NormalizedDocument, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let format = DocumentFormat::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_else(|| "(no extension)".to_string());
        LoadError::UnsupportedType(ext)
    })?;

    debug!("Loading {} as {}", path.display(), format.as_str());

    let (text, structural) = match format {
        DocumentFormat::Text => (read_text(path)?, None),
        DocumentFormat::Pdf => {
            let (text, pages) = extract_pdf(path)?;
            (text, Some(StructuralCount::Pages(pages)))
        }
        DocumentFormat::Docx => {
            let (text, paragraphs) = extract_docx(path)?;
            (text, Some(StructuralCount::Paragraphs(paragraphs)))
        }
    };

    let doc = NormalizedDocument::new(path, format, text, structural);

    info!(
        "Loaded {}: {} chars, {} words",
        doc.file_name(),
        doc.char_count(),
        doc.word_count()
    );

    Ok(doc)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|e| LoadError::ReadError(format!("{}: {}", path.display(), e)))
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes)
        .map_err(|e| LoadError::ReadError(format!("{} is not valid UTF-8: {}", path.display(), e)))
}

/// Extract text page by page, joined with newlines.
///
/// Wrapped in `catch_unwind`: pdf-extract can panic on malformed fonts.
fn extract_pdf(path: &Path) -> Result<(String, usize), LoadError> {
    let bytes = read_bytes(path)?;

    let pages = match catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            warn!("PDF extraction failed for {}: {}", path.display(), e);
            return Err(LoadError::ReadError(format!("PDF extraction failed: {}", e)));
        }
        Err(_) => {
            warn!("PDF extraction panicked for {}", path.display());
            return Err(LoadError::ReadError(
                "PDF extraction panicked (malformed file or font)".to_string(),
            ));
        }
    };

    let page_count = pages.len();
    Ok((pages.join("\n"), page_count))
}

/// Extract body paragraph text, one paragraph per line.
///
/// Every body paragraph counts, including empty ones; tables are skipped.
fn extract_docx(path: &Path) -> Result<(String, usize), LoadError> {
    let bytes = read_bytes(path)?;

    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| LoadError::ReadError(format!("DOCX parsing failed: {}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    let count = paragraphs.len();
    Ok((paragraphs.join("\n"), count))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut out),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run_text(run, &mut out);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for run_child in &run.children {
        if let docx_rs::RunChild::Text(text) = run_child {
            out.push_str(&text.text);
        }
    }
}
