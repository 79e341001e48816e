#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Plain-text conversion of situation-report documents.
//!
//! Reports are published as PDFs. This crate turns one file into the text
//! the extraction engine consumes, using pure-Rust text extraction
//! ([`pdf_extract`]). Pre-converted `.txt` files are read verbatim so that
//! corpora converted elsewhere (and test fixtures) go through the same
//! entry point.

use std::path::Path;

/// PDFs yielding fewer non-whitespace characters than this are treated as
/// scanned images.
pub const MIN_TEXT_CHARS: usize = 30;

/// Errors specific to document conversion.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF text extraction failed or panicked.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// The file extension is not a supported document type.
    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    /// The PDF has no extractable text (likely an image-only scan).
    #[error("No extractable text ({chars} characters)")]
    NoText {
        /// Non-whitespace characters that were found.
        chars: usize,
    },
}

/// Converts the document at `path` to plain text.
///
/// # Errors
///
/// * [`PdfError::Io`] if the file cannot be read
/// * [`PdfError::Unsupported`] for extensions other than `pdf` and `txt`
/// * [`PdfError::Extraction`] if the PDF library fails or panics
/// * [`PdfError::NoText`] if a PDF has almost no text
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => {
            let bytes = std::fs::read(path)?;
            log::debug!("Read {} bytes from {}", bytes.len(), path.display());
            extract_pdf_text(&bytes)
        }
        "txt" => Ok(std::fs::read_to_string(path)?),
        _ => Err(PdfError::Unsupported(path.display().to_string())),
    }
}

/// Extracts the text layer from in-memory PDF bytes.
///
/// # Errors
///
/// * [`PdfError::Extraction`] if the PDF library fails or panics
/// * [`PdfError::NoText`] if the text layer is (nearly) empty
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PdfError> {
    // Font parsing inside pdf-extract panics on some malformed documents.
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            return Err(PdfError::Extraction(format!(
                "failed to extract text from PDF: {e}"
            )));
        }
        Err(_) => {
            return Err(PdfError::Extraction(
                "PDF library panicked during extraction".to_owned(),
            ));
        }
    };

    ensure_text(text)
}

fn ensure_text(text: String) -> Result<String, PdfError> {
    let chars = text.chars().filter(|c| !c.is_whitespace()).count();
    if chars < MIN_TEXT_CHARS {
        return Err(PdfError::NoText { chars });
    }

    log::debug!("Extracted {chars} characters of text");
    Ok(text)
}
