//! Text Extractor: turns an uploaded PDF into one plain-text string.
//!
//! Pages are extracted in document order and concatenated without a separator.
//! A page with no extractable text contributes the empty string, so a PDF made
//! only of scanned images yields `""` rather than an error.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The bytes are not a PDF the extractor can read.
    #[error("{0}")]
    Parse(String),

    /// The blocking extraction task died (the PDF library panicked).
    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

/// Text pulled from a résumé PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

impl ExtractedText {
    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extracts the text of every page of `bytes`, in order.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    Ok(join_pages(pages))
}

/// Runs [`extract_text`] on the blocking pool.
///
/// PDF parsing is CPU-bound and the underlying library can panic on hostile
/// input; both are kept off the async workers and a panic surfaces as
/// [`ExtractionError::Aborted`].
pub async fn extract_text_blocking(bytes: Vec<u8>) -> Result<ExtractedText, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

fn join_pages(pages: Vec<String>) -> ExtractedText {
    let page_count = pages.len();
    let text: String = pages
        .into_iter()
        .enumerate()
        .map(|(index, page)| {
            if page.trim().is_empty() {
                debug!(page = index + 1, "Page has no extractable text");
                String::new()
            } else {
                page
            }
        })
        .collect();

    ExtractedText { text, page_count }
}
