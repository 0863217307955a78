//! Text Extractor: turns an uploaded résumé into plain text.
//!
//! `PdfTextExtractor` is the production implementation; the pipeline only sees
//! the `TextExtractor` trait.

pub mod ocr;
pub mod pdf;
pub mod validation;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// A file as received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the document text with whitespace collapsed. Blank output means
    /// the document had no recoverable text.
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError>;
}

/// Collapses line breaks and whitespace runs into single spaces.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
