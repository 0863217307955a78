use async_trait::async_trait;
use tracing::{debug, warn};

use crate::extraction::ocr::OcrEngine;
use crate::extraction::{clean_text, ExtractionError, TextExtractor, UploadedFile};

/// Reads the embedded text layer of a PDF. Runs on a blocking thread.
type TextLayerFn = fn(&[u8]) -> Result<String, ExtractionError>;

fn pdf_text_layer(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Direct PDF text extraction via `pdf-extract`, with an optional OCR pass
/// when the text layer is blank or unreadable (scanned documents).
pub struct PdfTextExtractor {
    text_layer: TextLayerFn,
    ocr: Option<Box<dyn OcrEngine>>,
}

impl PdfTextExtractor {
    pub fn new(ocr: Option<Box<dyn OcrEngine>>) -> Self {
        Self {
            text_layer: pdf_text_layer,
            ocr,
        }
    }

    async fn extract_text_layer(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let bytes = file.bytes.clone();
        let text_layer = self.text_layer;
        // pdf-extract is CPU-bound and may panic on malformed input
        tokio::task::spawn_blocking(move || text_layer(&bytes))
            .await
            .map_err(|e| ExtractionError::Pdf(format!("extractor task failed: {e}")))?
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let (text, direct_error) = match self.extract_text_layer(file).await {
            Ok(text) => (text, None),
            Err(e) => {
                warn!("PDF parsing failed for {}: {e}, falling back to OCR", file.file_name);
                (String::new(), Some(e))
            }
        };

        if !text.trim().is_empty() {
            return Ok(clean_text(&text));
        }

        let Some(ocr) = &self.ocr else {
            debug!("No text layer in {} and OCR is disabled", file.file_name);
            return match direct_error {
                Some(e) => Err(e),
                None => Ok(String::new()),
            };
        };

        match ocr.recognize(file).await {
            Ok(text) => Ok(clean_text(&text)),
            Err(e) => {
                warn!("OCR failed for {}: {e}", file.file_name);
                Err(direct_error.unwrap_or(e))
            }
        }
    }
}
