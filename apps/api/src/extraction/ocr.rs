//! OCR fallback for scanned résumés.
//!
//! Pages are rendered with `pdftoppm` (poppler-utils) and recognised with the
//! `tesseract` CLI, both run inside a scratch directory that is removed on drop.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::extraction::{ExtractionError, UploadedFile};

const DEFAULT_DPI: u32 = 300;

/// Recognises text from page images of a scanned document.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, file: &UploadedFile) -> Result<String, ExtractionError>;
}

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    lang: String,
    dpi: u32,
}

impl TesseractOcr {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            dpi: DEFAULT_DPI,
        }
    }

    /// True when both `pdftoppm` and `tesseract` can be spawned.
    pub async fn is_available() -> bool {
        let pdftoppm = Command::new("pdftoppm").arg("-v").output().await.is_ok();
        let tesseract = Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .is_ok();

        if !pdftoppm {
            debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    /// Renders every page and returns the recognised text, pages joined by newlines.
    async fn recognize(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("input.pdf");
        tokio::fs::write(&input, &file.bytes).await?;

        info!(
            "Running OCR on {} (dpi={}, lang={})",
            file.file_name, self.dpi, self.lang
        );

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(scratch.path().join("page"))
            .output()
            .await?;
        if !output.status.success() {
            return Err(ExtractionError::Ocr(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let pages = rendered_pages(scratch.path())?;
        if pages.is_empty() {
            return Err(ExtractionError::Ocr("pdftoppm produced no images".to_string()));
        }

        let mut text = String::new();
        for page in &pages {
            let output = Command::new("tesseract")
                .arg(page)
                .arg("stdout")
                .arg("-l")
                .arg(&self.lang)
                .output()
                .await?;
            if !output.status.success() {
                return Err(ExtractionError::Ocr(format!(
                    "tesseract failed on {}: {}",
                    page.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
            text.push_str(&String::from_utf8_lossy(&output.stdout));
            text.push('\n');
        }

        debug!("OCR recognised {} pages", pages.len());
        Ok(text.trim().to_string())
    }
}

/// PNG files written by pdftoppm, in page order.
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();
    // pdftoppm zero-pads page numbers, so lexical order is page order
    pages.sort();
    Ok(pages)
}
