use thiserror::Error;

use crate::extraction::UploadedFile;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("file is empty")]
    Empty,

    #[error("'{0}' is not a PDF (only .pdf files are accepted)")]
    NotPdf(String),

    #[error("file is {size} bytes, limit is {max} bytes")]
    TooLarge { size: usize, max: usize },
}

/// Checks that an upload is a non-empty `.pdf` no larger than `max_bytes`.
pub fn validate_pdf(file: &UploadedFile, max_bytes: usize) -> Result<(), ValidationError> {
    if file.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !file.file_name.to_lowercase().ends_with(".pdf") {
        return Err(ValidationError::NotPdf(file.file_name.clone()));
    }
    if file.size() > max_bytes {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            max: max_bytes,
        });
    }
    Ok(())
}
