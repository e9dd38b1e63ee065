use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors only turn raw document bytes into per-page text; joining,
/// newline folding and truncation live in [`crate::document`].
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page, in document order.
    ///
    /// A page with no extractable text yields an empty string rather than
    /// being dropped, so the returned length equals the page count.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, BackendError>;
}
