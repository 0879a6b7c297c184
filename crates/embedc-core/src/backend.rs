use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text from page {index}: {message}")]
    Page { index: usize, message: String },
    #[error("backend panicked: {0}")]
    Panicked(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A PDF text extraction strategy.
///
/// Implementors only know how to open a byte buffer and hand out per-page
/// text; the fallback policy (which strategy runs, what counts as "used",
/// how page failures are tolerated) lives in [`crate::extract::TextExtractor`].
pub trait PdfBackend: Send + Sync {
    /// Short identifier used in logs and in config files (e.g. `"lopdf"`).
    fn name(&self) -> &'static str;

    /// Parse `bytes` as a PDF document.
    ///
    /// Returning `Ok` marks this backend as used for the request, even if
    /// every page later fails.
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// An opened document. Dropping it releases everything the backend holds.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text of the page at zero-based `index`.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}
