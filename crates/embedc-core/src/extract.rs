//! Best-effort datasheet text extraction over an ordered list of backends.
//!
//! Backends are tried in order until one of them opens the document. That
//! backend is then "used" for the request: its pages are walked one by one,
//! failing pages are logged and skipped, and no later backend is consulted
//! even if every page failed. Nothing in here returns an error to the
//! caller; every failure degrades to less text.

use std::any::Any;
use std::borrow::Cow;
use std::io::{Read, Seek};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// Anything that can be read to the end and rewound afterwards.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Where the datasheet bytes come from. Consumed once per request.
pub enum DatasheetPayload<'a> {
    Bytes(&'a [u8]),
    /// Read from the current position to the end, then rewound to the start.
    Stream(&'a mut dyn ReadSeek),
    Path(&'a Path),
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Non-empty page texts joined with `\n`, in page order.
    pub text: String,
    /// Name of the backend that opened the document, if any did.
    pub backend: Option<&'static str>,
    pub pages_total: usize,
    pub pages_failed: usize,
    pub pages_with_text: usize,
}

pub struct TextExtractor {
    backends: Vec<Box<dyn PdfBackend>>,
}

impl TextExtractor {
    pub fn new(backends: Vec<Box<dyn PdfBackend>>) -> Self {
        Self { backends }
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Extract plain text from a datasheet. Never fails; may return `""`.
    pub fn extract(&self, payload: DatasheetPayload<'_>) -> String {
        self.extract_detailed(payload).text
    }

    /// Like [`extract`](Self::extract), but also reports which backend was
    /// used and how many pages were visited or lost.
    pub fn extract_detailed(&self, payload: DatasheetPayload<'_>) -> Extraction {
        let mut extraction = Extraction::default();

        if let Some(bytes) = read_payload(payload) {
            self.run_backends(&bytes, &mut extraction);
        }

        tracing::debug!(
            chars = extraction.text.len(),
            backend = extraction.backend.unwrap_or("none"),
            "extracted datasheet text"
        );
        extraction
    }

    fn run_backends(&self, bytes: &[u8], extraction: &mut Extraction) {
        if self.backends.is_empty() {
            tracing::warn!("no PDF backends available, datasheet text will be empty");
            return;
        }

        let mut parts: Vec<String> = Vec::new();

        for backend in &self.backends {
            let document = match open_guarded(backend.as_ref(), bytes) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!(backend = backend.name(), error = %e, "backend could not open document");
                    continue;
                }
            };

            extraction.backend = Some(backend.name());
            extraction.pages_total = document.page_count();

            for index in 0..extraction.pages_total {
                match page_text_guarded(document.as_ref(), index) {
                    Ok(text) if !text.is_empty() => parts.push(text),
                    Ok(_) => {}
                    Err(e) => {
                        extraction.pages_failed += 1;
                        tracing::warn!(backend = backend.name(), page = index, error = %e, "page extraction failed");
                    }
                }
            }
            break;
        }

        extraction.pages_with_text = parts.len();
        extraction.text = parts.join("\n");
    }
}

fn read_payload(payload: DatasheetPayload<'_>) -> Option<Cow<'_, [u8]>> {
    match payload {
        DatasheetPayload::Bytes(bytes) => Some(Cow::Borrowed(bytes)),
        DatasheetPayload::Stream(stream) => {
            let mut buf = Vec::new();
            let read = stream.read_to_end(&mut buf);
            if let Err(e) = stream.rewind() {
                tracing::debug!(error = %e, "could not rewind datasheet stream");
            }
            match read {
                Ok(_) => Some(Cow::Owned(buf)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read datasheet stream");
                    None
                }
            }
        }
        DatasheetPayload::Path(path) => match std::fs::read(path) {
            Ok(buf) => Some(Cow::Owned(buf)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to open datasheet");
                None
            }
        },
    }
}

fn open_guarded(
    backend: &dyn PdfBackend,
    bytes: &[u8],
) -> Result<Box<dyn PdfDocument>, BackendError> {
    panic::catch_unwind(AssertUnwindSafe(|| backend.open(bytes)))
        .unwrap_or_else(|payload| Err(BackendError::Panicked(panic_message(payload))))
}

fn page_text_guarded(document: &dyn PdfDocument, index: usize) -> Result<String, BackendError> {
    panic::catch_unwind(AssertUnwindSafe(|| document.page_text(index)))
        .unwrap_or_else(|payload| Err(BackendError::Panicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
