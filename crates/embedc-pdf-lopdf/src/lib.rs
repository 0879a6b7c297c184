use lopdf::Document;

use embedc_core::{BackendError, PdfBackend, PdfDocument};

/// Pure-Rust implementation of [`PdfBackend`] on top of `lopdf`.
///
/// No native library is involved, so this backend is always available when
/// compiled in and is tried first.
#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        let document = Document::load_mem(bytes).map_err(|e| BackendError::Open(e.to_string()))?;
        // get_pages() is keyed by 1-based page number in document order
        let page_numbers = document.get_pages().into_keys().collect();

        Ok(Box::new(LopdfDocument {
            document,
            page_numbers,
        }))
    }
}

struct LopdfDocument {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or_else(|| BackendError::Page {
                index,
                message: format!("document has {} pages", self.page_numbers.len()),
            })?;

        self.document
            .extract_text(&[page_number])
            .map_err(|e| BackendError::Page {
                index,
                message: e.to_string(),
            })
    }
}
