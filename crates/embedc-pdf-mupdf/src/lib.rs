use mupdf::{Document, TextPageFlags};

use embedc_core::{BackendError, PdfBackend, PdfDocument};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that builds without the `mupdf` feature of
/// `embedc-ingest` do not transitively depend on it.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn name(&self) -> &'static str {
        "mupdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        let document =
            Document::from_bytes(bytes, "pdf").map_err(|e| BackendError::Open(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| BackendError::Open(e.to_string()))?;

        Ok(Box::new(MupdfDocument {
            document,
            page_count: usize::try_from(page_count).unwrap_or(0),
        }))
    }
}

struct MupdfDocument {
    document: Document,
    page_count: usize,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_error = |message: String| BackendError::Page { index, message };

        let page_no = i32::try_from(index).map_err(|e| page_error(e.to_string()))?;
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| page_error(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| page_error(e.to_string()))?;

        // Block/line walk, one output line per text line
        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }

        Ok(page_text)
    }
}
